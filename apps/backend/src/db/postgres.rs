//! PostgreSQL database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};
use uuid::Uuid;

use super::{AuthProvider, DocumentStore};
use crate::error::{ApiError, Result};
use crate::models::*;

/// PostgreSQL-backed store with connection pool
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Update user last_seen_at timestamp
    async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn to_records(rows: Vec<DbAnswerRecord>) -> Result<Vec<AnswerRecord>> {
    rows.into_iter().map(DbAnswerRecord::to_core_record).collect()
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn insert_question(&self, question: &Question) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO questions (id, kind, document, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(question.id)
        .bind(question.kind().as_str())
        .bind(Json(question))
        .bind(question.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_question(&self, id: Uuid) -> Result<Option<Question>> {
        let row = sqlx::query_as::<_, DbQuestion>(
            r#"
            SELECT id, kind, document, created_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.document.0))
    }

    async fn list_questions(
        &self,
        kind: Option<QuestionKind>,
        limit: usize,
    ) -> Result<Vec<Question>> {
        let rows = sqlx::query_as::<_, DbQuestion>(
            r#"
            SELECT id, kind, document, created_at
            FROM questions
            WHERE $1::TEXT IS NULL OR kind = $1
            ORDER BY created_at, id
            LIMIT $2
            "#,
        )
        .bind(kind.map(|k| k.as_str()))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.document.0).collect())
    }

    async fn delete_question(&self, id: Uuid) -> Result<bool> {
        // answer_records cascade on delete
        let result = sqlx::query(
            r#"
            DELETE FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_answer(&self, record: &AnswerRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO answer_records (id, user_id, question_id, kind, chosen,
                                        is_correct, submitted_at, next_review_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id)
        .bind(&record.user_id)
        .bind(record.question_id)
        .bind(record.kind.as_str())
        .bind(Json(&record.chosen))
        .bind(record.is_correct)
        .bind(record.submitted_at)
        .bind(record.next_review_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_answers(&self, user_id: &str) -> Result<Vec<AnswerRecord>> {
        let rows = sqlx::query_as::<_, DbAnswerRecord>(
            r#"
            SELECT id, user_id, question_id, kind, chosen, is_correct,
                   submitted_at, next_review_date
            FROM answer_records
            WHERE user_id = $1
            ORDER BY submitted_at, seq
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        to_records(rows)
    }

    async fn latest_answer(
        &self,
        user_id: &str,
        question_id: Uuid,
    ) -> Result<Option<AnswerRecord>> {
        let row = sqlx::query_as::<_, DbAnswerRecord>(
            r#"
            SELECT id, user_id, question_id, kind, chosen, is_correct,
                   submitted_at, next_review_date
            FROM answer_records
            WHERE user_id = $1 AND question_id = $2
            ORDER BY submitted_at DESC, seq DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DbAnswerRecord::to_core_record).transpose()
    }

    async fn due_reviews(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<AnswerRecord>> {
        let rows = sqlx::query_as::<_, DbAnswerRecord>(
            r#"
            SELECT id, user_id, question_id, kind, chosen, is_correct,
                   submitted_at, next_review_date
            FROM (
                SELECT DISTINCT ON (question_id) *
                FROM answer_records
                WHERE user_id = $1
                ORDER BY question_id, submitted_at DESC, seq DESC
            ) latest
            WHERE next_review_date <= $2
            ORDER BY next_review_date
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(now)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        to_records(rows)
    }
}

#[async_trait]
impl AuthProvider for PostgresStore {
    async fn register(&self, name: Option<&str>) -> Result<(Identity, String)> {
        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (id, token, name)
            VALUES ($1, $2, $3)
            RETURNING id, token, name, is_admin, created_at, last_seen_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&token)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok((user.to_identity(), token))
    }

    async fn authenticate(&self, token: &str) -> Result<Option<Identity>> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, token, name, is_admin, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        match user {
            Some(user) => {
                self.update_last_seen(user.id).await?;
                Ok(Some(user.to_identity()))
            }
            None => Ok(None),
        }
    }

    async fn ensure_admin(&self, token: &str, name: &str) -> Result<Identity> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (id, token, name, is_admin)
            VALUES ($1, $2, $3, TRUE)
            ON CONFLICT (token) DO UPDATE SET is_admin = TRUE
            RETURNING id, token, name, is_admin, created_at, last_seen_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(token)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user.to_identity())
    }
}
