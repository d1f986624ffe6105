//! PostgresStore tests.
//!
//! # Requirements
//! These tests need a PostgreSQL database (set DATABASE_URL env var) and are
//! ignored by default. Run with `--ignored`.

mod common;

use chrono::{Duration, Utc};
use quiz_backend::db::{AuthProvider, DocumentStore, PostgresStore};
use quiz_core::{AnswerRecord, Chosen, Letter, QuestionKind};
use uuid::Uuid;

use common::fixtures;

async fn connect() -> PostgresStore {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for database tests");

    let store = PostgresStore::connect(&database_url, 2)
        .await
        .expect("Failed to connect to test database");

    store
        .run_migrations()
        .await
        .expect("Failed to run migrations");

    store
}

fn attempt(user_id: &str, question_id: Uuid, days_ago: i64, is_correct: bool) -> AnswerRecord {
    let submitted_at = Utc::now() - Duration::days(days_ago);
    AnswerRecord {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        question_id,
        kind: QuestionKind::SingleChoice,
        chosen: Chosen::Single(Letter::B),
        is_correct,
        submitted_at,
        next_review_date: quiz_core::compute_next_review_date(submitted_at, is_correct),
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_question_document_round_trip() {
    let store = connect().await;
    let question = fixtures::reading_question(&[Letter::A, Letter::C]);

    store.insert_question(&question).await.unwrap();

    let kind: String = sqlx::query_scalar("SELECT kind FROM questions WHERE id = $1")
        .bind(question.id)
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(kind, "reading");

    let fetched = store.get_question(question.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, question.id);
    assert_eq!(fetched.body, question.body);

    let readings = store
        .list_questions(Some(QuestionKind::Reading), 500)
        .await
        .unwrap();
    assert!(readings.iter().any(|q| q.id == question.id));

    assert!(store.delete_question(question.id).await.unwrap());
    assert!(store.get_question(question.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_due_reviews_use_latest_attempt() {
    let store = connect().await;
    let (identity, token) = store.register(Some("pg-test")).await.unwrap();
    assert_eq!(
        store.authenticate(&token).await.unwrap().map(|i| i.user_id),
        Some(identity.user_id.clone())
    );

    let question = fixtures::single_choice_question(Letter::B);
    store.insert_question(&question).await.unwrap();

    store
        .insert_answer(&attempt(&identity.user_id, question.id, 4, false))
        .await
        .unwrap();
    let due = store
        .due_reviews(&identity.user_id, Utc::now(), 20)
        .await
        .unwrap();
    assert_eq!(due.len(), 1);

    store
        .insert_answer(&attempt(&identity.user_id, question.id, 1, true))
        .await
        .unwrap();
    let due = store
        .due_reviews(&identity.user_id, Utc::now(), 20)
        .await
        .unwrap();
    assert!(due.is_empty());

    let latest = store
        .latest_answer(&identity.user_id, question.id)
        .await
        .unwrap()
        .unwrap();
    assert!(latest.is_correct);

    store.delete_question(question.id).await.unwrap();
    assert!(store.list_answers(&identity.user_id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_latest_answer_breaks_timestamp_ties_by_insert_order() {
    let store = connect().await;
    let question = fixtures::single_choice_question(Letter::B);
    store.insert_question(&question).await.unwrap();

    let user_id = Uuid::new_v4().to_string();
    let first = attempt(&user_id, question.id, 2, true);
    let mut second = attempt(&user_id, question.id, 2, false);
    second.submitted_at = first.submitted_at;
    second.next_review_date = quiz_core::compute_next_review_date(second.submitted_at, false);

    store.insert_answer(&first).await.unwrap();
    store.insert_answer(&second).await.unwrap();

    let latest = store
        .latest_answer(&user_id, question.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, second.id);

    let due = store.due_reviews(&user_id, Utc::now(), 20).await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, second.id);

    store.delete_question(question.id).await.unwrap();
}
