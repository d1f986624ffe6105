//! Document store and auth provider interfaces with their implementations.

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{AnswerRecord, Identity, Question, QuestionKind};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Durable storage for question documents and answer records.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_question(&self, question: &Question) -> Result<()>;

    async fn get_question(&self, id: Uuid) -> Result<Option<Question>>;

    /// Questions ordered by creation time, optionally filtered by kind.
    async fn list_questions(&self, kind: Option<QuestionKind>, limit: usize)
        -> Result<Vec<Question>>;

    /// Delete a question and its answer records. Returns whether it existed.
    async fn delete_question(&self, id: Uuid) -> Result<bool>;

    async fn insert_answer(&self, record: &AnswerRecord) -> Result<()>;

    /// All records for a user, oldest first.
    async fn list_answers(&self, user_id: &str) -> Result<Vec<AnswerRecord>>;

    async fn latest_answer(&self, user_id: &str, question_id: Uuid)
        -> Result<Option<AnswerRecord>>;

    /// Latest record per question whose next review date has passed,
    /// earliest first.
    async fn due_reviews(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<AnswerRecord>>;
}

/// Identity lookup for bearer tokens.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create a regular (non-admin) user and return it with its token.
    async fn register(&self, name: Option<&str>) -> Result<(Identity, String)>;

    async fn authenticate(&self, token: &str) -> Result<Option<Identity>>;

    /// Make sure an admin identity exists for the given token.
    async fn ensure_admin(&self, token: &str, name: &str) -> Result<Identity>;
}
