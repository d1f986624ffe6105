//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{ApiError, Result};

// Re-export shared types from quiz-core
pub use quiz_core::types::{
    AnswerRecord, Chosen, ParsedQuestion, Question, QuestionBody, QuestionKind,
};
pub use quiz_core::{StatsBreakdown, Submission};

/// Authenticated user as supplied by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub name: Option<String>,
    pub is_admin: bool,
}

// === Database Entity Types ===

/// User row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl DbUser {
    pub fn to_identity(&self) -> Identity {
        Identity {
            user_id: self.id.to_string(),
            name: self.name.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Question document row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbQuestion {
    pub id: Uuid,
    pub kind: String,
    pub document: Json<Question>,
    pub created_at: DateTime<Utc>,
}

/// Answer record row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbAnswerRecord {
    pub id: Uuid,
    pub user_id: String,
    pub question_id: Uuid,
    pub kind: String,
    pub chosen: Json<Chosen>,
    pub is_correct: bool,
    pub submitted_at: DateTime<Utc>,
    pub next_review_date: DateTime<Utc>,
}

impl DbAnswerRecord {
    /// Convert to quiz-core AnswerRecord
    pub fn to_core_record(self) -> Result<AnswerRecord> {
        let kind = QuestionKind::from_str(&self.kind)
            .ok_or_else(|| ApiError::Internal(format!("Unknown question kind: {}", self.kind)))?;

        Ok(AnswerRecord {
            id: self.id,
            user_id: self.user_id,
            question_id: self.question_id,
            kind,
            chosen: self.chosen.0,
            is_correct: self.is_correct,
            submitted_at: self.submitted_at,
            next_review_date: self.next_review_date,
        })
    }
}

// === API Request/Response Types ===

/// User registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
}

/// User registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub token: String,
}

/// Question list query parameters
#[derive(Debug, Deserialize)]
pub struct QuestionListQuery {
    pub kind: Option<String>,
    pub limit: Option<usize>,
}

impl QuestionListQuery {
    pub const DEFAULT_LIMIT: usize = 50;
    pub const MAX_LIMIT: usize = 500;

    /// Parse the kind filter, rejecting unknown kinds.
    pub fn kind(&self) -> Result<Option<QuestionKind>> {
        self.kind
            .as_deref()
            .map(|k| {
                QuestionKind::from_str(k)
                    .ok_or_else(|| ApiError::BadRequest(format!("Unknown question kind: {}", k)))
            })
            .transpose()
    }

    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .min(Self::MAX_LIMIT)
    }
}

/// Question list response
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionListResponse {
    pub questions: Vec<Question>,
}

/// Submit answer request
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    pub submission: Submission,
}

/// Due review query parameters
#[derive(Debug, Deserialize)]
pub struct DueReviewQuery {
    pub limit: Option<usize>,
}

impl DueReviewQuery {
    pub const DEFAULT_LIMIT: usize = 20;
    pub const MAX_LIMIT: usize = 200;

    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .min(Self::MAX_LIMIT)
    }
}

/// A question due for review with the attempt that scheduled it
#[derive(Debug, Serialize, Deserialize)]
pub struct DueReviewItem {
    pub question: Question,
    pub record: AnswerRecord,
}

/// Due review response
#[derive(Debug, Serialize, Deserialize)]
pub struct DueReviewResponse {
    pub items: Vec<DueReviewItem>,
}

/// Pasted question text
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

/// Delete response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
