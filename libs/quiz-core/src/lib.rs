//! Core quiz library shared by the backend and the browser client.
//!
//! Provides:
//! - Answer evaluation for single-choice, multi-select and reading questions
//! - Fixed-interval spaced repetition scheduling
//! - Parser for pasted question text (admin ingestion)
//! - Accuracy statistics over answer records
//! - Shared types (Letter, ChoiceSet, Question, AnswerRecord, etc.)

pub mod error;
pub mod evaluator;
pub mod parser;
pub mod richtext;
pub mod scheduler;
pub mod stats;
pub mod types;

pub use error::{ParseError, Result, ValidationError};
pub use evaluator::{
    evaluate, evaluate_multi_select, evaluate_reading, evaluate_single, evaluate_submission, normalize,
    QuestionSession, Submission,
};
pub use parser::{parse, QuestionTextParser};
pub use richtext::{HtmlRenderer, PlainTextRenderer};
pub use scheduler::{compute_next_review_date, is_due, FixedInterval, ReviewScheduler};
pub use stats::{AccuracyStats, StatsBreakdown};
pub use types::{
    AnswerRecord, ChoiceSet, Chosen, Letter, ParsedQuestion, Question, QuestionBody,
    QuestionKind, ReadingItem,
};
