//! Error types for quiz-core.

use thiserror::Error;

use crate::types::Letter;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing pasted question text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing answer marker (✅ 正確答案)")]
    MissingAnswerMarker,

    #[error("missing explanation marker (📖 詳解)")]
    MissingExplanationMarker,

    #[error("answer marker is not followed by an option letter (A-E)")]
    UnparsableAnswer,

    #[error("no option markers such as (A) found before the answer")]
    NoOptionMarkersFound,

    #[error("answer {answer} does not match any of the {options} parsed options")]
    AnswerOutOfRange { answer: Letter, options: usize },
}

/// Errors raised when a submission cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no choice selected")]
    NoChoiceSelected,

    #[error("submission of kind {submitted} does not match question of kind {expected}")]
    KindMismatch {
        expected: &'static str,
        submitted: &'static str,
    },

    #[error("option {letter} is out of range for a question with {options} options")]
    OptionOutOfRange { letter: Letter, options: usize },

    #[error("expected answers for {expected} items, got {actual}")]
    ItemCountMismatch { expected: usize, actual: usize },

    #[error("question already submitted; reset before answering again")]
    AlreadySubmitted,
}
