//! Shared error types for the services crate.

use thiserror::Error;

use study_core::model::{MasteryError, OptionLabel, SummaryError};

/// Fatal failures while reading a question bank. No session can be built.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("invalid input: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("malformed question bank: {0}")]
    Malformed(String),
}

/// Contract violations raised by the quiz and flashcard engines.
///
/// These signal a caller bug, such as driving a transition from the wrong state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("current question was already answered")]
    AlreadyAnswered,
    #[error("current question has not been answered yet")]
    NotAnswered,
    #[error("session already completed")]
    Completed,
    #[error("session is not completed yet")]
    NotCompleted,
    #[error("option {0} is not offered for the current question")]
    UnknownOption(OptionLabel),
    #[error("no cards available for session")]
    NoCards,
    #[error(transparent)]
    Mastery(#[from] MasteryError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// Errors while writing or reading a flashcard snapshot.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid timestamp in snapshot: {raw}")]
    InvalidTimestamp { raw: String },
    #[error("invalid due date in snapshot: {raw}")]
    InvalidDueDate { raw: String },
    #[error(transparent)]
    Mastery(#[from] MasteryError),
}

/// Rejected study configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("seconds per question must be between 10 and 120, got {0}")]
    InvalidSecondsPerQuestion(u32),
    #[error("unknown difficulty: {raw}")]
    UnknownDifficulty { raw: String },
}
