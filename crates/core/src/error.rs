use thiserror::Error;

use crate::model::{MasteryError, OptionLabelError, QuestionError, SummaryError};

/// Umbrella error for the domain model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    OptionLabel(#[from] OptionLabelError),
    #[error(transparent)]
    Mastery(#[from] MasteryError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
