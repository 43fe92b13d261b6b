#![forbid(unsafe_code)]

pub mod bank_loader;
pub mod config;
pub mod error;
pub mod export;
pub mod sessions;
pub mod summary;

pub use study_core::Clock;

pub use bank_loader::{LoadWarning, LoadedBank, PairDefect, QuestionBank};
pub use config::{Difficulty, StudyConfig};
pub use error::{BankError, ConfigError, ExportError, SessionError};
pub use export::{FlashcardRecord, export_flashcards, import_flashcards};
pub use sessions::{
    AnswerFeedback, CardView, FlashcardSession, QuestionResult, QuizPlan, QuizPlanBuilder,
    QuizSession, QuizState, SessionProgress, StudyService,
};
pub use summary::summarize_quiz;
