mod flashcards;
mod plan;
mod progress;
mod quiz;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use flashcards::{CardView, FlashcardSession};
pub use plan::{QuizPlan, QuizPlanBuilder};
pub use progress::SessionProgress;
pub use quiz::{AnswerFeedback, QuestionResult, QuizSession, QuizState};
pub use workflow::StudyService;
