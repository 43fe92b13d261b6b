mod bank;
mod flashcard;
mod option;
mod summary;

pub use bank::{Lesson, QuestionError, QuestionPair};
pub use flashcard::{Flashcard, MasteryError, MasteryHistogram, MasteryLevel};
pub use option::{AnswerOption, OptionLabel, OptionLabelError};
pub use summary::{FeedbackTier, QuizSummary, SummaryError};
