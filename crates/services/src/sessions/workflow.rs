use study_core::Clock;
use study_core::model::QuizSummary;

use super::flashcards::FlashcardSession;
use super::plan::{QuizPlan, QuizPlanBuilder};
use super::quiz::{QuizSession, QuizState};
use crate::bank_loader::QuestionBank;
use crate::config::StudyConfig;
use crate::error::SessionError;
use crate::summary::summarize_quiz;

/// Starts sessions from a loaded bank and feeds them the clock's time.
///
/// Holds no session state itself; every session it hands out is owned by the
/// caller, and a restart is simply a fresh `start_*` call.
#[derive(Debug, Clone)]
pub struct StudyService {
    clock: Clock,
    config: StudyConfig,
}

impl StudyService {
    #[must_use]
    pub fn new(clock: Clock, config: StudyConfig) -> Self {
        Self { clock, config }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Mutable access to a fixed clock, for tests and replays.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    /// Quizzable pairs after the configured filters.
    #[must_use]
    pub fn plan_quiz(&self, bank: &QuestionBank) -> QuizPlan {
        QuizPlanBuilder::from_config(&self.config).build(bank.items())
    }

    /// Start a quiz capped at the configured question count.
    #[must_use]
    pub fn start_quiz(&self, bank: &QuestionBank) -> QuizSession {
        let plan = self.plan_quiz(bank);
        QuizSession::new(plan.items, self.config.question_count(), self.clock.now())
            .with_time_limit(self.config.seconds_per_question())
    }

    /// Start a flashcard deck with one fresh card per pair in the bank.
    #[must_use]
    pub fn start_flashcards(&self, bank: &QuestionBank) -> FlashcardSession {
        FlashcardSession::new(bank.flashcards(self.clock.now()))
    }

    /// Move past the answered question using the service clock.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` from [`QuizSession::advance`].
    pub fn advance(&self, quiz: &mut QuizSession) -> Result<QuizState, SessionError> {
        quiz.advance(self.clock.now())
    }

    /// Rate the current flashcard using the service clock.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` from [`FlashcardSession::rate`].
    pub fn rate(&self, deck: &mut FlashcardSession, level: u8) -> Result<(), SessionError> {
        deck.rate(level, self.clock.now())
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` while questions remain.
    pub fn summarize(&self, quiz: &QuizSession) -> Result<QuizSummary, SessionError> {
        summarize_quiz(quiz)
    }
}
