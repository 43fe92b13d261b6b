use chrono::{DateTime, Duration, Utc};
use std::fmt;

use study_core::memory_aid;
use study_core::model::{OptionLabel, QuestionPair};
use study_core::time::elapsed_seconds;

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where a quiz is in its question loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// The current question is shown and waits for a choice.
    AwaitingAnswer,
    /// A choice was scored; the reveal is shown until `advance`.
    Answered,
    /// Every question was answered. Only reads are valid from here.
    Completed,
}

/// Outcome of one answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionResult {
    pub index: usize,
    pub chosen: OptionLabel,
    pub correct: bool,
}

/// Everything revealed once a question has been answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub chosen: OptionLabel,
    pub is_correct: bool,
    pub correct_option: Option<OptionLabel>,
    pub answer: String,
    pub explanation: Option<String>,
    pub memory_aid: String,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory multiple-choice quiz over a fixed list of questions.
///
/// The question list is fixed at construction. Each question goes
/// `AwaitingAnswer -> Answered` on `submit_answer` and moves to the next one
/// on `advance`, which also logs how long the question took.
pub struct QuizSession {
    items: Vec<QuestionPair>,
    current: usize,
    correct_count: usize,
    state: QuizState,
    user_answer: Option<OptionLabel>,
    results: Vec<QuestionResult>,
    question_times: Vec<f64>,
    question_started_at: DateTime<Utc>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    time_limit: Option<Duration>,
}

impl QuizSession {
    /// Create a quiz over `items`, keeping at most `limit` questions.
    ///
    /// A limit of `None` or `Some(0)` keeps the whole list; a limit larger than
    /// the list is clamped. An empty list yields a session that is already
    /// `Completed`.
    #[must_use]
    pub fn new(mut items: Vec<QuestionPair>, limit: Option<u32>, started_at: DateTime<Utc>) -> Self {
        if let Some(limit) = limit.filter(|&n| n > 0) {
            let limit = usize::try_from(limit).unwrap_or(usize::MAX);
            items.truncate(limit);
        }

        let (state, completed_at) = if items.is_empty() {
            (QuizState::Completed, Some(started_at))
        } else {
            (QuizState::AwaitingAnswer, None)
        };

        tracing::info!(questions = items.len(), "quiz session started");

        Self {
            items,
            current: 0,
            correct_count: 0,
            state,
            user_answer: None,
            results: Vec::new(),
            question_times: Vec::new(),
            question_started_at: started_at,
            started_at,
            completed_at,
            time_limit: None,
        }
    }

    /// Attach an advisory per-question time limit. Nothing is enforced here.
    #[must_use]
    pub fn with_time_limit(mut self, seconds: Option<u32>) -> Self {
        self.time_limit = seconds.map(|s| Duration::seconds(i64::from(s)));
        self
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == QuizState::Completed
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.state == QuizState::Answered
    }

    /// Number of questions fixed at construction.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn user_answer(&self) -> Option<OptionLabel> {
        self.user_answer
    }

    #[must_use]
    pub fn items(&self) -> &[QuestionPair] {
        &self.items
    }

    #[must_use]
    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    /// Seconds spent on each question that has been advanced past.
    #[must_use]
    pub fn question_times(&self) -> &[f64] {
        &self.question_times
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionPair> {
        if self.is_complete() {
            return None;
        }
        self.items.get(self.current)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress::at(self.current, self.items.len(), self.is_complete())
    }

    /// Score the chosen option for the current question.
    ///
    /// # Errors
    ///
    /// - `AlreadyAnswered` if the current question was already scored; it is not re-scored.
    /// - `Completed` once every question is done.
    /// - `UnknownOption` if `label` is not offered by the current question.
    pub fn submit_answer(&mut self, label: OptionLabel) -> Result<AnswerFeedback, SessionError> {
        match self.state {
            QuizState::AwaitingAnswer => {}
            QuizState::Answered => return Err(SessionError::AlreadyAnswered),
            QuizState::Completed => return Err(SessionError::Completed),
        }
        let item = self.items.get(self.current).ok_or(SessionError::Completed)?;
        if item.option(label).is_none() {
            return Err(SessionError::UnknownOption(label));
        }

        let correct = item.is_correct(label);
        if correct {
            self.correct_count += 1;
        }
        self.user_answer = Some(label);
        self.results.push(QuestionResult {
            index: self.current,
            chosen: label,
            correct,
        });
        self.state = QuizState::Answered;

        tracing::debug!(index = self.current, %label, correct, "answer submitted");

        self.feedback().ok_or(SessionError::NotAnswered)
    }

    /// Reveal data for the answered current question.
    #[must_use]
    pub fn feedback(&self) -> Option<AnswerFeedback> {
        if self.state != QuizState::Answered {
            return None;
        }
        let item = self.items.get(self.current)?;
        let result = self.results.last()?;
        Some(AnswerFeedback {
            chosen: result.chosen,
            is_correct: result.correct,
            correct_option: item.correct_option(),
            answer: item.answer().to_owned(),
            explanation: item.explanation().map(str::to_owned),
            memory_aid: memory_aid(item.question(), item.answer()),
        })
    }

    /// Log the time spent on the answered question and move to the next one.
    ///
    /// Returns the state after moving; `Completed` once the last question is passed.
    ///
    /// # Errors
    ///
    /// - `NotAnswered` while the current question still awaits a choice.
    /// - `Completed` once every question is done; nothing is logged again.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<QuizState, SessionError> {
        match self.state {
            QuizState::Answered => {}
            QuizState::AwaitingAnswer => return Err(SessionError::NotAnswered),
            QuizState::Completed => return Err(SessionError::Completed),
        }

        self.question_times
            .push(elapsed_seconds(self.question_started_at, now));
        self.question_started_at = now;
        self.current += 1;
        self.user_answer = None;

        if self.current >= self.items.len() {
            self.state = QuizState::Completed;
            self.completed_at = Some(now);
            tracing::info!(
                correct = self.correct_count,
                total = self.items.len(),
                "quiz session completed"
            );
        } else {
            self.state = QuizState::AwaitingAnswer;
        }

        Ok(self.state)
    }

    /// Time left on the current question in timed mode.
    ///
    /// `None` when untimed or completed; never negative.
    #[must_use]
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        if self.is_complete() {
            return None;
        }
        let limit = self.time_limit?;
        let spent = now.signed_duration_since(self.question_started_at);
        Some((limit - spent).max(Duration::zero()))
    }

    /// Whether the advisory limit for the current question has run out.
    #[must_use]
    pub fn is_over_time(&self, now: DateTime<Utc>) -> bool {
        self.time_remaining(now)
            .is_some_and(|left| left == Duration::zero())
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("items_len", &self.items.len())
            .field("current", &self.current)
            .field("correct_count", &self.correct_count)
            .field("state", &self.state)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
