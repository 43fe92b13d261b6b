use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("correct answers ({correct}) exceed total questions ({total})")]
    CountMismatch { correct: usize, total: usize },
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Score band shown at the end of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTier {
    /// 90% and above.
    Outstanding,
    /// 70% up to 90%.
    Great,
    /// 50% up to 70%.
    GoodEffort,
    /// Below 50%.
    NeedsPractice,
}

const TIPS_STRUGGLING: &[&str] = &[
    "Review the questions you got wrong",
    "Create flashcards for difficult concepts",
    "Try learning in smaller chunks",
    "Practice regularly for better retention",
];

const TIPS_MAINTAINING: &[&str] = &[
    "Review periodically",
    "Try teaching someone else what you've learned",
    "Connect these concepts to real-world examples",
];

impl FeedbackTier {
    #[must_use]
    pub fn from_score(score_percentage: f64) -> Self {
        if score_percentage >= 90.0 {
            Self::Outstanding
        } else if score_percentage >= 70.0 {
            Self::Great
        } else if score_percentage >= 50.0 {
            Self::GoodEffort
        } else {
            Self::NeedsPractice
        }
    }

    /// Stable lowercase key for the tier.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Outstanding => "outstanding",
            Self::Great => "great",
            Self::GoodEffort => "good effort",
            Self::NeedsPractice => "needs practice",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding! You have excellent knowledge!",
            Self::Great => "Great job! You have good understanding!",
            Self::GoodEffort => "Good effort! Keep practicing to improve!",
            Self::NeedsPractice => "You might need more practice. Keep going!",
        }
    }
}

//
// ─── QUIZ SUMMARY ──────────────────────────────────────────────────────────────
//

/// Final metrics for a finished quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSummary {
    total_questions: usize,
    correct_count: usize,
    score_percentage: f64,
    average_time_secs: f64,
    feedback: FeedbackTier,
    missed: Vec<usize>,
}

impl QuizSummary {
    /// Builds the summary from raw counts and the per-question timing log.
    ///
    /// An empty quiz scores 0% and an empty timing log averages 0 seconds.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::CountMismatch` if `correct_count > total_questions`.
    pub fn new(
        total_questions: usize,
        correct_count: usize,
        question_times: &[f64],
        missed: Vec<usize>,
    ) -> Result<Self, SummaryError> {
        if correct_count > total_questions {
            return Err(SummaryError::CountMismatch {
                correct: correct_count,
                total: total_questions,
            });
        }

        // Counts stay far below 2^52.
        #[allow(clippy::cast_precision_loss)]
        let score_percentage = if total_questions == 0 {
            0.0
        } else {
            correct_count as f64 / total_questions as f64 * 100.0
        };

        #[allow(clippy::cast_precision_loss)]
        let average_time_secs = if question_times.is_empty() {
            0.0
        } else {
            question_times.iter().sum::<f64>() / question_times.len() as f64
        };

        Ok(Self {
            total_questions,
            correct_count,
            score_percentage,
            average_time_secs,
            feedback: FeedbackTier::from_score(score_percentage),
            missed,
        })
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.total_questions - self.correct_count
    }

    #[must_use]
    pub fn score_percentage(&self) -> f64 {
        self.score_percentage
    }

    #[must_use]
    pub fn average_time_secs(&self) -> f64 {
        self.average_time_secs
    }

    #[must_use]
    pub fn feedback(&self) -> FeedbackTier {
        self.feedback
    }

    /// Zero-based positions of questions answered wrongly.
    #[must_use]
    pub fn missed(&self) -> &[usize] {
        &self.missed
    }

    /// Study suggestions keyed on whether the score reached 70%.
    #[must_use]
    pub fn learning_tips(&self) -> &'static [&'static str] {
        if self.score_percentage < 70.0 {
            TIPS_STRUGGLING
        } else {
            TIPS_MAINTAINING
        }
    }
}
