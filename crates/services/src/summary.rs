//! End-of-quiz report built from a finished session.

use study_core::model::QuizSummary;

use crate::error::SessionError;
use crate::sessions::QuizSession;

/// Aggregate the final metrics of a completed quiz.
///
/// The total is the question count fixed when the session started, so an
/// empty quiz reports 0% instead of dividing by zero.
///
/// # Errors
///
/// Returns `SessionError::NotCompleted` while questions remain.
pub fn summarize_quiz(session: &QuizSession) -> Result<QuizSummary, SessionError> {
    if !session.is_complete() {
        return Err(SessionError::NotCompleted);
    }

    let missed = session
        .results()
        .iter()
        .filter(|result| !result.correct)
        .map(|result| result.index)
        .collect();

    let summary = QuizSummary::new(
        session.total_questions(),
        session.correct_count(),
        session.question_times(),
        missed,
    )?;

    tracing::info!(
        score = summary.score_percentage(),
        tier = summary.feedback().key(),
        "quiz summarized"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use study_core::model::{AnswerOption, FeedbackTier, OptionLabel, QuestionPair};
    use study_core::time::fixed_now;

    fn quiz(n: usize) -> QuizSession {
        let items = (0..n)
            .map(|i| {
                QuestionPair::new(
                    format!("Q{i}"),
                    "a",
                    AnswerOption::from_texts(["a", "b"]),
                    Some(OptionLabel::A),
                )
                .unwrap()
            })
            .collect();
        QuizSession::new(items, None, fixed_now())
    }

    #[test]
    fn unfinished_quiz_has_no_summary() {
        let session = quiz(1);
        assert_eq!(summarize_quiz(&session).unwrap_err(), SessionError::NotCompleted);
    }

    #[test]
    fn empty_quiz_reports_zero() {
        let summary = summarize_quiz(&quiz(0)).unwrap();
        assert_eq!(summary.total_questions(), 0);
        assert_eq!(summary.score_percentage(), 0.0);
        assert_eq!(summary.average_time_secs(), 0.0);
    }

    #[test]
    fn mixed_answers_report_missed_and_average() {
        let mut session = quiz(4);
        let mut now = fixed_now();
        for label in [OptionLabel::A, OptionLabel::B, OptionLabel::A, OptionLabel::B] {
            session.submit_answer(label).unwrap();
            now += Duration::seconds(3);
            session.advance(now).unwrap();
        }

        let summary = summarize_quiz(&session).unwrap();
        assert_eq!(summary.correct_count(), 2);
        assert_eq!(summary.score_percentage(), 50.0);
        assert_eq!(summary.feedback(), FeedbackTier::GoodEffort);
        assert_eq!(summary.missed(), &[1, 3]);
        assert_eq!(summary.average_time_secs(), 3.0);
    }
}
