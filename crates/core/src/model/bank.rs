use thiserror::Error;

use crate::model::option::{AnswerOption, OptionLabel};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("a question supports at most 4 options, got {0}")]
    TooManyOptions(usize),

    #[error("options must be labeled A, B, C, D in order")]
    MislabeledOptions,

    #[error("correct option {0} is not among the supplied options")]
    CorrectOptionMissing(OptionLabel),
}

//
// ─── QUESTION PAIR ─────────────────────────────────────────────────────────────
//

/// A question with its answer text and up to four labeled choices.
///
/// Immutable once built. When `correct_option` is `None`, answers are checked
/// by comparing the chosen option's text with `answer` verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPair {
    question: String,
    answer: String,
    options: Vec<AnswerOption>,
    correct_option: Option<OptionLabel>,
    explanation: Option<String>,
    syllabus_area: Option<String>,
    difficulty: Option<String>,
}

impl QuestionPair {
    /// Builds a question pair, checking the option labels against the alphabet.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if there are more than four options, the labels are
    /// not `A..` in order, or `correct_option` names a label that is not supplied.
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        options: Vec<AnswerOption>,
        correct_option: Option<OptionLabel>,
    ) -> Result<Self, QuestionError> {
        if options.len() > OptionLabel::ALL.len() {
            return Err(QuestionError::TooManyOptions(options.len()));
        }
        if options
            .iter()
            .enumerate()
            .any(|(i, opt)| opt.label.index() != i)
        {
            return Err(QuestionError::MislabeledOptions);
        }
        if let Some(label) = correct_option {
            if label.index() >= options.len() {
                return Err(QuestionError::CorrectOptionMissing(label));
            }
        }

        Ok(Self {
            question: question.into(),
            answer: answer.into(),
            options,
            correct_option,
            explanation: None,
            syllabus_area: None,
            difficulty: None,
        })
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    #[must_use]
    pub fn with_syllabus_area(mut self, area: impl Into<String>) -> Self {
        self.syllabus_area = Some(area.into());
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<OptionLabel> {
        self.correct_option
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn syllabus_area(&self) -> Option<&str> {
        self.syllabus_area.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    #[must_use]
    pub fn option(&self, label: OptionLabel) -> Option<&AnswerOption> {
        self.options.get(label.index())
    }

    /// A pair with no options can still be studied as a flashcard but cannot be quizzed.
    #[must_use]
    pub fn is_answerable(&self) -> bool {
        !self.options.is_empty()
    }

    /// Checks a chosen label against this question.
    ///
    /// With a declared correct option the labels are compared. Otherwise the
    /// chosen option's text must equal `answer` exactly; whitespace or case
    /// differences count as wrong.
    #[must_use]
    pub fn is_correct(&self, chosen: OptionLabel) -> bool {
        match self.correct_option {
            Some(correct) => chosen == correct,
            None => self
                .option(chosen)
                .is_some_and(|opt| opt.text == self.answer),
        }
    }
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// A named group of question pairs, kept in authoring order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    name: String,
    unit: String,
    pairs: Vec<QuestionPair>,
}

impl Lesson {
    #[must_use]
    pub fn new(name: impl Into<String>, unit: impl Into<String>, pairs: Vec<QuestionPair>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            pairs,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn pairs(&self) -> &[QuestionPair] {
        &self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_options() -> Vec<AnswerOption> {
        AnswerOption::from_texts(["Chennai", "Madurai", "Salem", "Erode"])
    }

    #[test]
    fn correct_option_must_be_supplied() {
        let options = AnswerOption::from_texts(["yes", "no"]);
        let err = QuestionPair::new("Q", "yes", options, Some(OptionLabel::C)).unwrap_err();
        assert_eq!(err, QuestionError::CorrectOptionMissing(OptionLabel::C));
    }

    #[test]
    fn mislabeled_options_are_rejected() {
        let options = vec![AnswerOption::new(OptionLabel::B, "x")];
        let err = QuestionPair::new("Q", "x", options, None).unwrap_err();
        assert_eq!(err, QuestionError::MislabeledOptions);
    }

    #[test]
    fn declared_option_decides_correctness() {
        let pair = QuestionPair::new("Capital?", "Chennai", four_options(), Some(OptionLabel::B))
            .unwrap();
        assert!(pair.is_correct(OptionLabel::B));
        assert!(!pair.is_correct(OptionLabel::A));
    }

    #[test]
    fn missing_correct_option_falls_back_to_exact_text() {
        let pair = QuestionPair::new("Capital?", "Chennai", four_options(), None).unwrap();
        assert!(pair.is_correct(OptionLabel::A));
        assert!(!pair.is_correct(OptionLabel::B));

        let sloppy = QuestionPair::new("Capital?", "chennai ", four_options(), None).unwrap();
        assert!(!sloppy.is_correct(OptionLabel::A));
    }

    #[test]
    fn pair_without_options_is_not_answerable() {
        let pair = QuestionPair::new("Q", "A", Vec::new(), None).unwrap();
        assert!(!pair.is_answerable());
        assert!(!pair.is_correct(OptionLabel::A));
    }
}
