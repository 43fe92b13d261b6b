//! Reads a JSON question bank and flattens it into study items.
//!
//! Expected shape:
//!
//! ```json
//! [
//!   {
//!     "lesson_name": "Sample Lesson",
//!     "unit": "Unit I",
//!     "pairs": [
//!       {
//!         "question": "Sample question?",
//!         "answer": "Sample answer",
//!         "options": [{"A": "Option A"}, {"B": "Option B"}],
//!         "correct_option": "A",
//!         "explanation": "optional",
//!         "syllabus_area": "optional"
//!       }
//!     ]
//!   }
//! ]
//! ```

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Map, Value};
use thiserror::Error;

use study_core::model::{AnswerOption, Flashcard, Lesson, OptionLabel, QuestionPair};

use crate::error::BankError;

//
// ─── WARNINGS ──────────────────────────────────────────────────────────────────
//

/// What was wrong with a single pair while loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PairDefect {
    #[error("pair is not an object")]
    NotAnObject,
    #[error("pair needs both a question and an answer")]
    MissingText,
    #[error("options must be a list")]
    OptionsNotAList,
    #[error("option {0} has no text")]
    BadOption(usize),
    #[error(transparent)]
    Model(#[from] study_core::Error),
}

/// Recoverable problems found while loading. The bank is still usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The bank holds no pairs at all; sessions will start out empty.
    EmptyBank,
    /// A lesson had no `pairs` list and was treated as empty.
    MissingPairs { lesson: String },
    /// A pair was skipped; loading carried on with the rest.
    SkippedPair {
        lesson: String,
        index: usize,
        defect: PairDefect,
    },
    /// The pair's options were unusable. It stays in the bank without
    /// options, so it becomes a flashcard but is never quizzed.
    FlashcardOnly {
        lesson: String,
        index: usize,
        defect: PairDefect,
    },
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// Loaded lessons in presentation order. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionBank {
    lessons: Vec<Lesson>,
}

/// A bank together with the warnings raised while loading it.
#[derive(Debug, Clone)]
pub struct LoadedBank {
    pub bank: QuestionBank,
    pub warnings: Vec<LoadWarning>,
}

impl QuestionBank {
    /// Keeps lessons in the given order.
    #[must_use]
    pub fn from_lessons(lessons: Vec<Lesson>) -> Self {
        Self { lessons }
    }

    /// Parses a JSON bank and shuffles lesson order once with `rng`.
    ///
    /// Pair order inside each lesson is preserved. Malformed pairs and lessons
    /// without pairs are reported as warnings rather than errors.
    ///
    /// # Errors
    ///
    /// Returns `BankError::InvalidJson` if the input is not JSON and
    /// `BankError::Malformed` if it is not a list of lesson objects.
    pub fn load<R: Rng + ?Sized>(input: &str, rng: &mut R) -> Result<LoadedBank, BankError> {
        let root: Value = serde_json::from_str(input)?;
        let Value::Array(raw_lessons) = root else {
            return Err(BankError::Malformed(
                "top level must be a list of lessons".into(),
            ));
        };

        let mut warnings = Vec::new();
        let mut lessons = Vec::with_capacity(raw_lessons.len());
        for (position, raw) in raw_lessons.iter().enumerate() {
            let Value::Object(fields) = raw else {
                return Err(BankError::Malformed(format!(
                    "lesson {position} is not an object"
                )));
            };
            lessons.push(parse_lesson(fields, &mut warnings));
        }

        lessons.shuffle(rng);
        let bank = Self { lessons };

        if bank.item_count() == 0 {
            tracing::warn!("question bank has no pairs");
            warnings.push(LoadWarning::EmptyBank);
        }
        tracing::info!(
            lessons = bank.lessons.len(),
            items = bank.item_count(),
            warnings = warnings.len(),
            "question bank loaded"
        );

        Ok(LoadedBank { bank, warnings })
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// All pairs, lesson by lesson, in presentation order.
    pub fn items(&self) -> impl Iterator<Item = &QuestionPair> + '_ {
        self.lessons.iter().flat_map(|lesson| lesson.pairs().iter())
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.lessons.iter().map(|lesson| lesson.pairs().len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// One fresh card per pair, including pairs that cannot be quizzed.
    #[must_use]
    pub fn flashcards(&self, created_at: DateTime<Utc>) -> Vec<Flashcard> {
        self.items()
            .map(|pair| Flashcard::from_pair(pair, created_at))
            .collect()
    }
}

//
// ─── PARSING ───────────────────────────────────────────────────────────────────
//

fn text_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

fn parse_lesson(fields: &Map<String, Value>, warnings: &mut Vec<LoadWarning>) -> Lesson {
    let name = text_field(fields, "lesson_name").unwrap_or_default().to_owned();
    let unit = text_field(fields, "unit").unwrap_or_default().to_owned();

    let Some(raw_pairs) = fields.get("pairs").and_then(Value::as_array) else {
        tracing::warn!(lesson = %name, "lesson has no pairs list");
        warnings.push(LoadWarning::MissingPairs { lesson: name.clone() });
        return Lesson::new(name, unit, Vec::new());
    };

    let mut pairs = Vec::with_capacity(raw_pairs.len());
    for (index, raw) in raw_pairs.iter().enumerate() {
        match parse_pair(raw) {
            Ok((pair, None)) => pairs.push(pair),
            Ok((pair, Some(defect))) => {
                tracing::warn!(lesson = %name, index, %defect, "pair kept for flashcards only");
                warnings.push(LoadWarning::FlashcardOnly {
                    lesson: name.clone(),
                    index,
                    defect,
                });
                pairs.push(pair);
            }
            Err(defect) => {
                tracing::warn!(lesson = %name, index, %defect, "skipping malformed pair");
                warnings.push(LoadWarning::SkippedPair {
                    lesson: name.clone(),
                    index,
                    defect,
                });
            }
        }
    }

    Lesson::new(name, unit, pairs)
}

/// A pair needs a question and an answer to load at all. Defects in its
/// quiz fields only strip the options, reported alongside the pair.
fn parse_pair(raw: &Value) -> Result<(QuestionPair, Option<PairDefect>), PairDefect> {
    let Value::Object(fields) = raw else {
        return Err(PairDefect::NotAnObject);
    };
    let (Some(question), Some(answer)) = (text_field(fields, "question"), text_field(fields, "answer"))
    else {
        return Err(PairDefect::MissingText);
    };

    let quizzable = quiz_fields(fields).and_then(|(options, correct_option)| {
        QuestionPair::new(question, answer, options, correct_option)
            .map_err(|e| PairDefect::from(study_core::Error::from(e)))
    });
    let (mut pair, defect) = match quizzable {
        Ok(pair) => (pair, None),
        Err(defect) => {
            let pair = QuestionPair::new(question, answer, Vec::new(), None)
                .map_err(study_core::Error::from)?;
            (pair, Some(defect))
        }
    };
    if let Some(explanation) = text_field(fields, "explanation") {
        pair = pair.with_explanation(explanation);
    }
    if let Some(area) = text_field(fields, "syllabus_area") {
        pair = pair.with_syllabus_area(area);
    }
    if let Some(difficulty) = text_field(fields, "difficulty") {
        pair = pair.with_difficulty(difficulty);
    }
    Ok((pair, defect))
}

fn quiz_fields(
    fields: &Map<String, Value>,
) -> Result<(Vec<AnswerOption>, Option<OptionLabel>), PairDefect> {
    let options = match fields.get("options") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => parse_options(items)?,
        Some(_) => return Err(PairDefect::OptionsNotAList),
    };

    let correct_option = match text_field(fields, "correct_option") {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<OptionLabel>()
                .map_err(study_core::Error::from)?,
        ),
    };

    Ok((options, correct_option))
}

/// Maps options onto `A..=D` by position. Only the first four are read.
///
/// Each option is a one-entry object whose value is the text (the key is
/// ignored), an object with an explicit `text` field, or a bare string.
fn parse_options(items: &[Value]) -> Result<Vec<AnswerOption>, PairDefect> {
    let mut texts = Vec::with_capacity(items.len().min(OptionLabel::ALL.len()));
    for (index, item) in items.iter().take(OptionLabel::ALL.len()).enumerate() {
        let text = match item {
            Value::String(text) => Some(text.as_str()),
            Value::Object(entry) => match entry.get("text") {
                Some(text) => text.as_str(),
                None if entry.len() == 1 => entry.values().next().and_then(Value::as_str),
                None => None,
            },
            _ => None,
        };
        texts.push(text.ok_or(PairDefect::BadOption(index))?);
    }
    Ok(AnswerOption::from_texts(texts))
}
