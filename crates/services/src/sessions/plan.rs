use study_core::model::QuestionPair;

use crate::config::{Difficulty, StudyConfig};

/// Selection result for a quiz build.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizPlan {
    pub items: Vec<QuestionPair>,
    /// Pairs skipped because they have no options to choose from.
    pub unanswerable: usize,
    /// Pairs skipped by the difficulty or syllabus-area filter.
    pub filtered_out: usize,
}

impl QuizPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Picks the quizzable pairs of a bank as a filtered copy.
///
/// The bank itself is never touched; the count limit is applied later by the
/// quiz session so the plan reflects everything that could be asked.
pub struct QuizPlanBuilder<'a> {
    difficulty: Difficulty,
    syllabus_area: Option<&'a str>,
}

impl<'a> QuizPlanBuilder<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            difficulty: Difficulty::All,
            syllabus_area: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &'a StudyConfig) -> Self {
        Self {
            difficulty: config.difficulty(),
            syllabus_area: config.syllabus_area(),
        }
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_syllabus_area(mut self, area: Option<&'a str>) -> Self {
        self.syllabus_area = area;
        self
    }

    /// Keeps bank order. Unanswerable pairs are dropped before filtering.
    pub fn build<'b>(self, pairs: impl IntoIterator<Item = &'b QuestionPair>) -> QuizPlan {
        let mut items = Vec::new();
        let mut unanswerable = 0;
        let mut filtered_out = 0;

        for pair in pairs {
            if !pair.is_answerable() {
                unanswerable += 1;
                continue;
            }
            let area_ok = self
                .syllabus_area
                .is_none_or(|area| pair.syllabus_area() == Some(area));
            if !area_ok || !self.difficulty.accepts(pair.difficulty()) {
                filtered_out += 1;
                continue;
            }
            items.push(pair.clone());
        }

        tracing::debug!(
            selected = items.len(),
            unanswerable,
            filtered_out,
            difficulty = %self.difficulty,
            "quiz plan built"
        );

        QuizPlan {
            items,
            unanswerable,
            filtered_out,
        }
    }
}

impl Default for QuizPlanBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}
