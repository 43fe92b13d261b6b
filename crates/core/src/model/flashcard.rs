use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::bank::QuestionPair;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MasteryError {
    #[error("mastery level must be between 0 and 5, got {0}")]
    OutOfRange(u8),
}

//
// ─── MASTERY LEVEL ─────────────────────────────────────────────────────────────
//

/// Self-rated recall strength of a card: 0 = unknown, 5 = mastered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MasteryLevel(u8);

impl MasteryLevel {
    pub const MAX: u8 = 5;
    pub const UNKNOWN: MasteryLevel = MasteryLevel(0);
    pub const MASTERED: MasteryLevel = MasteryLevel(Self::MAX);

    /// # Errors
    ///
    /// Returns `MasteryError::OutOfRange` for values above 5.
    pub fn new(value: u8) -> Result<Self, MasteryError> {
        if value > Self::MAX {
            return Err(MasteryError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// All levels from 0 to 5.
    pub fn all() -> impl Iterator<Item = MasteryLevel> {
        (0..=Self::MAX).map(MasteryLevel)
    }

    /// Short description shown next to the rating buttons.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "Don't Know",
            1 => "Recognize",
            2 => "Recall with Help",
            3 => "Recall",
            4 => "Understand",
            _ => "Mastered",
        }
    }

    fn slot(self) -> usize {
        usize::from(self.0)
    }
}

impl TryFrom<u8> for MasteryLevel {
    type Error = MasteryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MasteryLevel> for u8 {
    fn from(level: MasteryLevel) -> Self {
        level.0
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── HISTOGRAM ─────────────────────────────────────────────────────────────────
//

/// Number of cards at each mastery level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MasteryHistogram {
    counts: [u32; 6],
}

impl MasteryHistogram {
    /// Counts the current level of every card.
    #[must_use]
    pub fn from_cards(cards: &[Flashcard]) -> Self {
        let mut histogram = Self::default();
        for card in cards {
            let slot = &mut histogram.counts[card.mastery_level.slot()];
            *slot = slot.saturating_add(1);
        }
        histogram
    }

    #[must_use]
    pub fn count(&self, level: MasteryLevel) -> u32 {
        self.counts[level.slot()]
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Moves one card from `old` to `new`. The old bucket never goes below zero.
    pub fn record_change(&mut self, old: MasteryLevel, new: MasteryLevel) {
        let old_slot = &mut self.counts[old.slot()];
        *old_slot = old_slot.saturating_sub(1);
        let new_slot = &mut self.counts[new.slot()];
        *new_slot = new_slot.saturating_add(1);
    }

    pub fn iter(&self) -> impl Iterator<Item = (MasteryLevel, u32)> + '_ {
        MasteryLevel::all().map(|level| (level, self.count(level)))
    }
}

//
// ─── FLASHCARD ─────────────────────────────────────────────────────────────────
//

/// A study card derived from one question pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    front: String,
    back: String,
    mastery_level: MasteryLevel,
    last_reviewed: Option<DateTime<Utc>>,
    due_date: NaiveDate,
}

impl Flashcard {
    /// Fresh card at level 0, due on the day it was created.
    #[must_use]
    pub fn from_pair(pair: &QuestionPair, created_at: DateTime<Utc>) -> Self {
        Self {
            front: pair.question().to_owned(),
            back: pair.answer().to_owned(),
            mastery_level: MasteryLevel::UNKNOWN,
            last_reviewed: None,
            due_date: created_at.date_naive(),
        }
    }

    /// Rehydrate a card from an exported snapshot.
    #[must_use]
    pub fn from_persisted(
        front: String,
        back: String,
        mastery_level: MasteryLevel,
        last_reviewed: Option<DateTime<Utc>>,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            front,
            back,
            mastery_level,
            last_reviewed,
            due_date,
        }
    }

    #[must_use]
    pub fn front(&self) -> &str {
        &self.front
    }

    #[must_use]
    pub fn back(&self) -> &str {
        &self.back
    }

    #[must_use]
    pub fn mastery_level(&self) -> MasteryLevel {
        self.mastery_level
    }

    #[must_use]
    pub fn last_reviewed(&self) -> Option<DateTime<Utc>> {
        self.last_reviewed
    }

    #[must_use]
    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Stores a new rating and returns the level it replaced.
    ///
    /// Callers holding a `MasteryHistogram` must feed the returned level into
    /// `record_change` in the same step.
    pub fn rate(&mut self, level: MasteryLevel, reviewed_at: DateTime<Utc>) -> MasteryLevel {
        let old = self.mastery_level;
        self.mastery_level = level;
        self.last_reviewed = Some(reviewed_at);
        old
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::option::AnswerOption;
    use crate::time::fixed_now;

    fn card(front: &str) -> Flashcard {
        let pair = QuestionPair::new(front, "back", AnswerOption::from_texts(["back"]), None)
            .unwrap();
        Flashcard::from_pair(&pair, fixed_now())
    }

    #[test]
    fn level_rejects_values_above_five() {
        assert!(MasteryLevel::new(5).is_ok());
        assert_eq!(MasteryLevel::new(6).unwrap_err(), MasteryError::OutOfRange(6));
    }

    #[test]
    fn new_card_starts_unknown_and_due_today() {
        let c = card("front");
        assert_eq!(c.mastery_level(), MasteryLevel::UNKNOWN);
        assert_eq!(c.last_reviewed(), None);
        assert_eq!(c.due_date(), fixed_now().date_naive());
    }

    #[test]
    fn histogram_tracks_rating_changes() {
        let mut cards = vec![card("a"), card("b"), card("c")];
        let mut histogram = MasteryHistogram::from_cards(&cards);
        assert_eq!(histogram.count(MasteryLevel::UNKNOWN), 3);

        let four = MasteryLevel::new(4).unwrap();
        let old = cards[0].rate(four, fixed_now());
        histogram.record_change(old, four);

        assert_eq!(histogram.count(MasteryLevel::UNKNOWN), 2);
        assert_eq!(histogram.count(four), 1);
        assert_eq!(histogram.total(), 3);
        assert_eq!(cards[0].last_reviewed(), Some(fixed_now()));
    }

    #[test]
    fn histogram_old_bucket_floors_at_zero() {
        let mut histogram = MasteryHistogram::default();
        histogram.record_change(MasteryLevel::MASTERED, MasteryLevel::UNKNOWN);
        assert_eq!(histogram.count(MasteryLevel::MASTERED), 0);
        assert_eq!(histogram.count(MasteryLevel::UNKNOWN), 1);
    }

    #[test]
    fn labels_cover_every_level() {
        let labels: Vec<_> = MasteryLevel::all().map(MasteryLevel::label).collect();
        assert_eq!(labels.first(), Some(&"Don't Know"));
        assert_eq!(labels.last(), Some(&"Mastered"));
        assert_eq!(labels.len(), 6);
    }
}
