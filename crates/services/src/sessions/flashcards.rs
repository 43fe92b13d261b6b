use chrono::{DateTime, Utc};
use std::fmt;

use study_core::memory_aid;
use study_core::model::{Flashcard, MasteryHistogram, MasteryLevel};

use super::progress::SessionProgress;
use crate::error::SessionError;

/// What the front end shows for the current card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView<'a> {
    pub front: &'a str,
    pub back: &'a str,
    pub is_flipped: bool,
    pub mastery_level: MasteryLevel,
    /// Present only while the card is flipped.
    pub memory_aid: Option<String>,
}

/// Linear walk over a deck with flip state and self-rated mastery.
///
/// Card order is fixed; rating never reorders the deck. The histogram is
/// updated in the same call as every rating so it always matches the cards.
pub struct FlashcardSession {
    cards: Vec<Flashcard>,
    current: usize,
    is_flipped: bool,
    histogram: MasteryHistogram,
}

impl FlashcardSession {
    #[must_use]
    pub fn new(cards: Vec<Flashcard>) -> Self {
        let histogram = MasteryHistogram::from_cards(&cards);
        tracing::info!(cards = cards.len(), "flashcard session started");
        Self {
            cards,
            current: 0,
            is_flipped: false,
            histogram,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    #[must_use]
    pub fn histogram(&self) -> &MasteryHistogram {
        &self.histogram
    }

    #[must_use]
    pub fn is_at_last(&self) -> bool {
        self.current + 1 >= self.cards.len()
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Flashcard> {
        self.cards.get(self.current)
    }

    #[must_use]
    pub fn current_view(&self) -> Option<CardView<'_>> {
        let card = self.current_card()?;
        Some(CardView {
            front: card.front(),
            back: card.back(),
            is_flipped: self.is_flipped,
            mastery_level: card.mastery_level(),
            memory_aid: self
                .is_flipped
                .then(|| memory_aid(card.front(), card.back())),
        })
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress::at(self.current, self.cards.len(), false)
    }

    /// Toggle between front and back. Returns the new flip state.
    pub fn flip(&mut self) -> bool {
        self.is_flipped = !self.is_flipped;
        self.is_flipped
    }

    /// Step back one card, stopping at the first. Always shows the front.
    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
        self.is_flipped = false;
    }

    /// Step forward one card, stopping at the last. Always shows the front.
    pub fn next(&mut self) {
        let last = self.cards.len().saturating_sub(1);
        self.current = (self.current + 1).min(last);
        self.is_flipped = false;
    }

    /// Rate the current card and move on unless it is the last one.
    ///
    /// # Errors
    ///
    /// - `Mastery` if `level` is above 5.
    /// - `NoCards` if the deck is empty.
    pub fn rate(&mut self, level: u8, now: DateTime<Utc>) -> Result<(), SessionError> {
        let level = MasteryLevel::new(level)?;
        let card = self
            .cards
            .get_mut(self.current)
            .ok_or(SessionError::NoCards)?;

        let old = card.rate(level, now);
        self.histogram.record_change(old, level);
        tracing::debug!(index = self.current, %old, new = %level, "card rated");

        if !self.is_at_last() {
            self.next();
        }
        Ok(())
    }
}

impl fmt::Debug for FlashcardSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlashcardSession")
            .field("cards_len", &self.cards.len())
            .field("current", &self.current)
            .field("is_flipped", &self.is_flipped)
            .field("histogram", &self.histogram)
            .finish()
    }
}
