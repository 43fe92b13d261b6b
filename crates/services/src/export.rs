//! Flashcard progress snapshots: pretty JSON, one object per card.
//!
//! Timestamps are UTC wall-clock time with no offset suffix, so a snapshot
//! reads the same wherever it is written or resumed.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use study_core::model::{Flashcard, MasteryLevel};

use crate::error::ExportError;
use crate::sessions::FlashcardSession;

const REVIEWED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DUE_FORMAT: &str = "%Y-%m-%d";

/// Serialized shape of one card in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardRecord {
    pub front: String,
    pub back: String,
    pub mastery_level: u8,
    /// UTC, `YYYY-MM-DD HH:MM:SS`.
    pub last_reviewed: Option<String>,
    pub due_date: String,
}

impl FlashcardRecord {
    #[must_use]
    pub fn from_card(card: &Flashcard) -> Self {
        Self {
            front: card.front().to_owned(),
            back: card.back().to_owned(),
            mastery_level: card.mastery_level().value(),
            last_reviewed: card
                .last_reviewed()
                .map(|at| at.format(REVIEWED_FORMAT).to_string()),
            due_date: card.due_date().format(DUE_FORMAT).to_string(),
        }
    }

    /// # Errors
    ///
    /// Returns `ExportError` if the level or either date cannot be parsed.
    pub fn into_card(self) -> Result<Flashcard, ExportError> {
        let mastery_level = MasteryLevel::new(self.mastery_level)?;
        let last_reviewed = match self.last_reviewed {
            None => None,
            Some(raw) => Some(
                NaiveDateTime::parse_from_str(&raw, REVIEWED_FORMAT)
                    .map_err(|_| ExportError::InvalidTimestamp { raw: raw.clone() })?
                    .and_utc(),
            ),
        };
        let due_date = NaiveDate::parse_from_str(&self.due_date, DUE_FORMAT).map_err(|_| {
            ExportError::InvalidDueDate {
                raw: self.due_date.clone(),
            }
        })?;

        Ok(Flashcard::from_persisted(
            self.front,
            self.back,
            mastery_level,
            last_reviewed,
            due_date,
        ))
    }
}

/// Render every card of the session, in deck order, as indented JSON.
///
/// Reads only; the session is left as it was. Non-ASCII text is written as-is.
///
/// # Errors
///
/// Returns `ExportError::Json` if serialization fails.
pub fn export_flashcards(session: &FlashcardSession) -> Result<String, ExportError> {
    let records: Vec<FlashcardRecord> = session
        .cards()
        .iter()
        .map(FlashcardRecord::from_card)
        .collect();
    let json = serde_json::to_string_pretty(&records)?;
    tracing::debug!(cards = records.len(), "flashcards exported");
    Ok(json)
}

/// Resume a deck from a snapshot written by [`export_flashcards`].
///
/// The mastery histogram is rebuilt from each card's stored level.
///
/// # Errors
///
/// Returns `ExportError` for invalid JSON or card fields.
pub fn import_flashcards(json: &str) -> Result<FlashcardSession, ExportError> {
    let records: Vec<FlashcardRecord> = serde_json::from_str(json)?;
    let cards = records
        .into_iter()
        .map(FlashcardRecord::into_card)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FlashcardSession::new(cards))
}
