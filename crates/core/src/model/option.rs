use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionLabelError {
    #[error("unknown option label: {0:?}")]
    Unknown(String),
}

//
// ─── OPTION LABEL ──────────────────────────────────────────────────────────────
//

/// Fixed answer alphabet for multiple-choice questions.
///
/// Options are mapped onto this alphabet in input order, so a question never
/// shows more than four choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Label for the option at `index` in input order, if it fits the alphabet.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionLabel {
    type Err = OptionLabelError;

    /// Parses an exact label. Case and surrounding whitespace are significant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            other => Err(OptionLabelError::Unknown(other.to_owned())),
        }
    }
}

//
// ─── ANSWER OPTION ─────────────────────────────────────────────────────────────
//

/// One labeled choice of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub label: OptionLabel,
    pub text: String,
}

impl AnswerOption {
    #[must_use]
    pub fn new(label: OptionLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }

    /// Maps option texts onto the `A..=D` alphabet, dropping anything past the fourth.
    #[must_use]
    pub fn from_texts<I, S>(texts: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .zip(OptionLabel::ALL)
            .map(|(text, label)| Self::new(label, text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_strings() {
        for label in OptionLabel::ALL {
            assert_eq!(label.as_str().parse::<OptionLabel>().unwrap(), label);
        }
        assert!("a".parse::<OptionLabel>().is_err());
        assert!(" B".parse::<OptionLabel>().is_err());
        assert!("E".parse::<OptionLabel>().is_err());
    }

    #[test]
    fn from_texts_truncates_to_four() {
        let options = AnswerOption::from_texts(["one", "two", "three", "four", "five"]);
        assert_eq!(options.len(), 4);
        assert_eq!(options[3], AnswerOption::new(OptionLabel::D, "four"));
    }

    #[test]
    fn from_index_stops_at_alphabet_end() {
        assert_eq!(OptionLabel::from_index(2), Some(OptionLabel::C));
        assert_eq!(OptionLabel::from_index(4), None);
    }
}
