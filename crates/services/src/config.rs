use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

const DEFAULT_QUESTION_COUNT: u32 = 10;
const MIN_SECONDS_PER_QUESTION: u32 = 10;
const MAX_SECONDS_PER_QUESTION: u32 = 120;
pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 30;

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty filter applied when selecting quiz items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    All,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Whether a pair tagged with `tag` passes this filter.
    ///
    /// `All` accepts everything; the other levels need a matching tag
    /// (case-insensitive), so untagged pairs only show up under `All`.
    #[must_use]
    pub fn accepts(self, tag: Option<&str>) -> bool {
        match self {
            Self::All => true,
            level => tag.is_some_and(|t| t.trim().eq_ignore_ascii_case(level.as_str())),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ConfigError::UnknownDifficulty { raw: s.to_owned() }),
        }
    }
}

//
// ─── STUDY CONFIG ──────────────────────────────────────────────────────────────
//

/// Knobs supplied by the front end when a study session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyConfig {
    question_count: Option<u32>,
    seconds_per_question: Option<u32>,
    difficulty: Difficulty,
    syllabus_area: Option<String>,
    seed: Option<u64>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            question_count: Some(DEFAULT_QUESTION_COUNT),
            seconds_per_question: None,
            difficulty: Difficulty::All,
            syllabus_area: None,
            seed: None,
        }
    }
}

impl StudyConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested quiz length. `None` or `Some(0)` means the whole bank.
    #[must_use]
    pub fn with_question_count(mut self, count: Option<u32>) -> Self {
        self.question_count = count;
        self
    }

    /// Enables timed mode. The limit is advisory; the engine never skips on its own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSecondsPerQuestion` outside 10..=120 seconds.
    pub fn with_timer(mut self, seconds: Option<u32>) -> Result<Self, ConfigError> {
        if let Some(secs) = seconds {
            if !(MIN_SECONDS_PER_QUESTION..=MAX_SECONDS_PER_QUESTION).contains(&secs) {
                return Err(ConfigError::InvalidSecondsPerQuestion(secs));
            }
        }
        self.seconds_per_question = seconds;
        Ok(self)
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_syllabus_area(mut self, area: Option<String>) -> Self {
        self.syllabus_area = area.filter(|a| !a.trim().is_empty());
        self
    }

    /// Seed for the lesson shuffle, for reproducible runs.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn question_count(&self) -> Option<u32> {
        self.question_count
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> Option<u32> {
        self.seconds_per_question
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn syllabus_area(&self) -> Option<&str> {
        self.syllabus_area.as_deref()
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_menu_defaults() {
        let config = StudyConfig::default();
        assert_eq!(config.question_count(), Some(10));
        assert_eq!(config.seconds_per_question(), None);
        assert_eq!(config.difficulty(), Difficulty::All);
    }

    #[test]
    fn timer_bounds_are_checked() {
        assert!(StudyConfig::new().with_timer(Some(10)).is_ok());
        assert!(StudyConfig::new().with_timer(Some(120)).is_ok());
        assert_eq!(
            StudyConfig::new().with_timer(Some(5)).unwrap_err(),
            ConfigError::InvalidSecondsPerQuestion(5)
        );
        assert!(StudyConfig::new().with_timer(None).is_ok());
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("brutal".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_filter_needs_tag_unless_all() {
        assert!(Difficulty::All.accepts(None));
        assert!(Difficulty::Easy.accepts(Some("EASY")));
        assert!(!Difficulty::Easy.accepts(Some("hard")));
        assert!(!Difficulty::Medium.accepts(None));
    }

    #[test]
    fn blank_area_is_ignored() {
        let config = StudyConfig::new().with_syllabus_area(Some("  ".into()));
        assert_eq!(config.syllabus_area(), None);
    }
}
