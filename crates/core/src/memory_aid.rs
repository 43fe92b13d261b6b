//! Key-term hints shown when an answer is revealed.

/// Hint returned when the answer has no word longer than four characters.
pub const FALLBACK_AID: &str =
    "Try to create a mental image or association to remember this answer.";

const MIN_TERM_CHARS: usize = 5;
const MAX_TERMS: usize = 3;

/// Builds a short memory hint from the answer's first few long words.
///
/// Words are split on whitespace and kept verbatim (punctuation included);
/// a word counts when it has more than four characters. The question is
/// accepted for symmetry with callers but does not influence the hint.
#[must_use]
pub fn memory_aid(_question: &str, answer: &str) -> String {
    let terms: Vec<&str> = answer
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_TERM_CHARS)
        .take(MAX_TERMS)
        .collect();

    if terms.is_empty() {
        return FALLBACK_AID.to_owned();
    }
    format!("Remember these key terms: {}", terms.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_words_fall_back() {
        assert_eq!(memory_aid("q", "cat dog"), FALLBACK_AID);
        assert_eq!(memory_aid("q", ""), FALLBACK_AID);
    }

    #[test]
    fn takes_first_three_long_words_in_order() {
        assert_eq!(
            memory_aid("q", "elephant banana carrot dinosaur"),
            "Remember these key terms: elephant, banana, carrot"
        );
    }

    #[test]
    fn four_letter_words_are_skipped() {
        assert_eq!(
            memory_aid("q", "tree apple four seven"),
            "Remember these key terms: apple, seven"
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Five code points, kept. Three code points in nine bytes, skipped.
        assert_eq!(memory_aid("q", "தமிழ்"), "Remember these key terms: தமிழ்");
        assert_eq!(memory_aid("q", "ஆறு"), FALLBACK_AID);
    }

    #[test]
    fn same_input_same_hint() {
        let a = memory_aid("Who?", "Rajaraja Chola built Brihadeeswarar");
        let b = memory_aid("Who?", "Rajaraja Chola built Brihadeeswarar");
        assert_eq!(a, b);
        assert_eq!(a, "Remember these key terms: Rajaraja, Chola, built");
    }
}
