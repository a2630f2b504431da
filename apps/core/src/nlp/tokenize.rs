//! Text normalization helpers shared by every analysis stage.
//!
//! All classifiers in this module work on the same view of the input:
//! lowercased text, whitespace-split tokens with edge punctuation trimmed.
//! Keeping that in one place guarantees the intent scorer, the sentiment
//! scorer and the keyword extractor never disagree about token boundaries.

/// Lowercases text for case-insensitive substring matching.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Splits text into lowercase tokens, trimming punctuation from both ends.
///
/// Interior punctuation is kept ("50,000" stays one token) so amount and
/// date candidates survive tokenization intact.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(|word| word.to_string())
        .collect()
}

/// Splits text into sentences on terminal punctuation, dropping blanks.
pub fn sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_trims_punctuation() {
        let tokens = tokenize("What documents do I need?");
        assert_eq!(tokens, vec!["what", "documents", "do", "i", "need"]);
    }

    #[test]
    fn test_tokenize_keeps_interior_punctuation() {
        let tokens = tokenize("I need Rs.50,000 by 12/05/2026.");
        assert!(tokens.contains(&"rs.50,000".to_string()));
        assert!(tokens.contains(&"12/05/2026".to_string()));
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   !!!   ").is_empty());
    }

    #[test]
    fn test_sentences_split_on_terminators() {
        let split = sentences("Hello there. How are you? I need a loan!");
        assert_eq!(split.len(), 3);
        assert_eq!(split[0], "Hello there");
    }

    #[test]
    fn test_sentences_empty_input() {
        assert!(sentences("").is_empty());
        assert!(sentences(" . . ").is_empty());
    }

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize("PAN Card"), "pan card");
    }
}
