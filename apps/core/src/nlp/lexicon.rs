//! Domain lexicon shared by the response selector and the context analyzer.
//!
//! The weight table ranks how much a word matters in a loan conversation:
//! domain terms score above the default, filler words well below it.
//! Pattern scoring multiplies matches by these weights, and any word at or
//! above the default counts as a content keyword of the message.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Weight applied to words absent from the table.
pub const DEFAULT_KEYWORD_WEIGHT: f32 = 1.0;

/// Domain terms and their importance weights. Anything not listed here
/// weighs [`DEFAULT_KEYWORD_WEIGHT`]; filler words are listed explicitly
/// with low weights so they barely move pattern scores.
pub const KEYWORD_WEIGHTS: &[(&str, f32)] = &[
    ("loan", 2.0),
    ("emi", 2.0),
    ("apply", 1.8),
    ("application", 1.8),
    ("interest", 1.8),
    ("documents", 1.8),
    ("eligibility", 1.8),
    ("repayment", 1.8),
    ("foreclosure", 1.8),
    ("cibil", 1.8),
    ("document", 1.6),
    ("eligible", 1.6),
    ("repay", 1.6),
    ("prepay", 1.6),
    ("prepayment", 1.6),
    ("installment", 1.6),
    ("disbursed", 1.6),
    ("disbursal", 1.6),
    ("complaint", 1.6),
    ("rate", 1.5),
    ("rates", 1.5),
    ("tenure", 1.5),
    ("status", 1.5),
    ("pan", 1.5),
    ("aadhaar", 1.5),
    ("kyc", 1.5),
    ("urgent", 1.5),
    ("approved", 1.5),
    ("rejected", 1.5),
    ("salary", 1.4),
    ("income", 1.4),
    ("credit", 1.4),
    ("track", 1.4),
    ("charges", 1.4),
    ("fee", 1.4),
    ("fees", 1.4),
    ("otp", 1.4),
    ("payment", 1.4),
    ("calculator", 1.4),
    ("amount", 1.3),
    ("money", 1.3),
    ("statement", 1.3),
    ("submit", 1.3),
    ("support", 1.3),
    ("branch", 1.3),
    ("login", 1.3),
    ("error", 1.3),
    ("insurance", 1.3),
    ("transfer", 1.3),
    ("bank", 1.2),
    ("personal", 1.2),
    ("home", 1.2),
    ("business", 1.2),
    ("education", 1.2),
    ("monthly", 1.2),
    ("mobile", 1.2),
    ("form", 1.2),
    ("process", 1.2),
    ("agent", 1.2),
    ("customer", 1.2),
    ("website", 1.2),
    ("account", 1.2),
    ("help", 1.2),
    // Filler words, kept low so shared stop words never decide a pattern.
    ("the", 0.1),
    ("a", 0.1),
    ("an", 0.1),
    ("i", 0.2),
    ("me", 0.2),
    ("my", 0.3),
    ("you", 0.3),
    ("your", 0.3),
    ("is", 0.2),
    ("are", 0.2),
    ("was", 0.2),
    ("be", 0.2),
    ("do", 0.2),
    ("does", 0.2),
    ("to", 0.2),
    ("of", 0.2),
    ("in", 0.3),
    ("on", 0.3),
    ("at", 0.3),
    ("for", 0.3),
    ("and", 0.2),
    ("or", 0.3),
    ("it", 0.3),
    ("this", 0.3),
    ("that", 0.3),
    ("with", 0.3),
    ("have", 0.3),
    ("need", 0.4),
    ("want", 0.4),
    ("get", 0.4),
    ("what", 0.4),
    ("how", 0.4),
    ("when", 0.4),
    ("which", 0.4),
    ("can", 0.4),
    ("will", 0.4),
];

/// Question words that mark a message as interrogative.
pub const INTERROGATIVE_WORDS: &[&str] = &[
    "what", "how", "when", "where", "why", "who", "which", "can", "could", "would", "should",
    "is", "are", "do", "does",
];

static WEIGHTS: LazyLock<HashMap<&'static str, f32>> =
    LazyLock::new(|| KEYWORD_WEIGHTS.iter().copied().collect());

/// Looks up the weight of a single lowercase word.
pub fn keyword_weight(word: &str) -> f32 {
    WEIGHTS.get(word).copied().unwrap_or(DEFAULT_KEYWORD_WEIGHT)
}

/// Whether the word is a content word (at or above default weight).
/// Filler words listed below the default are filtered out of keyword lists.
pub fn is_content_word(word: &str) -> bool {
    keyword_weight(word) >= DEFAULT_KEYWORD_WEIGHT
}

/// Whether any token is a question word.
pub fn contains_interrogative(tokens: &[String]) -> bool {
    tokens
        .iter()
        .any(|token| INTERROGATIVE_WORDS.contains(&token.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_word_weight() {
        assert_eq!(keyword_weight("loan"), 2.0);
        assert_eq!(keyword_weight("emi"), 2.0);
    }

    #[test]
    fn test_unknown_word_gets_default() {
        assert_eq!(keyword_weight("umbrella"), DEFAULT_KEYWORD_WEIGHT);
    }

    #[test]
    fn test_content_word_filter() {
        assert!(is_content_word("interest"));
        assert!(is_content_word("umbrella"));
        assert!(!is_content_word("the"));
        assert!(!is_content_word("what"));
    }

    #[test]
    fn test_interrogative_detection() {
        let tokens = vec!["what".to_string(), "now".to_string()];
        assert!(contains_interrogative(&tokens));
        let tokens = vec!["send".to_string(), "money".to_string()];
        assert!(!contains_interrogative(&tokens));
    }
}
