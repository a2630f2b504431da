//! Word-list sentiment scoring.
//!
//! Counts positive and negative lexicon words among the message tokens and
//! reports the balance as `(p - n) / (p + n)`, so the score always lands in
//! [-1.0, 1.0] and a message with no sentiment words scores exactly zero.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::tokenize::tokenize;

const POSITIVE_WORDS: &[&str] = &[
    "thank",
    "thanks",
    "great",
    "good",
    "helpful",
    "awesome",
    "excellent",
    "perfect",
    "nice",
    "appreciate",
    "happy",
    "love",
    "wonderful",
    "amazing",
    "best",
    "super",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "useless",
    "worst",
    "horrible",
    "disappointed",
    "angry",
    "frustrated",
    "annoyed",
    "problem",
    "waste",
    "slow",
    "pathetic",
    "hate",
    "poor",
    "broken",
];

/// Sentiment balance of one message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub positive_hits: usize,
    pub negative_hits: usize,
    /// `(p - n) / (p + n)`, zero when no lexicon word was found.
    pub score: f32,
}

impl SentimentScore {
    pub fn neutral() -> Self {
        Self {
            positive_hits: 0,
            negative_hits: 0,
            score: 0.0,
        }
    }
}

/// Scores messages against fixed positive and negative word lists.
pub struct SentimentScorer {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self::with_lexicon(POSITIVE_WORDS, NEGATIVE_WORDS)
    }

    pub fn with_lexicon(positive: &[&str], negative: &[&str]) -> Self {
        Self {
            positive: positive.iter().map(|w| w.to_string()).collect(),
            negative: negative.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Counts distinct lexicon tokens in the message and computes the ratio.
    pub fn score(&self, message: &str) -> SentimentScore {
        let tokens: HashSet<String> = tokenize(message).into_iter().collect();
        let positive_hits = tokens.iter().filter(|t| self.positive.contains(*t)).count();
        let negative_hits = tokens.iter().filter(|t| self.negative.contains(*t)).count();
        let total = positive_hits + negative_hits;
        let score = if total == 0 {
            0.0
        } else {
            (positive_hits as f32 - negative_hits as f32) / total as f32
        };
        SentimentScore {
            positive_hits,
            negative_hits,
            score,
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}
