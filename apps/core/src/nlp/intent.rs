//! Intent scoring over canonical example phrases.
//!
//! Each intent is defined by a handful of example utterances. A message is
//! scored against the vocabulary of every intent by term overlap, with rarer
//! terms (those appearing in fewer intents) weighted higher. The behavior is
//! fully determined by [`INTENT_EXAMPLES`]; retuning the assistant means
//! editing that table, not this code.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::tokenize::tokenize;

/// The set of intents the assistant distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    LoanInquiry,
    ApplicationHelp,
    EligibilityCheck,
    DocumentQuery,
    InterestQuery,
    RepaymentQuery,
    StatusCheck,
    Complaint,
    Farewell,
    /// Sentinel for messages no example vocabulary overlaps with.
    GeneralInquiry,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::LoanInquiry => "loan_inquiry",
            Intent::ApplicationHelp => "application_help",
            Intent::EligibilityCheck => "eligibility_check",
            Intent::DocumentQuery => "document_query",
            Intent::InterestQuery => "interest_query",
            Intent::RepaymentQuery => "repayment_query",
            Intent::StatusCheck => "status_check",
            Intent::Complaint => "complaint",
            Intent::Farewell => "farewell",
            Intent::GeneralInquiry => "general_inquiry",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical example phrases per intent. Declaration order doubles as the
/// tie-break order: on equal scores the earlier intent wins.
pub const INTENT_EXAMPLES: &[(Intent, &[&str])] = &[
    (
        Intent::Greeting,
        &[
            "hello",
            "hi there",
            "hey",
            "good morning",
            "good afternoon",
            "namaste",
        ],
    ),
    (
        Intent::LoanInquiry,
        &[
            "i want a loan",
            "i need a personal loan",
            "looking for a home loan",
            "tell me about your loan options",
            "do you offer business loans",
            "need money for an emergency",
        ],
    ),
    (
        Intent::ApplicationHelp,
        &[
            "how do i apply",
            "help me apply for a loan",
            "start my loan application",
            "i want to apply online",
            "submit my application form",
        ],
    ),
    (
        Intent::EligibilityCheck,
        &[
            "am i eligible for a loan",
            "check my eligibility",
            "what is the minimum salary required",
            "do i qualify for a personal loan",
            "eligibility criteria",
        ],
    ),
    (
        Intent::DocumentQuery,
        &[
            "what documents do i need",
            "which documents are required",
            "documents needed for the application",
            "do you need my pan card",
            "should i upload my bank statement",
        ],
    ),
    (
        Intent::InterestQuery,
        &[
            "what is the interest rate",
            "current interest rates",
            "how much interest do you charge",
            "processing fee and other charges",
            "is the rate fixed or floating",
        ],
    ),
    (
        Intent::RepaymentQuery,
        &[
            "how do i repay the loan",
            "what are my emi options",
            "monthly installment amount",
            "can i prepay my loan early",
            "foreclosure charges on prepayment",
        ],
    ),
    (
        Intent::StatusCheck,
        &[
            "track my loan application",
            "status of my application",
            "is my loan approved yet",
            "when will the amount be disbursed",
            "check application status",
        ],
    ),
    (
        Intent::Complaint,
        &[
            "i have a complaint",
            "this is not working at all",
            "i am very disappointed with the service",
            "nobody is responding to me",
            "worst experience ever",
        ],
    ),
    (
        Intent::Farewell,
        &[
            "bye",
            "goodbye",
            "thanks bye",
            "see you later",
            "that is all for now",
        ],
    ),
];

/// Per-intent raw overlap score, reported alongside the winner so callers
/// can see how close the runners-up were.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentScore {
    pub intent: Intent,
    pub score: f32,
}

/// Result of scoring one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentOutcome {
    pub intent: Intent,
    /// Best raw score normalized by the message's distinct token count,
    /// clamped to 1.0. Zero when nothing matched.
    pub confidence: f32,
    pub scores: Vec<IntentScore>,
}

/// Scores messages against intent example vocabularies.
pub struct IntentScorer {
    /// One (intent, vocabulary) entry per table row, in declaration order.
    vocabularies: Vec<(Intent, HashSet<String>)>,
    /// For each term, the number of intents whose vocabulary contains it.
    intent_frequency: HashMap<String, usize>,
}

impl IntentScorer {
    pub fn new() -> Self {
        Self::with_examples(INTENT_EXAMPLES)
    }

    /// Builds a scorer from an explicit example table.
    pub fn with_examples(examples: &[(Intent, &[&str])]) -> Self {
        let mut vocabularies = Vec::with_capacity(examples.len());
        let mut intent_frequency: HashMap<String, usize> = HashMap::new();
        for (intent, phrases) in examples {
            let mut vocabulary = HashSet::new();
            for phrase in *phrases {
                for token in tokenize(phrase) {
                    vocabulary.insert(token);
                }
            }
            for term in &vocabulary {
                *intent_frequency.entry(term.clone()).or_insert(0) += 1;
            }
            vocabularies.push((*intent, vocabulary));
        }
        Self {
            vocabularies,
            intent_frequency,
        }
    }

    /// Scores a message against every intent and picks the best.
    ///
    /// A term shared with an intent's vocabulary contributes `1 / f` where
    /// `f` is the number of intents knowing that term, so distinctive words
    /// ("emi", "documents") dominate filler ("i", "the"). Messages with no
    /// overlap anywhere fall back to [`Intent::GeneralInquiry`] at zero
    /// confidence.
    pub fn score(&self, message: &str) -> IntentOutcome {
        let tokens: HashSet<String> = tokenize(message).into_iter().collect();
        let mut scores = Vec::with_capacity(self.vocabularies.len());
        let mut best: Option<(Intent, f32)> = None;

        for (intent, vocabulary) in &self.vocabularies {
            let mut raw = 0.0f32;
            for token in &tokens {
                if vocabulary.contains(token) {
                    let frequency = self.intent_frequency.get(token).copied().unwrap_or(1);
                    raw += 1.0 / frequency as f32;
                }
            }
            scores.push(IntentScore {
                intent: *intent,
                score: raw,
            });
            // Strict comparison keeps the earlier intent on ties.
            let improved = match best {
                Some((_, best_raw)) => raw > best_raw,
                None => raw > 0.0,
            };
            if improved {
                best = Some((*intent, raw));
            }
        }

        match best {
            Some((intent, raw)) => IntentOutcome {
                intent,
                confidence: (raw / tokens.len().max(1) as f32).min(1.0),
                scores,
            },
            None => IntentOutcome {
                intent: Intent::GeneralInquiry,
                confidence: 0.0,
                scores,
            },
        }
    }
}

impl Default for IntentScorer {
    fn default() -> Self {
        Self::new()
    }
}
