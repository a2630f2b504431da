//! Two-tier response selection.
//!
//! Tier one walks an ordered rule table keyed on derived context signals
//! (question type, topic, journey stage, urgency, mood); the first matching
//! rule wins. Tier two scores the message against the pattern table with
//! weighted word overlap. When both tiers decline, the engine falls back to
//! [`super::responses::FALLBACK_RESPONSE`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::context::{ConversationContext, JourneyStage, QuestionType, UrgencyLevel, UserMood};
use super::lexicon::{contains_interrogative, keyword_weight};
use super::responses::{
    ResponsePattern, APPLICATION_NUDGE, APPLICATION_STEPS, COMPANY_OVERVIEW, DOCUMENTS_CHECKLIST,
    ELIGIBILITY_SUMMARY, EMPATHY_RESPONSE, ESCALATION_RESPONSE, RATES_SUMMARY, REPAYMENT_SUMMARY,
    RESPONSE_PATTERNS, STATUS_GUIDE,
};
use super::semantic::Category;
use super::tokenize::{normalize, tokenize};

/// Score added when the whole pattern appears verbatim in the message.
pub const EXACT_MATCH_WEIGHT: f32 = 3.0;
/// Discount applied to partial (substring-of-word) matches.
pub const PARTIAL_MATCH_FACTOR: f32 = 0.7;
/// Flat bonus when the message contains a question word.
pub const INTERROGATIVE_BONUS: f32 = 0.5;
/// Minimum score a pattern must reach to be returned.
pub const DEFAULT_PATTERN_THRESHOLD: f32 = 0.4;
/// Both sides of a partial match must be at least this long.
const PARTIAL_MIN_LEN: usize = 3;

/// One contextual-tier rule. `None` fields are wildcards; all present
/// fields must match for the rule to fire.
pub struct ContextRule {
    pub question: Option<QuestionType>,
    pub topic: Option<Category>,
    pub stage: Option<JourneyStage>,
    pub min_urgency: Option<UrgencyLevel>,
    pub mood: Option<UserMood>,
    pub response: &'static str,
}

impl ContextRule {
    fn matches(&self, context: &ConversationContext) -> bool {
        if let Some(question) = self.question {
            if context.question_type != question {
                return false;
            }
        }
        if let Some(topic) = self.topic {
            if context.conversation_topic != Some(topic) {
                return false;
            }
        }
        if let Some(stage) = self.stage {
            if context.journey_stage != stage {
                return false;
            }
        }
        if let Some(level) = self.min_urgency {
            if context.urgency.level < level {
                return false;
            }
        }
        if let Some(mood) = self.mood {
            if context.user_mood != mood {
                return false;
            }
        }
        true
    }
}

/// The contextual playbook, checked top to bottom. Urgent and unhappy
/// conversations are handled before informational ones.
pub const CONTEXT_RULES: &[ContextRule] = &[
    ContextRule {
        question: None,
        topic: Some(Category::TechnicalIssues),
        stage: None,
        min_urgency: Some(UrgencyLevel::High),
        mood: None,
        response: ESCALATION_RESPONSE,
    },
    ContextRule {
        question: None,
        topic: Some(Category::Support),
        stage: None,
        min_urgency: Some(UrgencyLevel::High),
        mood: None,
        response: ESCALATION_RESPONSE,
    },
    ContextRule {
        question: None,
        topic: Some(Category::Support),
        stage: None,
        min_urgency: None,
        mood: Some(UserMood::Negative),
        response: EMPATHY_RESPONSE,
    },
    ContextRule {
        question: None,
        topic: Some(Category::TechnicalIssues),
        stage: None,
        min_urgency: None,
        mood: Some(UserMood::Negative),
        response: EMPATHY_RESPONSE,
    },
    ContextRule {
        question: Some(QuestionType::What),
        topic: Some(Category::Documents),
        stage: None,
        min_urgency: None,
        mood: None,
        response: DOCUMENTS_CHECKLIST,
    },
    ContextRule {
        question: Some(QuestionType::Which),
        topic: Some(Category::Documents),
        stage: None,
        min_urgency: None,
        mood: None,
        response: DOCUMENTS_CHECKLIST,
    },
    ContextRule {
        question: Some(QuestionType::How),
        topic: Some(Category::ApplicationProcess),
        stage: None,
        min_urgency: None,
        mood: None,
        response: APPLICATION_STEPS,
    },
    ContextRule {
        question: Some(QuestionType::Where),
        topic: Some(Category::ApplicationProcess),
        stage: None,
        min_urgency: None,
        mood: None,
        response: APPLICATION_STEPS,
    },
    ContextRule {
        question: Some(QuestionType::What),
        topic: Some(Category::InterestCharges),
        stage: None,
        min_urgency: None,
        mood: None,
        response: RATES_SUMMARY,
    },
    ContextRule {
        question: Some(QuestionType::How),
        topic: Some(Category::InterestCharges),
        stage: None,
        min_urgency: None,
        mood: None,
        response: RATES_SUMMARY,
    },
    ContextRule {
        question: None,
        topic: Some(Category::Eligibility),
        stage: None,
        min_urgency: None,
        mood: None,
        response: ELIGIBILITY_SUMMARY,
    },
    ContextRule {
        question: None,
        topic: Some(Category::Status),
        stage: Some(JourneyStage::PostApplication),
        min_urgency: None,
        mood: None,
        response: STATUS_GUIDE,
    },
    ContextRule {
        question: Some(QuestionType::What),
        topic: Some(Category::Repayment),
        stage: None,
        min_urgency: None,
        mood: None,
        response: REPAYMENT_SUMMARY,
    },
    ContextRule {
        question: Some(QuestionType::How),
        topic: Some(Category::Repayment),
        stage: None,
        min_urgency: None,
        mood: None,
        response: REPAYMENT_SUMMARY,
    },
    ContextRule {
        question: Some(QuestionType::What),
        topic: Some(Category::CompanyInfo),
        stage: None,
        min_urgency: None,
        mood: None,
        response: COMPANY_OVERVIEW,
    },
    ContextRule {
        question: Some(QuestionType::Who),
        topic: Some(Category::CompanyInfo),
        stage: None,
        min_urgency: None,
        mood: None,
        response: COMPANY_OVERVIEW,
    },
    ContextRule {
        question: Some(QuestionType::Statement),
        topic: None,
        stage: Some(JourneyStage::Application),
        min_urgency: None,
        mood: None,
        response: APPLICATION_NUDGE,
    },
];

/// A scored pattern-tier result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern: String,
    pub response: String,
    /// Weighted total divided by the number of matched terms.
    pub score: f32,
    /// Score rescaled against the exact-match weight, capped at 1.0.
    pub confidence: f32,
}

struct PatternEntry {
    pattern: String,
    tokens: Vec<String>,
    response: String,
}

/// Selects responses: contextual rules first, scored patterns second.
pub struct ResponseSelector {
    patterns: Vec<PatternEntry>,
}

impl ResponseSelector {
    pub fn new() -> Self {
        Self::with_patterns(RESPONSE_PATTERNS)
    }

    pub fn with_patterns(patterns: &[ResponsePattern]) -> Self {
        let patterns = patterns
            .iter()
            .map(|entry| PatternEntry {
                pattern: entry.pattern.to_string(),
                tokens: tokenize(entry.pattern),
                response: entry.response.to_string(),
            })
            .collect();
        Self { patterns }
    }

    /// First matching contextual rule, if any.
    pub fn contextual_response(&self, context: &ConversationContext) -> Option<&'static str> {
        CONTEXT_RULES
            .iter()
            .find(|rule| rule.matches(context))
            .map(|rule| rule.response)
    }

    /// Scores every pattern against the message and returns the best one
    /// iff it clears the threshold. On equal scores the earlier pattern
    /// wins.
    pub fn select_best(&self, message: &str, threshold: f32) -> Option<PatternMatch> {
        let normalized = normalize(message);
        let message_tokens = tokenize(message);
        let interrogative = contains_interrogative(&message_tokens);
        let mut best: Option<PatternMatch> = None;

        for entry in &self.patterns {
            let (raw, matched) = score_pattern(&normalized, &message_tokens, entry);
            if matched == 0 {
                continue;
            }
            let mut total = raw;
            if interrogative {
                total += INTERROGATIVE_BONUS;
            }
            let score = total / matched as f32;
            let improved = match &best {
                Some(current) => score > current.score,
                None => true,
            };
            if improved {
                best = Some(PatternMatch {
                    pattern: entry.pattern.clone(),
                    response: entry.response.clone(),
                    score,
                    confidence: (score / EXACT_MATCH_WEIGHT).min(1.0),
                });
            }
        }

        match best {
            Some(found) if found.score >= threshold => {
                debug!(
                    pattern = %found.pattern,
                    score = found.score,
                    "pattern tier selected a response"
                );
                Some(found)
            }
            _ => None,
        }
    }
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Weighted overlap of one pattern with the message: the verbatim pattern
/// substring counts [`EXACT_MATCH_WEIGHT`] as one match, full shared words
/// count their lexicon weight, partial word overlaps count at
/// [`PARTIAL_MATCH_FACTOR`].
fn score_pattern(
    normalized_message: &str,
    message_tokens: &[String],
    entry: &PatternEntry,
) -> (f32, usize) {
    let mut total = 0.0f32;
    let mut matched = 0usize;
    if normalized_message.contains(&entry.pattern) {
        total += EXACT_MATCH_WEIGHT;
        matched += 1;
    }
    for word in &entry.tokens {
        if message_tokens.iter().any(|token| token == word) {
            total += keyword_weight(word);
            matched += 1;
        } else if message_tokens.iter().any(|token| partial_match(token, word)) {
            total += keyword_weight(word) * PARTIAL_MATCH_FACTOR;
            matched += 1;
        }
    }
    (total, matched)
}

fn partial_match(message_token: &str, pattern_word: &str) -> bool {
    message_token.len() >= PARTIAL_MIN_LEN
        && pattern_word.len() >= PARTIAL_MIN_LEN
        && (message_token.contains(pattern_word) || pattern_word.contains(message_token))
}
