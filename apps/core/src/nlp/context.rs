//! Conversation context derivation.
//!
//! Re-runs the per-message classifiers over trailing history windows to
//! produce the signals the response selector keys on: mood, dominant topic,
//! journey stage, question type, urgency and complexity. Windows cover user
//! turns only; the assistant's own canned replies are full of domain words
//! and would drown the user's signal.
//!
//! `analyze` is a pure function of (message, history): identical inputs
//! produce an identical context, which the test suite asserts.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::entities::{EntityExtractor, EntitySet};
use super::intent::{Intent, IntentOutcome, IntentScorer};
use super::lexicon::is_content_word;
use super::semantic::{Category, CategoryMatcher, CATEGORY_TABLE};
use super::sentiment::{SentimentScore, SentimentScorer};
use super::tokenize::{normalize, sentences, tokenize};
use crate::models::{Message, MessageSender};

/// User turns considered for the mood average.
pub const MOOD_WINDOW: usize = 5;
/// User turns considered for the dominant conversation topic.
pub const TOPIC_WINDOW: usize = 5;
/// User turns considered for the journey stage.
pub const STAGE_WINDOW: usize = 3;
/// Earlier user turns whose intents are kept as the intent trail.
pub const INTENT_TRAIL: usize = 3;

const URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "urgently",
    "immediately",
    "asap",
    "emergency",
    "right now",
    "as soon as possible",
    "quickly",
    "today itself",
];

const FOLLOW_UP_CUES: &[&str] = &[
    "and",
    "also",
    "but",
    "ok",
    "okay",
    "yes",
    "no",
    "what about",
    "how about",
];

/// Where the user is in the loan journey, judged from recent phrasing.
/// Declaration order is the tie-break order.
const STAGE_KEYWORDS: &[(JourneyStage, &[&str])] = &[
    (
        JourneyStage::Awareness,
        &[
            "what is",
            "tell me about",
            "types of loans",
            "learn",
            "know more",
            "information",
        ],
    ),
    (
        JourneyStage::Interest,
        &[
            "interested",
            "details",
            "benefits",
            "features",
            "compare",
            "interest rate",
            "offers",
        ],
    ),
    (
        JourneyStage::Consideration,
        &[
            "eligibility",
            "eligible",
            "documents required",
            "emi",
            "how much",
            "can i get",
            "qualify",
            "calculator",
        ],
    ),
    (
        JourneyStage::Application,
        &[
            "apply",
            "application",
            "form",
            "submit",
            "upload",
            "register",
            "start",
        ],
    ),
    (
        JourneyStage::PostApplication,
        &[
            "status",
            "track",
            "approved",
            "disbursed",
            "pending",
            "sanctioned",
            "when will",
        ],
    ),
    (
        JourneyStage::Support,
        &[
            "help",
            "problem",
            "issue",
            "complaint",
            "not working",
            "support",
            "talk to",
        ],
    ),
];

/// First-word question classification, checked in declaration order.
const QUESTION_WORDS: &[(QuestionType, &str)] = &[
    (QuestionType::What, "what"),
    (QuestionType::How, "how"),
    (QuestionType::When, "when"),
    (QuestionType::Where, "where"),
    (QuestionType::Why, "why"),
    (QuestionType::Who, "who"),
    (QuestionType::Which, "which"),
    (QuestionType::Can, "can"),
    (QuestionType::Could, "could"),
    (QuestionType::Would, "would"),
    (QuestionType::Should, "should"),
    (QuestionType::Is, "is"),
    (QuestionType::Are, "are"),
    (QuestionType::Do, "do"),
    (QuestionType::Does, "does"),
];

static QUESTION_PATTERNS: LazyLock<Vec<(QuestionType, Regex)>> = LazyLock::new(|| {
    QUESTION_WORDS
        .iter()
        .map(|(question_type, word)| {
            let pattern =
                Regex::new(&format!(r"(?i)^\s*{}\b", word)).expect("Invalid question-word regex");
            (*question_type, pattern)
        })
        .collect()
});

/// One turn of a conversation as the analyzer sees it. Decoupled from the
/// persisted [`Message`] row so the NLP layer stays storage-free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub sender: MessageSender,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender: MessageSender::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            sender: MessageSender::Assistant,
            content: content.into(),
        }
    }
}

impl From<&Message> for ChatTurn {
    fn from(message: &Message) -> Self {
        Self {
            sender: message.sender,
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserMood {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyStage {
    Awareness,
    Interest,
    Consideration,
    Application,
    PostApplication,
    Support,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    What,
    How,
    When,
    Where,
    Why,
    Who,
    Which,
    Can,
    Could,
    Would,
    Should,
    Is,
    Are,
    Do,
    Does,
    Statement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
}

/// Urgency score in [0, 1] with its bucketed level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UrgencySignal {
    pub score: f32,
    pub level: UrgencyLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
}

/// Structural complexity of the current message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_words_per_sentence: f32,
    pub level: ComplexityLevel,
}

/// Everything derived from one message plus its recent history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub intent: IntentOutcome,
    pub entities: EntitySet,
    pub sentiment: SentimentScore,
    /// Content words of the current message, first-occurrence order.
    pub keywords: Vec<String>,
    /// Intents of up to the last three earlier user turns, oldest first.
    pub previous_intents: Vec<Intent>,
    pub is_follow_up: bool,
    pub user_mood: UserMood,
    /// Dominant semantic category over the topic window, if any matched.
    pub conversation_topic: Option<Category>,
    pub journey_stage: JourneyStage,
    pub question_type: QuestionType,
    pub urgency: UrgencySignal,
    pub complexity: ComplexityMetrics,
}

/// Derives a [`ConversationContext`] from a message and its history.
pub struct ContextAnalyzer {
    intent_scorer: IntentScorer,
    category_matcher: CategoryMatcher,
    sentiment_scorer: SentimentScorer,
    entity_extractor: EntityExtractor,
}

impl ContextAnalyzer {
    pub fn new() -> Self {
        Self {
            intent_scorer: IntentScorer::new(),
            category_matcher: CategoryMatcher::new(),
            sentiment_scorer: SentimentScorer::new(),
            entity_extractor: EntityExtractor::new(),
        }
    }

    /// Analyzes one message against its history. History is chronological,
    /// oldest first, and must not include the message being analyzed.
    pub fn analyze(&self, message: &str, history: &[ChatTurn]) -> ConversationContext {
        let prior_user_turns: Vec<&str> = history
            .iter()
            .filter(|turn| turn.sender == MessageSender::User)
            .map(|turn| turn.content.as_str())
            .collect();

        let sentiment = self.sentiment_scorer.score(message);

        // Windows run over user turns with the current message as the
        // most recent entry.
        let mut window: Vec<&str> = prior_user_turns.clone();
        window.push(message);

        let previous_intents = prior_user_turns
            .iter()
            .rev()
            .take(INTENT_TRAIL)
            .rev()
            .map(|text| self.intent_scorer.score(text).intent)
            .collect();

        ConversationContext {
            intent: self.intent_scorer.score(message),
            entities: self.entity_extractor.extract(message),
            keywords: content_keywords(message),
            previous_intents,
            is_follow_up: is_follow_up(message, !prior_user_turns.is_empty()),
            user_mood: self.user_mood(tail(&window, MOOD_WINDOW)),
            conversation_topic: self.conversation_topic(tail(&window, TOPIC_WINDOW)),
            journey_stage: journey_stage(tail(&window, STAGE_WINDOW)),
            question_type: question_type(message),
            urgency: urgency(message, sentiment.score),
            complexity: complexity(message),
            sentiment,
        }
    }

    /// Mean sentiment over the window: positive above +0.3, negative
    /// below -0.3, neutral in between.
    fn user_mood(&self, window: &[&str]) -> UserMood {
        if window.is_empty() {
            return UserMood::Neutral;
        }
        let total: f32 = window
            .iter()
            .map(|text| self.sentiment_scorer.score(text).score)
            .sum();
        let mean = total / window.len() as f32;
        if mean > 0.3 {
            UserMood::Positive
        } else if mean < -0.3 {
            UserMood::Negative
        } else {
            UserMood::Neutral
        }
    }

    /// Most frequent matched category in the window. Ties go to the earlier
    /// table entry, same as single-message matching.
    fn conversation_topic(&self, window: &[&str]) -> Option<Category> {
        let mut counts: Vec<(Category, usize)> = Vec::new();
        for text in window {
            if let Some(category) = self.category_matcher.match_category(text).category {
                match counts.iter_mut().find(|(c, _)| *c == category) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((category, 1)),
                }
            }
        }
        // Walk the table so equal counts resolve to the earlier category.
        let mut best: Option<(Category, usize)> = None;
        for (category, _) in CATEGORY_TABLE {
            if let Some((_, count)) = counts.iter().find(|(c, _)| c == category) {
                let improved = match best {
                    Some((_, best_count)) => *count > best_count,
                    None => true,
                };
                if improved {
                    best = Some((*category, *count));
                }
            }
        }
        best.map(|(category, _)| category)
    }
}

impl Default for ContextAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn tail<'a>(window: &'a [&'a str], len: usize) -> &'a [&'a str] {
    &window[window.len().saturating_sub(len)..]
}

/// Content words of the message in first-occurrence order, deduplicated.
pub fn content_keywords(message: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for token in tokenize(message) {
        if is_content_word(&token) && !keywords.contains(&token) {
            keywords.push(token);
        }
    }
    keywords
}

/// A short message or one opening with a continuation cue is treated as a
/// follow-up, provided the user has spoken before.
fn is_follow_up(message: &str, has_prior_user_turn: bool) -> bool {
    if !has_prior_user_turn {
        return false;
    }
    let token_count = tokenize(message).len();
    if token_count <= 3 {
        return true;
    }
    let normalized = normalize(message);
    let normalized = normalized.trim();
    FOLLOW_UP_CUES
        .iter()
        .any(|cue| normalized == *cue || normalized.starts_with(&format!("{} ", cue)))
}

/// Highest stage-keyword overlap across the window, ties by declaration
/// order, defaulting to awareness when nothing matches.
fn journey_stage(window: &[&str]) -> JourneyStage {
    let joined = normalize(&window.join("\n"));
    let mut best = JourneyStage::Awareness;
    let mut best_hits = 0usize;
    for (stage, keywords) in STAGE_KEYWORDS {
        let hits = keywords.iter().filter(|k| joined.contains(**k)).count();
        if hits > best_hits {
            best = *stage;
            best_hits = hits;
        }
    }
    best
}

/// Classifies by the first word of the message, else statement.
pub fn question_type(message: &str) -> QuestionType {
    for (question_type, pattern) in QUESTION_PATTERNS.iter() {
        if pattern.is_match(message) {
            return *question_type;
        }
    }
    QuestionType::Statement
}

/// Urgency from explicit keywords plus a negative-sentiment nudge.
pub fn urgency(message: &str, sentiment_score: f32) -> UrgencySignal {
    let normalized = normalize(message);
    let hits = URGENCY_KEYWORDS
        .iter()
        .filter(|k| normalized.contains(**k))
        .count();
    let mut score = hits as f32;
    if sentiment_score < -0.3 {
        score += 0.5;
    }
    let score = score.clamp(0.0, 1.0);
    let level = if score > 0.7 {
        UrgencyLevel::High
    } else if score > 0.3 {
        UrgencyLevel::Medium
    } else {
        UrgencyLevel::Low
    };
    UrgencySignal { score, level }
}

/// Word and sentence counts with the average-length bucket.
pub fn complexity(message: &str) -> ComplexityMetrics {
    let word_count = tokenize(message).len();
    let sentence_count = sentences(message).len().max(1);
    let avg_words_per_sentence = word_count as f32 / sentence_count as f32;
    let level = if avg_words_per_sentence > 15.0 {
        ComplexityLevel::High
    } else if avg_words_per_sentence > 10.0 {
        ComplexityLevel::Medium
    } else {
        ComplexityLevel::Low
    };
    ComplexityMetrics {
        word_count,
        sentence_count,
        avg_words_per_sentence,
        level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> ContextAnalyzer {
        ContextAnalyzer::new()
    }

    #[test]
    fn test_question_type_first_word() {
        assert_eq!(question_type("What documents do I need?"), QuestionType::What);
        assert_eq!(question_type("how do I apply"), QuestionType::How);
        assert_eq!(question_type("  can I prepay"), QuestionType::Can);
        assert_eq!(question_type("I want a loan"), QuestionType::Statement);
    }

    #[test]
    fn test_question_word_must_be_whole_word() {
        // "whatever" must not classify as a what-question.
        assert_eq!(question_type("whatever you say"), QuestionType::Statement);
        assert_eq!(question_type("does this apply"), QuestionType::Does);
    }

    #[test]
    fn test_urgency_keyword_scores_high() {
        let signal = urgency("i need the money urgently", 0.0);
        assert_eq!(signal.level, UrgencyLevel::High);
        assert_eq!(signal.score, 1.0);
    }

    #[test]
    fn test_negative_sentiment_alone_is_medium_urgency() {
        let signal = urgency("this service is useless", -1.0);
        assert_eq!(signal.level, UrgencyLevel::Medium);
        assert_eq!(signal.score, 0.5);
    }

    #[test]
    fn test_no_urgency_signal() {
        let signal = urgency("tell me about home loans", 0.0);
        assert_eq!(signal.level, UrgencyLevel::Low);
        assert_eq!(signal.score, 0.0);
    }

    #[test]
    fn test_complexity_buckets() {
        let low = complexity("short question");
        assert_eq!(low.level, ComplexityLevel::Low);

        let high = complexity(
            "i would like to understand every single charge fee and penalty that applies to a personal loan over its full tenure",
        );
        assert!(high.avg_words_per_sentence > 15.0);
        assert_eq!(high.level, ComplexityLevel::High);
    }

    #[test]
    fn test_complexity_of_empty_message() {
        let metrics = complexity("");
        assert_eq!(metrics.word_count, 0);
        assert_eq!(metrics.sentence_count, 1);
        assert_eq!(metrics.level, ComplexityLevel::Low);
    }

    #[test]
    fn test_follow_up_requires_prior_turn() {
        let history = [ChatTurn::user("tell me about personal loans")];
        let ctx = analyzer().analyze("and the interest rate?", &history);
        assert!(ctx.is_follow_up);

        let ctx = analyzer().analyze("and the interest rate?", &[]);
        assert!(!ctx.is_follow_up);
    }

    #[test]
    fn test_short_message_is_follow_up() {
        let history = [ChatTurn::user("i want a personal loan")];
        let ctx = analyzer().analyze("ok thanks", &history);
        assert!(ctx.is_follow_up);
    }

    #[test]
    fn test_mood_tracks_recent_sentiment() {
        let history = [
            ChatTurn::user("this is terrible"),
            ChatTurn::assistant("Sorry to hear that."),
            ChatTurn::user("still a horrible experience"),
        ];
        let ctx = analyzer().analyze("useless service, i am very disappointed", &history);
        assert_eq!(ctx.user_mood, UserMood::Negative);
    }

    #[test]
    fn test_mood_neutral_for_plain_questions() {
        let ctx = analyzer().analyze("what is the interest rate", &[]);
        assert_eq!(ctx.user_mood, UserMood::Neutral);
    }

    #[test]
    fn test_topic_ignores_assistant_turns() {
        let history = [
            ChatTurn::user("what documents do you need"),
            ChatTurn::assistant("We will need your PAN and salary slips for the loan."),
        ];
        let ctx = analyzer().analyze("anything else required as documents?", &history);
        assert_eq!(ctx.conversation_topic, Some(Category::Documents));
    }

    #[test]
    fn test_topic_is_dominant_category() {
        let history = [
            ChatTurn::user("i want a personal loan"),
            ChatTurn::user("need money for a wedding"),
        ];
        let ctx = analyzer().analyze("which documents do you need?", &history);
        assert_eq!(ctx.conversation_topic, Some(Category::LoanInquiry));
    }

    #[test]
    fn test_journey_stage_application() {
        let ctx = analyzer().analyze("I want to apply for a loan", &[]);
        assert_eq!(ctx.journey_stage, JourneyStage::Application);
    }

    #[test]
    fn test_journey_stage_defaults_to_awareness() {
        let ctx = analyzer().analyze("hello there", &[]);
        assert_eq!(ctx.journey_stage, JourneyStage::Awareness);
    }

    #[test]
    fn test_journey_stage_post_application() {
        let history = [ChatTurn::user("i submitted my application last week")];
        let ctx = analyzer().analyze("when will the loan be approved and disbursed?", &history);
        assert_eq!(ctx.journey_stage, JourneyStage::PostApplication);
    }

    #[test]
    fn test_previous_intents_trail() {
        let history = [
            ChatTurn::user("hello"),
            ChatTurn::assistant("Hello! How can I help?"),
            ChatTurn::user("i want a personal loan"),
            ChatTurn::assistant("Sure, here are the options."),
            ChatTurn::user("what documents do i need"),
        ];
        let ctx = analyzer().analyze("how do i apply", &history);
        assert_eq!(
            ctx.previous_intents,
            vec![
                Intent::Greeting,
                Intent::LoanInquiry,
                Intent::DocumentQuery
            ]
        );
    }

    #[test]
    fn test_keywords_keep_content_words_only() {
        let ctx = analyzer().analyze("what is the emi for a personal loan", &[]);
        assert!(ctx.keywords.contains(&"emi".to_string()));
        assert!(ctx.keywords.contains(&"loan".to_string()));
        assert!(!ctx.keywords.contains(&"the".to_string()));
        assert!(!ctx.keywords.contains(&"what".to_string()));
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let history = [
            ChatTurn::user("i want a personal loan urgently"),
            ChatTurn::assistant("We can help with that."),
            ChatTurn::user("what documents do i need"),
        ];
        let analyzer = analyzer();
        let first = analyzer.analyze("and how long does approval take?", &history);
        let second = analyzer.analyze("and how long does approval take?", &history);
        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        assert_eq!(first_json, second_json);
    }
}
