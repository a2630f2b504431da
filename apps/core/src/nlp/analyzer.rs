//! Analysis orchestrator.
//!
//! [`MessageAnalyzer`] owns the context analyzer and the response selector
//! and runs the full pipeline for one message: derive context, try the
//! contextual tier, try the pattern tier, fall back. The engine composes
//! the same steps itself when it wants to cache the pattern tier.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::context::{ChatTurn, ContextAnalyzer, ConversationContext};
use super::responses::FALLBACK_RESPONSE;
use super::selector::{PatternMatch, ResponseSelector, DEFAULT_PATTERN_THRESHOLD};

/// Which tier produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    Contextual,
    Pattern,
    Fallback,
}

/// The full analysis of one message, serializable for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPacket {
    pub message: String,
    pub context: ConversationContext,
    pub processing_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisPacket {
    /// One-line digest for log lines and the debug REPL.
    pub fn summary(&self) -> String {
        format!(
            "intent={} confidence={:.2} topic={} stage={:?} mood={:?} urgency={:.2}",
            self.context.intent.intent,
            self.context.intent.confidence,
            self.context
                .conversation_topic
                .map(|c| c.label())
                .unwrap_or("none"),
            self.context.journey_stage,
            self.context.user_mood,
            self.context.urgency.score,
        )
    }
}

/// A selected reply together with the analysis that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: String,
    pub source: ResponseSource,
    pub analysis: AnalysisPacket,
}

/// Runs the whole understanding-and-reply pipeline for one message.
pub struct MessageAnalyzer {
    context_analyzer: ContextAnalyzer,
    selector: ResponseSelector,
    pattern_threshold: f32,
}

impl MessageAnalyzer {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_PATTERN_THRESHOLD)
    }

    pub fn with_threshold(pattern_threshold: f32) -> Self {
        Self {
            context_analyzer: ContextAnalyzer::new(),
            selector: ResponseSelector::new(),
            pattern_threshold,
        }
    }

    /// Derives the conversation context and wraps it with timing metadata.
    pub fn analyze(&self, message: &str, history: &[ChatTurn]) -> AnalysisPacket {
        let started = Instant::now();
        let context = self.context_analyzer.analyze(message, history);
        let packet = AnalysisPacket {
            message: message.to_string(),
            context,
            processing_time_ms: started.elapsed().as_millis() as u64,
            timestamp: Utc::now(),
        };
        debug!(
            elapsed_ms = packet.processing_time_ms,
            intent = %packet.context.intent.intent,
            "message analysis complete"
        );
        packet
    }

    /// Tier one against an already-derived context.
    pub fn contextual_response(&self, context: &ConversationContext) -> Option<&'static str> {
        self.selector.contextual_response(context)
    }

    /// Tier two at this analyzer's threshold.
    pub fn pattern_response(&self, message: &str) -> Option<PatternMatch> {
        self.selector.select_best(message, self.pattern_threshold)
    }

    /// Full pipeline: analyze, contextual tier, pattern tier, fallback.
    pub fn respond(&self, message: &str, history: &[ChatTurn]) -> AssistantReply {
        let analysis = self.analyze(message, history);

        if let Some(text) = self.selector.contextual_response(&analysis.context) {
            info!(source = "contextual", "reply selected");
            return AssistantReply {
                text: text.to_string(),
                source: ResponseSource::Contextual,
                analysis,
            };
        }

        if let Some(found) = self.selector.select_best(message, self.pattern_threshold) {
            info!(
                source = "pattern",
                pattern = %found.pattern,
                score = found.score,
                "reply selected"
            );
            return AssistantReply {
                text: found.response,
                source: ResponseSource::Pattern,
                analysis,
            };
        }

        info!(source = "fallback", "reply selected");
        AssistantReply {
            text: FALLBACK_RESPONSE.to_string(),
            source: ResponseSource::Fallback,
            analysis,
        }
    }
}

impl Default for MessageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
