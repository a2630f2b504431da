//! LoanMitra assistant engine.
//!
//! A rule-based conversational core for a loan company's chat assistant.
//! Incoming messages pass through a deterministic understanding pipeline
//! (entities, intent, semantic category, sentiment, conversation context)
//! and a two-tier response selector; sessions and transcripts persist in
//! SQLite behind a single engine task that callers reach via
//! [`EngineHandle`].

pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod models;
pub mod nlp;
pub mod rate_limiter;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use config::EngineConfig;
pub use engine::EngineHandle;
pub use error::AppError;
pub use nlp::{AnalysisPacket, AssistantReply, MessageAnalyzer, ResponseSource};
