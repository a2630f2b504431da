//! # NLP Module
//!
//! Rule-based message understanding for the LoanMitra assistant.
//! Every stage is a pure function over static tables; no model calls,
//! no I/O, deterministic output for identical input.
//!
//! ## Components
//! - `tokenize`: shared normalization and tokenization
//! - `entities`: amounts, dates, contacts, documents, orgs, locations
//! - `intent`: example-phrase intent scoring
//! - `semantic`: keyword-set category matching
//! - `sentiment`: word-list sentiment balance
//! - `lexicon`: keyword weight table and question words
//! - `context`: history-window conversation signals
//! - `responses`: pattern table and playbook texts
//! - `selector`: contextual tier + scored pattern tier
//! - `analyzer`: main orchestrator

pub mod analyzer;
pub mod context;
pub mod entities;
pub mod intent;
pub mod lexicon;
pub mod responses;
pub mod selector;
pub mod semantic;
pub mod sentiment;
pub mod tokenize;

pub use analyzer::{AnalysisPacket, AssistantReply, MessageAnalyzer, ResponseSource};
pub use context::{ChatTurn, ContextAnalyzer, ConversationContext};
pub use entities::{EntityExtractor, EntitySet};
pub use intent::{Intent, IntentOutcome, IntentScorer};
pub use selector::{PatternMatch, ResponseSelector};
pub use semantic::{Category, CategoryMatcher, CategoryOutcome};
pub use sentiment::{SentimentScore, SentimentScorer};
