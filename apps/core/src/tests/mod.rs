//! Test Module
//!
//! Cross-module test suite for the LoanMitra assistant engine.
//!
//! ## Test Categories
//! - `nlp_tests`: Tokenization, entities, intent scoring, categories, sentiment
//! - `context_tests`: Conversation context derived over history windows
//! - `selector_tests`: Contextual rules and weighted pattern scoring
//! - `database_tests`: CRUD operations for sessions and messages
//! - `engine_tests`: Engine task behavior over a mock store
//! - `integration_tests`: Full conversation flows through a real engine

pub mod engine_tests;
pub mod integration_tests;
