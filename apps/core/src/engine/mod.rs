//! Session-layer orchestration.
//!
//! A single engine task owns the session store, the message analyzer, the
//! rate limiter and the pattern-reply cache. Callers hold a cheap
//! [`EngineHandle`] and talk to the task over an mpsc mailbox, so message
//! handling for a process is serialized and the NLP core stays free of
//! locks.

pub mod messages;
pub mod service;
pub mod store;

pub use messages::{EngineError, EngineMessage};
pub use service::EngineHandle;
pub use store::{SessionStore, SqliteSessionStore};
