use serde::Serialize;
use tokio::sync::oneshot;

use crate::models::ChatSession;
use crate::nlp::AssistantReply;

/// Defines errors that can occur within the engine task.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum EngineError {
    /// A message could not be delivered to the engine mailbox, usually
    /// because the task has stopped.
    #[error("Engine dispatch failed: {0}")]
    Dispatch(String),
    /// A generic internal error within the engine.
    #[error("Internal engine error: {0}")]
    Internal(String),
    /// An error indicating that an engine operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for EngineError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        EngineError::Timeout(format!("Engine request timed out: {}", err))
    }
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the engine task.
#[derive(Debug)]
pub enum EngineMessage {
    /// A request to process a user's message from a specific session.
    ProcessUserMessage {
        session_id: String,
        content: String,
        /// A channel to send the final assistant reply back.
        responder: oneshot::Sender<Result<AssistantReply, AppError>>,
    },
    /// A request to open a new session for a user.
    StartSession {
        user_id: String,
        /// Session title; a default is used when absent.
        title: Option<String>,
        responder: oneshot::Sender<Result<ChatSession, AppError>>,
    },
    /// A command to shut down the engine task once the queue drains.
    Shutdown,
}
