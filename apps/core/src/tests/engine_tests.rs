//! Engine Task Tests
//!
//! Drives the engine through its handle against a mock session store, so
//! ordering, validation and failure paths can be asserted without SQLite.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::types::Json;

use crate::config::EngineConfig;
use crate::engine::store::SessionStore;
use crate::engine::EngineHandle;
use crate::error::AppError;
use crate::models::{ChatSession, Message, MessageSender, MessageType, SessionStatus};
use crate::nlp::responses::STATUS_GUIDE;
use crate::nlp::ResponseSource;

/// In-memory store serving a single fixed session. The append log doubles
/// as the assertion surface for write ordering.
struct MockSessionStore {
    session: ChatSession,
    messages: Mutex<Vec<Message>>,
    fail_append: bool,
}

impl MockSessionStore {
    fn new(session_id: &str) -> Self {
        Self {
            session: ChatSession {
                id: session_id.to_string(),
                user_id: "user-1".to_string(),
                title: "Mock chat".to_string(),
                status: SessionStatus::Active,
                tags: Json(Vec::new()),
                created_at: 1,
                last_activity: 1,
            },
            messages: Mutex::new(Vec::new()),
            fail_append: false,
        }
    }

    fn with_status(mut self, status: SessionStatus) -> Self {
        self.session.status = status;
        self
    }

    fn with_history(self, turns: &[(MessageSender, &str)]) -> Self {
        {
            let mut messages = self.messages.lock().unwrap();
            for (sender, content) in turns {
                let id = messages.len() as i64 + 1;
                messages.push(Message {
                    id,
                    session_id: self.session.id.clone(),
                    sender: *sender,
                    content: content.to_string(),
                    message_type: MessageType::Text,
                    created_at: id,
                });
            }
        }
        self
    }

    fn failing_appends(mut self) -> Self {
        self.fail_append = true;
        self
    }

    fn log(&self) -> Vec<(MessageSender, String)> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .map(|m| (m.sender, m.content.clone()))
            .collect()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn create_session(&self, user_id: &str, title: &str) -> Result<ChatSession, AppError> {
        let mut session = self.session.clone();
        session.user_id = user_id.to_string();
        session.title = title.to_string();
        Ok(session)
    }

    async fn get_session(&self, session_id: &str) -> Result<ChatSession, AppError> {
        if session_id == self.session.id {
            Ok(self.session.clone())
        } else {
            Err(AppError::SessionNotFound(session_id.to_string()))
        }
    }

    async fn append_message(
        &self,
        session_id: &str,
        sender: MessageSender,
        content: &str,
    ) -> Result<Message, AppError> {
        if self.fail_append {
            return Err(AppError::Internal("storage offline".to_string()));
        }
        let mut messages = self.messages.lock().unwrap();
        let message = Message {
            id: messages.len() as i64 + 1,
            session_id: session_id.to_string(),
            sender,
            content: content.to_string(),
            message_type: MessageType::Text,
            created_at: 0,
        };
        messages.push(message.clone());
        Ok(message)
    }

    async fn recent_messages(
        &self,
        _session_id: &str,
        limit: usize,
    ) -> Result<Vec<Message>, AppError> {
        let messages = self.messages.lock().unwrap();
        let start = messages.len().saturating_sub(limit);
        Ok(messages[start..].to_vec())
    }
}

#[cfg(test)]
mod engine_behavior_tests {
    use super::*;

    #[tokio::test]
    async fn test_user_and_assistant_rows_append_in_order() {
        let store = Arc::new(MockSessionStore::new("s-1"));
        let engine = EngineHandle::with_store(store.clone(), EngineConfig::default());

        let reply = engine
            .process_message("s-1".to_string(), "hello".to_string())
            .await
            .expect("process_message failed");

        assert_eq!(reply.source, ResponseSource::Pattern);
        let log = store.log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0], (MessageSender::User, "hello".to_string()));
        assert_eq!(log[1], (MessageSender::Assistant, reply.text.clone()));
    }

    #[tokio::test]
    async fn test_store_failure_propagates_to_the_caller() {
        let store = Arc::new(MockSessionStore::new("s-1").failing_appends());
        let engine = EngineHandle::with_store(store, EngineConfig::default());

        let result = engine
            .process_message("s-1".to_string(), "hello".to_string())
            .await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_preloaded_history_feeds_the_contextual_tier() {
        let store = Arc::new(MockSessionStore::new("s-1").with_history(&[
            (MessageSender::User, "it has been pending since last week"),
            (MessageSender::Assistant, "Let me look into that."),
        ]));
        let engine = EngineHandle::with_store(store, EngineConfig::default());

        let reply = engine
            .process_message("s-1".to_string(), "when will the amount be disbursed?".to_string())
            .await
            .expect("process_message failed");

        assert_eq!(reply.source, ResponseSource::Contextual);
        assert_eq!(reply.text, STATUS_GUIDE);
    }

    #[tokio::test]
    async fn test_rate_limited_call_writes_nothing() {
        let config = EngineConfig {
            rate_limit: 1,
            ..EngineConfig::default()
        };
        let store = Arc::new(MockSessionStore::new("s-1"));
        let engine = EngineHandle::with_store(store.clone(), config);

        engine
            .process_message("s-1".to_string(), "hello".to_string())
            .await
            .expect("first message should pass");
        let second = engine
            .process_message("s-1".to_string(), "hi there".to_string())
            .await;

        assert!(matches!(second, Err(AppError::RateLimited)));
        assert_eq!(store.log().len(), 2, "rejected message must not be stored");
    }

    #[tokio::test]
    async fn test_inactive_session_is_rejected_before_any_write() {
        let store =
            Arc::new(MockSessionStore::new("s-1").with_status(SessionStatus::Completed));
        let engine = EngineHandle::with_store(store.clone(), EngineConfig::default());

        let result = engine
            .process_message("s-1".to_string(), "hello".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.log().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = Arc::new(MockSessionStore::new("s-1"));
        let engine = EngineHandle::with_store(store.clone(), EngineConfig::default());

        let result = engine
            .process_message("s-2".to_string(), "hello".to_string())
            .await;

        assert!(matches!(result, Err(AppError::SessionNotFound(_))));
        assert!(store.log().is_empty());
    }

    #[tokio::test]
    async fn test_start_session_applies_the_default_title() {
        let store = Arc::new(MockSessionStore::new("s-1"));
        let engine = EngineHandle::with_store(store, EngineConfig::default());

        let session = engine
            .start_session("user-9".to_string(), None)
            .await
            .expect("start_session failed");

        assert_eq!(session.user_id, "user-9");
        assert_eq!(session.title, "New conversation");
    }
}
