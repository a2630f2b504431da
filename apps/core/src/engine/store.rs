use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use crate::database;
use crate::error::AppError;
use crate::models::{ChatSession, Message, MessageSender, MessageType};

/// Defines the persistence interface the engine depends on.
///
/// This trait abstracts the session storage so that different backends can be
/// used interchangeably, and so engine tests can swap in an in-memory mock
/// instead of a real pool.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Creates a new session for a user and returns the stored row.
    async fn create_session(&self, user_id: &str, title: &str) -> Result<ChatSession, AppError>;

    /// Fetches a session by id.
    async fn get_session(&self, session_id: &str) -> Result<ChatSession, AppError>;

    /// Appends a text message to a session's transcript and bumps the
    /// session's last-activity timestamp.
    async fn append_message(
        &self,
        session_id: &str,
        sender: MessageSender,
        content: &str,
    ) -> Result<Message, AppError>;

    /// Returns up to `limit` most recent messages, oldest first.
    async fn recent_messages(
        &self,
        session_id: &str,
        limit: usize,
    ) -> Result<Vec<Message>, AppError>;
}

/// Production store backed by the SQLite pool from [`database::init_db`].
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create_session(&self, user_id: &str, title: &str) -> Result<ChatSession, AppError> {
        Ok(database::create_session(&self.pool, user_id, title).await?)
    }

    async fn get_session(&self, session_id: &str) -> Result<ChatSession, AppError> {
        match database::get_session(&self.pool, session_id).await {
            Ok(session) => Ok(session),
            Err(sqlx::Error::RowNotFound) => Err(AppError::SessionNotFound(session_id.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    async fn append_message(
        &self,
        session_id: &str,
        sender: MessageSender,
        content: &str,
    ) -> Result<Message, AppError> {
        Ok(database::add_message(&self.pool, session_id, sender, MessageType::Text, content).await?)
    }

    async fn recent_messages(
        &self,
        session_id: &str,
        limit: usize,
    ) -> Result<Vec<Message>, AppError> {
        Ok(database::recent_messages(&self.pool, session_id, limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::init_db;

    #[tokio::test]
    async fn test_get_session_maps_missing_row() {
        let pool = init_db(Some(":memory:")).await.unwrap();
        let store = SqliteSessionStore::new(pool);

        let err = store.get_session("no-such-session").await.unwrap_err();
        assert!(matches!(err, AppError::SessionNotFound(id) if id == "no-such-session"));
    }

    #[tokio::test]
    async fn test_round_trip_through_store() {
        let pool = init_db(Some(":memory:")).await.unwrap();
        let store = SqliteSessionStore::new(pool);

        let session = store.create_session("user-7", "Loan questions").await.unwrap();
        store
            .append_message(&session.id, MessageSender::User, "hello")
            .await
            .unwrap();
        store
            .append_message(&session.id, MessageSender::Assistant, "hi there")
            .await
            .unwrap();

        let recent = store.recent_messages(&session.id, 10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].sender, MessageSender::User);
        assert_eq!(recent[1].sender, MessageSender::Assistant);
    }
}
