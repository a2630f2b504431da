use crate::models::{ChatSession, Message, MessageSender, MessageType, SessionStatus};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

/// Opens (creating if needed) the SQLite database and applies the schema.
/// Pass `":memory:"` for an in-memory database in tests.
pub async fn init_db(path: Option<&str>) -> Result<SqlitePool, sqlx::Error> {
    let path = path.unwrap_or(crate::config::DEFAULT_DB_PATH);
    let db_url = if path == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
            }
        }
        format!("sqlite://{}", path)
    };

    info!("Initializing database at: {}", db_url);

    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);

    // An in-memory database lives and dies with its connection, so the
    // pool must hold exactly one and never recycle it.
    let pool_options = if path == ":memory:" {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };
    let pool = pool_options.connect_with(options).await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'active',
            tags JSON NOT NULL DEFAULT '[]',
            created_at INTEGER NOT NULL,
            last_activity INTEGER NOT NULL
        );
        CREATE TABLE IF NOT EXISTS messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id TEXT NOT NULL,
            sender TEXT NOT NULL,
            content TEXT NOT NULL,
            message_type TEXT NOT NULL DEFAULT 'text',
            created_at INTEGER NOT NULL,
            FOREIGN KEY(session_id) REFERENCES sessions(id)
        );
        CREATE INDEX IF NOT EXISTS idx_messages_session ON messages(session_id, id);
        "#,
    )
    .execute(&pool)
    .await?;

    info!("Database initialized and migrations applied.");

    Ok(pool)
}

// --- Sessions CRUD ---

pub async fn create_session(
    pool: &SqlitePool,
    user_id: &str,
    title: &str,
) -> Result<ChatSession, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp();

    sqlx::query_as::<_, ChatSession>(
        r#"
        INSERT INTO sessions (id, user_id, title, status, tags, created_at, last_activity)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, user_id, title, status, tags, created_at, last_activity
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(title)
    .bind(SessionStatus::Active)
    .bind(Json(Vec::<String>::new()))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn get_session(pool: &SqlitePool, id: &str) -> Result<ChatSession, sqlx::Error> {
    sqlx::query_as::<_, ChatSession>(
        r#"
        SELECT id, user_id, title, status, tags, created_at, last_activity
        FROM sessions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn list_sessions_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<ChatSession>, sqlx::Error> {
    sqlx::query_as::<_, ChatSession>(
        r#"
        SELECT id, user_id, title, status, tags, created_at, last_activity
        FROM sessions
        WHERE user_id = ?
        ORDER BY last_activity DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn set_session_status(
    pool: &SqlitePool,
    id: &str,
    status: SessionStatus,
) -> Result<ChatSession, sqlx::Error> {
    sqlx::query_as::<_, ChatSession>(
        r#"
        UPDATE sessions
        SET status = ?
        WHERE id = ?
        RETURNING id, user_id, title, status, tags, created_at, last_activity
        "#,
    )
    .bind(status)
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn rename_session(
    pool: &SqlitePool,
    id: &str,
    title: &str,
) -> Result<ChatSession, sqlx::Error> {
    sqlx::query_as::<_, ChatSession>(
        r#"
        UPDATE sessions
        SET title = ?
        WHERE id = ?
        RETURNING id, user_id, title, status, tags, created_at, last_activity
        "#,
    )
    .bind(title)
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn set_session_tags(
    pool: &SqlitePool,
    id: &str,
    tags: Vec<String>,
) -> Result<ChatSession, sqlx::Error> {
    sqlx::query_as::<_, ChatSession>(
        r#"
        UPDATE sessions
        SET tags = ?
        WHERE id = ?
        RETURNING id, user_id, title, status, tags, created_at, last_activity
        "#,
    )
    .bind(Json(tags))
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Removes a session and its messages. Returns the number of session rows
/// deleted (0 when the id did not exist).
pub async fn delete_session(pool: &SqlitePool, id: &str) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM messages WHERE session_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(result.rows_affected())
}

// --- Messages CRUD ---

/// Appends a message and bumps the session's `last_activity`; both writes
/// commit together or not at all. Messages are append-only; nothing ever
/// updates or reorders them.
pub async fn add_message(
    pool: &SqlitePool,
    session_id: &str,
    sender: MessageSender,
    message_type: MessageType,
    content: &str,
) -> Result<Message, sqlx::Error> {
    let created_at = Utc::now().timestamp();

    let mut tx = pool.begin().await?;
    let message = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (session_id, sender, content, message_type, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, session_id, sender, content, message_type, created_at
        "#,
    )
    .bind(session_id)
    .bind(sender)
    .bind(content)
    .bind(message_type)
    .bind(created_at)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE sessions SET last_activity = ? WHERE id = ?")
        .bind(created_at)
        .bind(session_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(message)
}

pub async fn get_session_messages(
    pool: &SqlitePool,
    session_id: &str,
) -> Result<Vec<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"
        SELECT id, session_id, sender, content, message_type, created_at
        FROM messages
        WHERE session_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await
}

/// The most recent `limit` messages in chronological order.
pub async fn recent_messages(
    pool: &SqlitePool,
    session_id: &str,
    limit: usize,
) -> Result<Vec<Message>, sqlx::Error> {
    let mut messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, session_id, sender, content, message_type, created_at
        FROM messages
        WHERE session_id = ?
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(session_id)
    .bind(limit as i64)
    .fetch_all(pool)
    .await?;
    messages.reverse();
    Ok(messages)
}
