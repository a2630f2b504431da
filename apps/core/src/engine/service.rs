use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use sqlx::sqlite::SqlitePool;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use crate::config::EngineConfig;
use crate::engine::messages::{AppError, EngineError, EngineMessage};
use crate::engine::store::{SessionStore, SqliteSessionStore};
use crate::models::{ChatRequest, ChatSession, MessageSender, NewSessionRequest, SessionStatus};
use crate::nlp::responses::FALLBACK_RESPONSE;
use crate::nlp::tokenize::normalize;
use crate::nlp::{AssistantReply, ChatTurn, MessageAnalyzer, PatternMatch, ResponseSource};
use crate::rate_limiter::RateLimiter;

/// How long a caller waits on the engine before giving up.
const ENGINE_TIMEOUT: Duration = Duration::from_secs(10);

/// Title used when `StartSession` carries none.
const DEFAULT_SESSION_TITLE: &str = "New conversation";

/// A handle to the engine task.
///
/// This is the primary entry point for all conversation handling. Cloning the
/// handle is cheap; every clone talks to the same engine task, so message
/// processing stays serialized per process.
#[derive(Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<EngineMessage>,
}

impl EngineHandle {
    /// Spawns the engine task over the production SQLite store.
    pub fn new(pool: SqlitePool, config: EngineConfig) -> Self {
        Self::with_store(Arc::new(SqliteSessionStore::new(pool)), config)
    }

    /// Spawns the engine task over any [`SessionStore`]. Tests use this to
    /// swap in mock stores.
    pub fn with_store<S: SessionStore>(store: Arc<S>, config: EngineConfig) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let runner = EngineRunner::new(receiver, store, config);
        tokio::spawn(async move { runner.run().await });
        Self { sender }
    }

    /// Processes a user message from a specific session.
    ///
    /// The engine persists the user message, runs the analysis pipeline,
    /// selects a reply (contextual rule, scored pattern, or fallback) and
    /// persists that too before answering, so every stored user message is
    /// followed by exactly one assistant message.
    #[instrument(skip(self, content))]
    pub async fn process_message(
        &self,
        session_id: String,
        content: String,
    ) -> Result<AssistantReply, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = EngineMessage::ProcessUserMessage {
            session_id,
            content,
            responder: send,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| EngineError::Dispatch(e.to_string()))?;
        timeout(ENGINE_TIMEOUT, recv)
            .await?
            .map_err(|e| EngineError::Internal(format!("reply channel dropped: {}", e)))?
    }

    /// Opens a new session for a user and returns the stored row.
    #[instrument(skip(self))]
    pub async fn start_session(
        &self,
        user_id: String,
        title: Option<String>,
    ) -> Result<ChatSession, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = EngineMessage::StartSession {
            user_id,
            title,
            responder: send,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| EngineError::Dispatch(e.to_string()))?;
        timeout(ENGINE_TIMEOUT, recv)
            .await?
            .map_err(|e| EngineError::Internal(format!("reply channel dropped: {}", e)))?
    }

    /// Asks the engine task to stop after draining already-queued messages.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(EngineMessage::Shutdown).await;
    }
}

// --- Engine Runner ---
struct EngineRunner<S: SessionStore> {
    receiver: mpsc::Receiver<EngineMessage>,
    store: Arc<S>,
    analyzer: MessageAnalyzer,
    limiter: RateLimiter,
    /// Pattern-tier results keyed by normalized message text. Scoring is
    /// deterministic per text, so repeated questions skip the scoring pass.
    pattern_cache: LruCache<String, Option<PatternMatch>>,
    config: EngineConfig,
}

impl<S: SessionStore> EngineRunner<S> {
    fn new(receiver: mpsc::Receiver<EngineMessage>, store: Arc<S>, config: EngineConfig) -> Self {
        let capacity = NonZeroUsize::new(config.cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            receiver,
            store,
            analyzer: MessageAnalyzer::with_threshold(config.pattern_threshold),
            limiter: RateLimiter::new(
                config.rate_limit,
                Duration::from_secs(config.rate_window_secs),
            ),
            pattern_cache: LruCache::new(capacity),
            config,
        }
    }

    async fn run(mut self) {
        info!("Engine started");
        while let Some(msg) = self.receiver.recv().await {
            if matches!(msg, EngineMessage::Shutdown) {
                info!("Engine shutting down");
                break;
            }
            self.handle_message(msg).await;
        }
        info!("Engine stopped");
    }

    async fn handle_message(&mut self, msg: EngineMessage) {
        match msg {
            EngineMessage::ProcessUserMessage {
                session_id,
                content,
                responder,
            } => {
                let result = self.handle_user_message(session_id, content).await;
                if let Err(e) = &result {
                    error!("Error processing user message: {:?}", e);
                }
                let _ = responder.send(result);
            }
            EngineMessage::StartSession {
                user_id,
                title,
                responder,
            } => {
                let result = self.handle_start_session(user_id, title).await;
                if let Err(e) = &result {
                    error!("Error starting session: {:?}", e);
                }
                let _ = responder.send(result);
            }
            EngineMessage::Shutdown => {}
        }
    }

    /// Core per-message flow: rate limit, validate, load the session, read
    /// recent history, persist the user turn, pick a reply, persist it.
    #[instrument(skip(self, content))]
    async fn handle_user_message(
        &mut self,
        session_id: String,
        content: String,
    ) -> Result<AssistantReply, AppError> {
        if !self.limiter.check(&session_id) {
            warn!("Rate limit exceeded for session");
            return Err(AppError::RateLimited);
        }

        let request = ChatRequest { content };
        request.validate()?;

        let session = self.store.get_session(&session_id).await?;
        if session.status != SessionStatus::Active {
            return Err(AppError::Validation(format!(
                "session {} is {:?}, not active",
                session.id, session.status
            )));
        }

        // History is read before the append so the current message is not
        // part of its own context.
        let history = self
            .store
            .recent_messages(&session_id, self.config.history_window)
            .await?;
        self.store
            .append_message(&session_id, MessageSender::User, &request.content)
            .await?;

        let turns: Vec<ChatTurn> = history.iter().map(ChatTurn::from).collect();
        let reply = self.select_reply(&request.content, &turns);

        self.store
            .append_message(&session_id, MessageSender::Assistant, &reply.text)
            .await?;
        Ok(reply)
    }

    /// Both selection tiers over one analysis pass, then the fallback.
    fn select_reply(&mut self, message: &str, history: &[ChatTurn]) -> AssistantReply {
        let analysis = self.analyzer.analyze(message, history);

        if let Some(text) = self.analyzer.contextual_response(&analysis.context) {
            info!(source = "contextual", "Reply selected");
            return AssistantReply {
                text: text.to_string(),
                source: ResponseSource::Contextual,
                analysis,
            };
        }

        if let Some(found) = self.cached_pattern_response(message) {
            info!(source = "pattern", pattern = %found.pattern, "Reply selected");
            return AssistantReply {
                text: found.response,
                source: ResponseSource::Pattern,
                analysis,
            };
        }

        info!(source = "fallback", "Reply selected");
        AssistantReply {
            text: FALLBACK_RESPONSE.to_string(),
            source: ResponseSource::Fallback,
            analysis,
        }
    }

    fn cached_pattern_response(&mut self, message: &str) -> Option<PatternMatch> {
        let key = normalize(message);
        if let Some(hit) = self.pattern_cache.get(&key) {
            debug!("Pattern cache hit");
            return hit.clone();
        }
        let result = self.analyzer.pattern_response(message);
        self.pattern_cache.put(key, result.clone());
        result
    }

    async fn handle_start_session(
        &mut self,
        user_id: String,
        title: Option<String>,
    ) -> Result<ChatSession, AppError> {
        let request = NewSessionRequest {
            user_id,
            title: title.unwrap_or_else(|| DEFAULT_SESSION_TITLE.to_string()),
        };
        request.validate()?;

        let session = self
            .store
            .create_session(&request.user_id, &request.title)
            .await?;
        info!(session_id = %session.id, "Session started");
        Ok(session)
    }
}
