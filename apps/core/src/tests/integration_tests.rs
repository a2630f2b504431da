//! Integration Tests
//!
//! Full-stack conversations through the engine handle and real SQLite:
//! tier selection across multi-turn flows, rate-limit isolation,
//! persistence across an engine restart and the analysis payload.

use tempfile::tempdir;

use crate::config::EngineConfig;
use crate::database;
use crate::engine::EngineHandle;
use crate::error::AppError;
use crate::models::MessageSender;
use crate::nlp::context::UrgencyLevel;
use crate::nlp::entities::ContactKind;
use crate::nlp::responses::{
    APPLICATION_NUDGE, ESCALATION_RESPONSE, FALLBACK_RESPONSE, STATUS_GUIDE,
};
use crate::nlp::ResponseSource;

async fn engine_with_memory_db(config: EngineConfig) -> EngineHandle {
    let pool = database::init_db(Some(":memory:"))
        .await
        .expect("Failed to initialize test database");
    EngineHandle::new(pool, config)
}

#[cfg(test)]
mod conversation_flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_greeting_application_documents_flow() {
        let engine = engine_with_memory_db(EngineConfig::default()).await;
        let session = engine
            .start_session("user-1".to_string(), Some("Loan chat".to_string()))
            .await
            .expect("start_session failed");

        let greeting = engine
            .process_message(session.id.clone(), "hello".to_string())
            .await
            .expect("greeting turn failed");
        assert_eq!(greeting.source, ResponseSource::Pattern);
        assert!(greeting.text.starts_with("Hello! Welcome to LoanMitra"));

        // Statement during the application stage triggers the nudge rule.
        let nudge = engine
            .process_message(session.id.clone(), "i want to apply for a loan".to_string())
            .await
            .expect("application turn failed");
        assert_eq!(nudge.source, ResponseSource::Contextual);
        assert_eq!(nudge.text, APPLICATION_NUDGE);

        // The topic window still favors the application process here, so
        // the contextual tier declines and the pattern tier answers.
        let documents = engine
            .process_message(session.id.clone(), "what documents do i need".to_string())
            .await
            .expect("documents turn failed");
        assert_eq!(documents.source, ResponseSource::Pattern);
        assert!(documents.text.contains("PAN card"));
    }

    #[tokio::test]
    async fn test_frustrated_technical_issue_escalates() {
        let engine = engine_with_memory_db(EngineConfig::default()).await;
        let session = engine
            .start_session("user-1".to_string(), None)
            .await
            .expect("start_session failed");

        engine
            .process_message(
                session.id.clone(),
                "my otp is not working and the website shows an error".to_string(),
            )
            .await
            .expect("first turn failed");

        let reply = engine
            .process_message(
                session.id.clone(),
                "this is terrible, nothing works and i am very frustrated, fix this immediately"
                    .to_string(),
            )
            .await
            .expect("second turn failed");

        assert_eq!(reply.source, ResponseSource::Contextual);
        assert_eq!(reply.text, ESCALATION_RESPONSE);
        assert_eq!(reply.analysis.context.urgency.level, UrgencyLevel::High);
    }

    #[tokio::test]
    async fn test_fallback_then_recovery() {
        let engine = engine_with_memory_db(EngineConfig::default()).await;
        let session = engine
            .start_session("user-1".to_string(), None)
            .await
            .expect("start_session failed");

        let lost = engine
            .process_message(session.id.clone(), "asdf qwerty".to_string())
            .await
            .expect("gibberish turn failed");
        assert_eq!(lost.source, ResponseSource::Fallback);
        assert_eq!(lost.text, FALLBACK_RESPONSE);

        let recovered = engine
            .process_message(session.id.clone(), "i am looking for a home loan".to_string())
            .await
            .expect("recovery turn failed");
        assert_eq!(recovered.source, ResponseSource::Pattern);
        assert!(recovered.text.contains("8.5%"));
    }
}

#[cfg(test)]
mod isolation_tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limit_is_scoped_per_session() {
        let config = EngineConfig {
            rate_limit: 1,
            ..EngineConfig::default()
        };
        let engine = engine_with_memory_db(config).await;
        let first = engine
            .start_session("user-1".to_string(), None)
            .await
            .expect("start_session failed");
        let second = engine
            .start_session("user-1".to_string(), None)
            .await
            .expect("start_session failed");

        engine
            .process_message(first.id.clone(), "hello".to_string())
            .await
            .expect("first session's first message should pass");
        let limited = engine
            .process_message(first.id.clone(), "hi there".to_string())
            .await;
        assert!(matches!(limited, Err(AppError::RateLimited)));

        // A different session still has its full allowance.
        engine
            .process_message(second.id.clone(), "hello".to_string())
            .await
            .expect("second session must not inherit the limit");
    }
}

#[cfg(test)]
mod persistence_tests {
    use super::*;

    #[tokio::test]
    async fn test_conversation_survives_an_engine_restart() {
        let dir = tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("assistant.sqlite");
        let path = db_path.to_str().expect("utf-8 temp path");

        let pool = database::init_db(Some(path))
            .await
            .expect("Failed to initialize database");
        let engine = EngineHandle::new(pool.clone(), EngineConfig::default());
        let session = engine
            .start_session("user-1".to_string(), Some("Persistent".to_string()))
            .await
            .expect("start_session failed");

        let first = engine
            .process_message(
                session.id.clone(),
                "it has been pending since last week".to_string(),
            )
            .await
            .expect("first turn failed");
        assert_eq!(first.source, ResponseSource::Contextual);
        assert_eq!(first.text, STATUS_GUIDE);

        engine.shutdown().await;
        pool.close().await;

        // A fresh engine over the same file must see the stored history
        // and keep answering from it.
        let reopened = database::init_db(Some(path))
            .await
            .expect("Failed to reopen database");
        let restarted = EngineHandle::new(reopened.clone(), EngineConfig::default());

        let second = restarted
            .process_message(
                session.id.clone(),
                "when will the amount be disbursed?".to_string(),
            )
            .await
            .expect("post-restart turn failed");
        assert_eq!(second.source, ResponseSource::Contextual);
        assert_eq!(second.text, STATUS_GUIDE);

        let messages = database::get_session_messages(&reopened, &session.id)
            .await
            .expect("Failed to fetch messages");
        let senders: Vec<MessageSender> = messages.iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![
                MessageSender::User,
                MessageSender::Assistant,
                MessageSender::User,
                MessageSender::Assistant
            ]
        );
        assert_eq!(messages[1].content, STATUS_GUIDE);
    }
}

#[cfg(test)]
mod analysis_payload_tests {
    use super::*;

    #[tokio::test]
    async fn test_entities_travel_with_the_reply() {
        let engine = engine_with_memory_db(EngineConfig::default()).await;
        let session = engine
            .start_session("user-1".to_string(), None)
            .await
            .expect("start_session failed");

        let message = "call me at 9876543210 or email ravi@example.com";
        let reply = engine
            .process_message(session.id.clone(), message.to_string())
            .await
            .expect("process_message failed");

        assert_eq!(reply.analysis.message, message);
        let contacts = &reply.analysis.context.entities.contacts;
        let phones = contacts
            .iter()
            .filter(|c| c.kind == ContactKind::Phone)
            .count();
        let emails = contacts
            .iter()
            .filter(|c| c.kind == ContactKind::Email)
            .count();
        assert_eq!(phones, 1);
        assert_eq!(emails, 1);
    }

    #[tokio::test]
    async fn test_sentiment_travels_with_the_reply() {
        let engine = engine_with_memory_db(EngineConfig::default()).await;
        let session = engine
            .start_session("user-1".to_string(), None)
            .await
            .expect("start_session failed");

        let reply = engine
            .process_message(
                session.id.clone(),
                "thank you so much, this is great".to_string(),
            )
            .await
            .expect("process_message failed");

        assert!(reply.analysis.context.sentiment.score > 0.0);
    }
}
