//! Interactive debug REPL over the full engine.
//!
//! Reads messages from stdin, routes them through a real engine task backed
//! by the configured SQLite database, and prints the reply plus the analysis
//! digest for each turn.

use std::io::{self, Write};

use anyhow::Context;
use tokio::io::AsyncBufReadExt;

use loanmitra_core::config::EngineConfig;
use loanmitra_core::database;
use loanmitra_core::engine::EngineHandle;
use loanmitra_core::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init("loanmitra-core", "info");

    let config = EngineConfig::from_env().context("Failed to load configuration")?;
    let pool = database::init_db(Some(&config.db_path))
        .await
        .context("Failed to initialize database")?;
    let engine = EngineHandle::new(pool.clone(), config);

    let session = engine.start_session("local".to_string(), None).await?;
    let mut session_id = session.id;
    println!("LoanMitra assistant debug REPL");
    println!("Session {}. Commands: :new, :history, :quit", session_id);

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => {}
            ":quit" => break,
            ":new" => {
                let session = engine.start_session("local".to_string(), None).await?;
                session_id = session.id;
                println!("Started session {}", session_id);
            }
            ":history" => {
                let messages = database::get_session_messages(&pool, &session_id).await?;
                for message in &messages {
                    println!("[{}] {}", message.sender, message.content);
                }
            }
            _ => match engine.process_message(session_id.clone(), line.to_string()).await {
                Ok(reply) => {
                    println!("{}", reply.text);
                    println!("  [{:?}] {}", reply.source, reply.analysis.summary());
                }
                Err(e) => println!("error: {}", e),
            },
        }
        prompt()?;
    }

    engine.shutdown().await;
    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}
