use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Composes the tracing subscriber: `RUST_LOG`-style filtering with JSON
/// (bunyan) formatted output on stdout.
pub fn build_subscriber(name: &str, default_filter: &str) -> impl Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let formatting_layer = BunyanFormattingLayer::new(name.to_string(), std::io::stdout);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Installs the subscriber globally. Call once at process start.
pub fn init(name: &str, default_filter: &str) {
    let subscriber = build_subscriber(name, default_filter);
    set_global_default(subscriber).expect("Failed to set tracing subscriber");
}
