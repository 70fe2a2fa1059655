//! Draw Number - Main entry point.

use std::fs::OpenOptions;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drawnumber_engine::infrastructure::{
    config_source::{EmbeddedConfigSource, FileConfigSource},
    ports::{ConfigSourcePort, DrawNumberView},
    random::SystemRandom,
    views::{ConsoleView, JsonLinesView, TracingView},
};
use drawnumber_engine::DrawNumberApp;

fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging. Stdout belongs to the console view.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drawnumber_engine=warn,drawnumber::view=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Draw Number");

    // Load configuration
    let config_source: Arc<dyn ConfigSourcePort> = match std::env::var("DRAWNUMBER_CONFIG") {
        Ok(path) => {
            tracing::info!(path = %path, "Using configuration file");
            Arc::new(FileConfigSource::new(path))
        }
        Err(_) => Arc::new(EmbeddedConfigSource::default()),
    };

    // Register views: the console first, then the optional log views
    let console = Arc::new(ConsoleView::new(std::io::stdout()));
    let mut views: Vec<Arc<dyn DrawNumberView>> = Vec::new();
    views.push(console.clone());

    if let Ok(path) = std::env::var("DRAWNUMBER_EVENT_LOG") {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open event log {path}"))?;
        tracing::info!(path = %path, "Recording view events");
        views.push(Arc::new(JsonLinesView::new(file)));
    }

    if env_flag("DRAWNUMBER_TRACE_VIEW") {
        views.push(Arc::new(TracingView::new()));
    }

    // Every view has already shown the error when this fails
    let app = DrawNumberApp::start(views, config_source, Arc::new(SystemRandom::new()))?;

    let lifecycle = console.run(std::io::stdin().lock())?;
    tracing::info!(?lifecycle, quit = app.is_quit(), "Draw Number finished");

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
