//! Logging utilities
//!
//! Subscriber setup for the reference service

use crate::config::settings::LoggingConfig;
use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parse a `RUST_LOG`-style directive string such as `botads=debug,tower_http=info`
pub fn env_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .with_context(|| format!("Invalid log filter: {:?}", directives))
}

/// Initialize logging system
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(&config.level)?)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format (development environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(&config.level)?)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Logging system initialized");
    Ok(())
}
