//! HTTP handlers module
//!
//! Endpoints of the reference webhook service

pub mod codes;
pub mod health;
pub mod webhook;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::CodeIssuer;
use crate::webhook::WebhookVerifier;
use anyhow::Result;
use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub issuer: Arc<dyn CodeIssuer>,
    pub verifier: WebhookVerifier,
    pub started_at: Instant,
}

/// Create application router
pub fn create_router(settings: Settings, issuer: Arc<dyn CodeIssuer>) -> Result<Router> {
    let verifier = WebhookVerifier::from_secret(settings.webhook.secret.clone())?;
    let max_body_size = settings.server.max_body_size;

    let app_state = Arc::new(AppState {
        settings,
        issuer,
        verifier,
        started_at: Instant::now(),
    });

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(max_body_size));

    let router = Router::new()
        .route("/webhook", post(webhook::handle_webhook))
        .route("/codes", post(codes::create_code))
        .route("/health", get(health::health_check))
        .with_state(app_state)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(middleware_stack);

    Ok(router)
}
