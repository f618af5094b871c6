//! API Module
//!
//! HTTP API layer for the monitor.
//! Route handlers live in per-domain submodules.

pub mod error;
pub mod health;
pub mod log;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::notify::Notifier;
use crate::repository::LogStore;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LogStore>,
    pub notifier: Notifier,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Log endpoints
        .route("/api/logs", get(log::list_logs).post(log::create_log))
        .route("/api/logs/summary", get(log::get_summary))
        .route("/api/logs/{id}", get(log::get_log))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // The dashboard front end is served from another origin
        .layer(CorsLayer::permissive())
}
