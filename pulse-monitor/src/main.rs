use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod db;
pub mod notify;
pub mod repository;
pub mod service;

use crate::api::AppState;
use crate::config::{Config, StoreBackend};
use crate::notify::Notifier;
use crate::notify::webhook::WebhookChannel;
use crate::repository::LogStore;
use crate::repository::memory::MemoryLogStore;
use crate::repository::postgres::PgLogStore;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulse_monitor=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pulse Monitor...");

    let config = Config::from_env();
    config.validate().expect("Invalid configuration");

    let store: Arc<dyn LogStore> = match config.store_backend {
        StoreBackend::Postgres => {
            tracing::info!("Connecting to database...");

            let pool = db::create_pool(&config.database_url)
                .await
                .expect("Failed to create database pool");

            tracing::info!("Database connection pool created");

            db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");

            Arc::new(PgLogStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; entries will not survive a restart");
            Arc::new(MemoryLogStore::new())
        }
    };

    let notifier = match &config.alert.webhook_url {
        Some(url) => {
            tracing::info!("Failure alerts will be delivered to {}", url);
            Notifier::spawn(Arc::new(WebhookChannel::new(url.clone())), &config.alert)
        }
        None => {
            tracing::warn!("ALERT_WEBHOOK_URL not set; failure alerts are disabled");
            Notifier::disabled()
        }
    };

    // Build router with all API endpoints
    let app = api::create_router(AppState { store, notifier });

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
