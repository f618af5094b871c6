//! Log API Handlers
//!
//! HTTP endpoints for the dashboard: filtered listing, ingestion, detail
//! lookup, and the trailing-window status summary.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Duration, Utc};
use pulse_core::domain::log::InterfaceLog;
use pulse_core::dto::log::{CreateLog, LogPage, LogQuery, StatusSummary};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::{log_service, summary_service};

/// GET /api/logs
/// List log entries with filters, sorting, and pagination
pub async fn list_logs(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> ApiResult<Json<LogPage>> {
    tracing::debug!("Listing logs");

    let page = log_service::list_logs(state.store.as_ref(), &query)
        .await
        .map_err(|e| match e {
            log_service::LogError::ValidationError(msg) => ApiError::BadRequest(msg),
            log_service::LogError::StoreError(err) => ApiError::StoreError(err),
            log_service::LogError::NotFound(id) => {
                ApiError::NotFound(format!("Log entry {} not found", id))
            }
        })?;

    Ok(Json(page))
}

/// POST /api/logs
/// Record a new log entry
pub async fn create_log(
    State(state): State<AppState>,
    Json(req): Json<CreateLog>,
) -> ApiResult<(StatusCode, Json<InterfaceLog>)> {
    tracing::info!("Recording log entry for interface: {}", req.interface_name);

    let entry = log_service::create_log(state.store.as_ref(), &state.notifier, req)
        .await
        .map_err(|e| match e {
            log_service::LogError::ValidationError(msg) => ApiError::BadRequest(msg),
            log_service::LogError::StoreError(err) => ApiError::StoreError(err),
            log_service::LogError::NotFound(id) => {
                ApiError::NotFound(format!("Log entry {} not found", id))
            }
        })?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/logs/{id}
/// Get a single log entry by ID
pub async fn get_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<InterfaceLog>> {
    tracing::debug!("Getting log entry: {}", id);

    let entry = log_service::get_log(state.store.as_ref(), id)
        .await
        .map_err(|e| match e {
            log_service::LogError::NotFound(id) => {
                ApiError::NotFound(format!("Log entry {} not found", id))
            }
            log_service::LogError::ValidationError(msg) => ApiError::BadRequest(msg),
            log_service::LogError::StoreError(err) => ApiError::StoreError(err),
        })?;

    Ok(Json(entry))
}

/// GET /api/logs/summary
/// Status counts over a trailing window (default: 24 hours)
pub async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryQuery>,
) -> ApiResult<Json<StatusSummary>> {
    let result = match params.hours.filter(|h| *h > 0) {
        Some(hours) => {
            tracing::debug!("Computing status summary over the last {} hours", hours);
            summary_service::status_summary_window(
                state.store.as_ref(),
                Utc::now(),
                Duration::hours(hours),
            )
            .await
        }
        None => {
            tracing::debug!("Computing status summary over the default window");
            summary_service::status_summary(state.store.as_ref()).await
        }
    };

    let summary = result.map_err(|e| match e {
        summary_service::SummaryError::StoreError(err) => ApiError::StoreError(err),
    })?;

    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub hours: Option<i64>,
}
