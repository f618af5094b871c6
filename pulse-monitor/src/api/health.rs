//! Liveness endpoint

/// GET /health
///
/// Reports that the process is up and serving. Storage reachability is
/// surfaced per-request as 503, not here.
pub async fn health_check() -> &'static str {
    "OK"
}
