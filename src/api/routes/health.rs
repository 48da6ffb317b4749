//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (text generation is configured)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 503 while no text-generation key is configured. Calculator and
/// render endpoints still work in that state.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.ai.is_configured() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let configured = state.ai.is_configured();

    Json(HealthResponse {
        status: if configured { "healthy" } else { "degraded" }.to_string(),
        ai: if configured { "configured" } else { "unconfigured" }.to_string(),
        chat_sessions: state.session_count().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiHandle;
    use crate::config::ApiConfig;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unconfigured_is_degraded() {
        let state = Arc::new(AppState::new(AiHandle::Unconfigured, ApiConfig::default()));
        assert_eq!(
            readiness(State(Arc::clone(&state))).await,
            StatusCode::SERVICE_UNAVAILABLE
        );

        let Json(health) = full_health(State(state)).await;
        assert_eq!(health.status, "degraded");
        assert_eq!(health.ai, "unconfigured");
        assert_eq!(health.chat_sessions, 0);
    }
}
