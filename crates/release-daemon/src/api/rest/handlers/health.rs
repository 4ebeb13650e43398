//! Health and status handlers

use crate::api::rest::state::AppState;
use axum::{extract::State, Json};
use release_registry::ReleaseStats;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
    })
}

/// Daemon status response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaemonStatusResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub stats: ReleaseStats,
}

/// Daemon status endpoint
pub async fn daemon_status(State(state): State<AppState>) -> Json<DaemonStatusResponse> {
    let stats = state.manager.stats().await;

    Json(DaemonStatusResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
        started_at: state.started_at,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::rest::create_router;
    use crate::config::ServerConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use release_registry::{DeployRequest, InMemoryReleaseManager, ReleaseManager};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_returns_200() {
        let state = AppState::new(Arc::new(InMemoryReleaseManager::new()));
        let app = create_router(state, &ServerConfig::default());

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: HealthCheckResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.status, "healthy");
        assert_eq!(json.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn status_reports_registry_counters() {
        let manager = Arc::new(InMemoryReleaseManager::new());
        manager.deploy(DeployRequest::new("Service A", 1)).await.unwrap();
        manager.deploy(DeployRequest::new("Service B", 1)).await.unwrap();
        manager.deploy(DeployRequest::new("Service B", 1)).await.unwrap();

        let app = create_router(AppState::new(manager), &ServerConfig::default());
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let raw: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(raw.get("startedAt").is_some());
        assert_eq!(raw["stats"]["latestSystemVersion"], 2);
        assert!(raw.get("started_at").is_none());

        let json: DaemonStatusResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(json.stats.services, 2);
        assert_eq!(json.stats.snapshots, 2);
        assert_eq!(json.stats.latest_system_version.map(|v| v.get()), Some(2));
    }
}
