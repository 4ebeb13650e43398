//! Service deploy and system version lookup handlers

use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use release_registry::{DeployRequest, ServiceVersion, SystemVersion};
use serde::Deserialize;

/// Query parameters for a system version lookup
#[derive(Debug, Deserialize)]
pub struct SystemVersionQuery {
    #[serde(rename = "systemVersion")]
    pub system_version: i64,
}

/// Deploy a service; responds with the resulting system version as a bare integer
pub async fn deploy_service(
    State(state): State<AppState>,
    payload: Result<Json<DeployRequest>, JsonRejection>,
) -> ApiResult<Json<SystemVersion>> {
    let Json(request) = payload?;
    let version = state.manager.deploy(request).await?;
    Ok(Json(version))
}

/// List the services recorded under a system version
pub async fn get_services_by_system_version(
    State(state): State<AppState>,
    query: Result<Query<SystemVersionQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ServiceVersion>>> {
    let Query(query) = query?;
    let services = state.manager.services_at(query.system_version).await;
    Ok(Json(services))
}
