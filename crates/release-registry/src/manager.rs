//! Release manager trait
//!
//! The deploy/lookup surface the HTTP layer talks to.

use crate::error::Result;
use crate::types::{DeployRequest, ServiceVersion, SystemVersion};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Counters describing the registry contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseStats {
    /// Services currently in the fleet
    pub services: usize,
    /// Distinct snapshots recorded
    pub snapshots: usize,
    /// Highest system version issued, `None` before the first deploy
    pub latest_system_version: Option<SystemVersion>,
}

/// Deploys services and resolves system versions
#[async_trait]
pub trait ReleaseManager: Send + Sync {
    /// Deploy a service and return the system version of the resulting fleet
    async fn deploy(&self, request: DeployRequest) -> Result<SystemVersion>;

    /// Services that made up the fleet at `system_version`
    ///
    /// Never fails: unknown numbers resolve to an empty list.
    async fn services_at(&self, system_version: i64) -> Vec<ServiceVersion>;

    /// Current registry counters
    async fn stats(&self) -> ReleaseStats;
}
