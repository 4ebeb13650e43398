//! In-memory release manager
//!
//! Everything lives for the lifetime of the value; nothing is persisted.

use crate::error::Result;
use crate::fleet::FleetStateStore;
use crate::manager::{ReleaseManager, ReleaseStats};
use crate::snapshot::SnapshotRegistry;
use crate::types::{DeployRequest, ServiceVersion, SystemVersion};
use async_trait::async_trait;
use parking_lot::Mutex;

/// In-memory release manager
#[derive(Debug, Default)]
pub struct InMemoryReleaseManager {
    fleet: FleetStateStore,
    snapshots: SnapshotRegistry,
    /// Held across upsert → snapshot → record
    deploy_gate: Mutex<()>,
}

impl InMemoryReleaseManager {
    /// Create a manager with an empty fleet and registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Current fleet state
    pub fn fleet(&self) -> &FleetStateStore {
        &self.fleet
    }

    /// Recorded snapshots
    pub fn snapshots(&self) -> &SnapshotRegistry {
        &self.snapshots
    }

    /// Synchronous deploy; the async trait method delegates here.
    pub fn deploy_blocking(&self, request: &DeployRequest) -> Result<SystemVersion> {
        let _gate = self.deploy_gate.lock();
        let service = self
            .fleet
            .set_version(
                request.service_name.as_deref(),
                request.service_version_number,
            )
            .inspect_err(|err| {
                tracing::warn!(
                    service = ?request.service_name,
                    version = ?request.service_version_number,
                    reason = %err,
                    "Rejected deploy"
                );
            })?;
        let recorded = self.snapshots.record(self.fleet.current_snapshot());

        if recorded.created {
            tracing::info!(
                service = %service.service_name,
                version = service.version,
                system_version = %recorded.version,
                "Recorded new system version"
            );
        } else {
            tracing::debug!(
                service = %service.service_name,
                version = service.version,
                system_version = %recorded.version,
                "Reused existing system version"
            );
        }

        Ok(recorded.version)
    }

    /// Synchronous lookup; never fails
    pub fn services_at_blocking(&self, system_version: i64) -> Vec<ServiceVersion> {
        let services = self.snapshots.lookup(system_version);
        tracing::debug!(system_version, services = services.len(), "Looked up system version");
        services
    }

    /// Synchronous counters snapshot
    pub fn stats_blocking(&self) -> ReleaseStats {
        ReleaseStats {
            services: self.fleet.len(),
            snapshots: self.snapshots.len(),
            latest_system_version: self.snapshots.latest(),
        }
    }
}

#[async_trait]
impl ReleaseManager for InMemoryReleaseManager {
    async fn deploy(&self, request: DeployRequest) -> Result<SystemVersion> {
        self.deploy_blocking(&request)
    }

    async fn services_at(&self, system_version: i64) -> Vec<ServiceVersion> {
        self.services_at_blocking(system_version)
    }

    async fn stats(&self) -> ReleaseStats {
        self.stats_blocking()
    }
}
