//! Fleet state store
//!
//! Holds which version of each service is deployed right now. One entry
//! per service name; the last deploy wins.

use crate::error::Result;
use crate::types::{ServiceVersion, Snapshot};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Current service name → deployed version mapping
#[derive(Debug, Default)]
pub struct FleetStateStore {
    services: RwLock<BTreeMap<String, u64>>,
}

impl FleetStateStore {
    /// Create an empty fleet
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `version` as the deployed version of `service_name`.
    ///
    /// Input is validated before the map is touched, so a rejected call
    /// leaves the fleet unchanged.
    pub fn set_version(
        &self,
        service_name: Option<&str>,
        version: Option<i64>,
    ) -> Result<ServiceVersion> {
        let service = ServiceVersion::try_new(service_name, version)?;
        self.upsert(&service);
        Ok(service)
    }

    fn upsert(&self, service: &ServiceVersion) {
        self.services
            .write()
            .insert(service.service_name.clone(), service.version);
    }

    /// Point-in-time copy of the whole fleet
    pub fn current_snapshot(&self) -> Snapshot {
        self.services
            .read()
            .iter()
            .map(|(name, version)| ServiceVersion::new(name.clone(), *version))
            .collect()
    }

    /// Deployed version of `service_name`, if it was ever deployed
    pub fn version_of(&self, service_name: &str) -> Option<u64> {
        self.services.read().get(service_name).copied()
    }

    /// Number of distinct services deployed
    pub fn len(&self) -> usize {
        self.services.read().len()
    }

    /// True until the first successful deploy
    pub fn is_empty(&self) -> bool {
        self.services.read().is_empty()
    }
}
