//! Value types shared by the fleet store and the snapshot registry

use crate::error::{
    RegistryError, Result, BLANK_SERVICE_NAME, MISSING_VERSION_NUMBER, SYSTEM_VERSION_TOO_LOW,
    VERSION_NUMBER_TOO_LOW,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A service deployed at a specific version
///
/// Ordering is by name, then version, which fixes the output order of
/// snapshot listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceVersion {
    /// Service name as supplied by the deployer
    pub service_name: String,
    /// Deployed version, at least 1
    #[serde(rename = "serviceVersionNumber")]
    pub version: u64,
}

impl ServiceVersion {
    /// Build a pair without validation
    pub fn new(service_name: impl Into<String>, version: u64) -> Self {
        Self {
            service_name: service_name.into(),
            version,
        }
    }

    /// Validate raw deploy input into a pair.
    ///
    /// Checks run in a fixed order: name, version presence, version range.
    /// The name is kept as supplied; trimming only decides blankness.
    pub fn try_new(service_name: Option<&str>, version: Option<i64>) -> Result<Self> {
        let service_name = match service_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(RegistryError::invalid(BLANK_SERVICE_NAME)),
        };
        let version = version.ok_or_else(|| RegistryError::invalid(MISSING_VERSION_NUMBER))?;
        let version =
            u64::try_from(version).map_err(|_| RegistryError::invalid(VERSION_NUMBER_TOO_LOW))?;
        if version < 1 {
            return Err(RegistryError::invalid(VERSION_NUMBER_TOO_LOW));
        }

        Ok(Self::new(service_name, version))
    }
}

impl fmt::Display for ServiceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.service_name, self.version)
    }
}

/// Raw deploy input, exactly as a client sent it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    /// Missing, `null` or blank is rejected
    #[serde(default)]
    pub service_name: Option<String>,
    /// Missing, `null` or below 1 is rejected
    #[serde(default)]
    pub service_version_number: Option<i64>,
}

impl DeployRequest {
    /// Request with both fields present
    pub fn new(service_name: impl Into<String>, service_version_number: i64) -> Self {
        Self {
            service_name: Some(service_name.into()),
            service_version_number: Some(service_version_number),
        }
    }
}

/// The whole fleet at one point in time
///
/// Equality and hashing are by set content, so two snapshots built in a
/// different insertion order compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeSet<ServiceVersion>);

impl Snapshot {
    /// Empty fleet
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the exact pair is part of this snapshot
    pub fn contains(&self, service: &ServiceVersion) -> bool {
        self.0.contains(service)
    }

    /// Number of services in the snapshot
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for an empty fleet
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = &ServiceVersion> {
        self.0.iter()
    }

    /// Listing sorted by service name
    pub fn to_vec(&self) -> Vec<ServiceVersion> {
        self.0.iter().cloned().collect()
    }
}

impl FromIterator<ServiceVersion> for Snapshot {
    fn from_iter<I: IntoIterator<Item = ServiceVersion>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Snapshot {
    type Item = ServiceVersion;
    type IntoIter = std::collections::btree_set::IntoIter<ServiceVersion>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Fleet-wide version number, starting at 1
///
/// Deserializing rejects 0, so every value in circulation is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct SystemVersion(u64);

impl SystemVersion {
    /// Number given to the first snapshot ever recorded
    pub const FIRST: SystemVersion = SystemVersion(1);

    /// The plain number
    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u64 + 1)
    }

    pub(crate) fn index(self) -> Option<usize> {
        self.0
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
    }

    /// Accepts any integer; only positive values name a version
    pub fn from_raw(raw: i64) -> Option<Self> {
        u64::try_from(raw).ok().filter(|n| *n >= 1).map(Self)
    }
}

impl TryFrom<u64> for SystemVersion {
    type Error = RegistryError;

    fn try_from(raw: u64) -> Result<Self> {
        if raw < 1 {
            return Err(RegistryError::invalid(SYSTEM_VERSION_TOO_LOW));
        }
        Ok(Self(raw))
    }
}

impl From<SystemVersion> for u64 {
    fn from(version: SystemVersion) -> Self {
        version.0
    }
}

impl fmt::Display for SystemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_order() {
        let err = ServiceVersion::try_new(None, None).unwrap_err();
        assert_eq!(err.message(), BLANK_SERVICE_NAME);

        let err = ServiceVersion::try_new(Some("   "), Some(1)).unwrap_err();
        assert_eq!(err.message(), BLANK_SERVICE_NAME);

        let err = ServiceVersion::try_new(Some("Service A"), None).unwrap_err();
        assert_eq!(err.message(), MISSING_VERSION_NUMBER);

        let err = ServiceVersion::try_new(Some("Service A"), Some(0)).unwrap_err();
        assert_eq!(err.message(), VERSION_NUMBER_TOO_LOW);

        let err = ServiceVersion::try_new(Some("Service A"), Some(-7)).unwrap_err();
        assert_eq!(err.message(), VERSION_NUMBER_TOO_LOW);
    }

    #[test]
    fn test_name_kept_untrimmed() {
        let service = ServiceVersion::try_new(Some(" Service A "), Some(3)).unwrap();
        assert_eq!(service.service_name, " Service A ");
        assert_eq!(service.version, 3);
    }

    #[test]
    fn test_snapshot_equality_ignores_insertion_order() {
        let a: Snapshot = [ServiceVersion::new("A", 1), ServiceVersion::new("B", 2)]
            .into_iter()
            .collect();
        let b: Snapshot = [ServiceVersion::new("B", 2), ServiceVersion::new("A", 1)]
            .into_iter()
            .collect();
        assert_eq!(a, b);

        let c: Snapshot = [ServiceVersion::new("A", 1)].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn test_service_version_json_shape() {
        let json = serde_json::to_value(ServiceVersion::new("Service A", 1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "serviceName": "Service A", "serviceVersionNumber": 1 })
        );
    }

    #[test]
    fn test_deploy_request_accepts_nulls_and_missing_keys() {
        let req: DeployRequest =
            serde_json::from_str(r#"{"serviceName": null, "serviceVersionNumber": 1}"#).unwrap();
        assert_eq!(req.service_name, None);
        assert_eq!(req.service_version_number, Some(1));

        let req: DeployRequest = serde_json::from_str(r#"{"serviceName": "A"}"#).unwrap();
        assert_eq!(req.service_version_number, None);
    }

    #[test]
    fn test_system_version_from_raw() {
        assert_eq!(SystemVersion::from_raw(1), Some(SystemVersion::FIRST));
        assert_eq!(SystemVersion::from_raw(0), None);
        assert_eq!(SystemVersion::from_raw(-3), None);
        assert_eq!(serde_json::to_string(&SystemVersion::FIRST).unwrap(), "1");
    }

    #[test]
    fn test_system_version_rejects_zero() {
        assert!(serde_json::from_str::<SystemVersion>("0").is_err());
        assert_eq!(
            SystemVersion::try_from(0u64).unwrap_err().message(),
            SYSTEM_VERSION_TOO_LOW
        );

        let version: SystemVersion = serde_json::from_str("3").unwrap();
        assert_eq!(version.get(), 3);
        assert_eq!(version.index(), Some(2));
        assert_eq!(SystemVersion::FIRST.index(), Some(0));
    }
}
