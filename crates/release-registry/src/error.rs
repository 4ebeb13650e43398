//! Registry error types

use thiserror::Error;

pub(crate) const BLANK_SERVICE_NAME: &str = "Service name should not be null or blank";
pub(crate) const MISSING_VERSION_NUMBER: &str = "Service version number should not be null";
pub(crate) const VERSION_NUMBER_TOO_LOW: &str =
    "Service version number should not be less than 1";
pub(crate) const SYSTEM_VERSION_TOO_LOW: &str = "System version number should not be less than 1";

/// Registry errors
///
/// Lookups never fail; only deploy input can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Input failed validation; carries the reason
    #[error("{0}")]
    InvalidArgument(String),
}

impl RegistryError {
    pub(crate) fn invalid(message: &str) -> Self {
        RegistryError::InvalidArgument(message.to_string())
    }

    /// Human-readable reason, without any prefix
    pub fn message(&self) -> &str {
        match self {
            RegistryError::InvalidArgument(message) => message,
        }
    }
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
