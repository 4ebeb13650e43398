//! Release Registry - fleet state and system version bookkeeping
//!
//! This crate holds the core of the release manager:
//!
//! - **FleetStateStore**: the current service name → deployed version mapping
//! - **SnapshotRegistry**: deduplicates fleet snapshots and hands out system
//!   version numbers (`1, 2, 3, ...`), one per distinct snapshot
//! - **ReleaseManager**: the deploy/lookup surface that wires the two together
//!
//! ## In-Memory Only
//!
//! Everything lives in process memory for the lifetime of the registry.
//! Numbers are not persisted across restarts.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod error;
pub mod fleet;
pub mod manager;
pub mod memory;
pub mod snapshot;
pub mod types;

// Re-exports
pub use error::{RegistryError, Result};
pub use fleet::FleetStateStore;
pub use manager::{ReleaseManager, ReleaseStats};
pub use memory::InMemoryReleaseManager;
pub use snapshot::{Recorded, SnapshotRegistry};
pub use types::{DeployRequest, ServiceVersion, Snapshot, SystemVersion};
