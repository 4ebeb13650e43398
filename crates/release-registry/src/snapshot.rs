//! Snapshot registry
//!
//! Maps every distinct fleet snapshot ever seen to a system version number.
//! Numbers start at 1 and grow by one per new snapshot; a snapshot that was
//! already recorded gets its old number back, even if newer ones exist.
//!
//! The number table and the content index sit behind one lock, so the
//! "seen before? else allocate" decision is a single critical section.

use crate::types::{ServiceVersion, Snapshot, SystemVersion};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Outcome of recording a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorded {
    /// Number the snapshot is filed under
    pub version: SystemVersion,
    /// `false` when an existing number was reused
    pub created: bool,
}

#[derive(Debug, Default)]
struct Inner {
    /// Append-only; `by_number[n - 1]` is the snapshot of version `n`
    by_number: Vec<Snapshot>,
    by_content: HashMap<Snapshot, SystemVersion>,
}

/// Append-only snapshot → system version registry
#[derive(Debug, Default)]
pub struct SnapshotRegistry {
    inner: Mutex<Inner>,
}

impl SnapshotRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number for `snapshot`, allocating one if it is new
    pub fn record(&self, snapshot: Snapshot) -> Recorded {
        let mut inner = self.inner.lock();

        if let Some(version) = inner.by_content.get(&snapshot) {
            return Recorded {
                version: *version,
                created: false,
            };
        }

        let version = SystemVersion::from_index(inner.by_number.len());
        inner.by_number.push(snapshot.clone());
        inner.by_content.insert(snapshot, version);

        Recorded {
            version,
            created: true,
        }
    }

    /// Services recorded under `number`, sorted by name.
    ///
    /// Unknown, zero and negative numbers give an empty list.
    pub fn lookup(&self, number: i64) -> Vec<ServiceVersion> {
        SystemVersion::from_raw(number)
            .and_then(|version| self.get(version))
            .map(|snapshot| snapshot.to_vec())
            .unwrap_or_default()
    }

    /// Snapshot recorded under `version`, if it was ever issued
    pub fn get(&self, version: SystemVersion) -> Option<Snapshot> {
        let index = version.index()?;
        self.inner.lock().by_number.get(index).cloned()
    }

    /// Highest number issued so far
    pub fn latest(&self) -> Option<SystemVersion> {
        let inner = self.inner.lock();
        inner
            .by_number
            .len()
            .checked_sub(1)
            .map(SystemVersion::from_index)
    }

    /// Number of distinct snapshots recorded
    pub fn len(&self) -> usize {
        self.inner.lock().by_number.len()
    }

    /// True until the first snapshot is recorded
    pub fn is_empty(&self) -> bool {
        self.inner.lock().by_number.is_empty()
    }
}
