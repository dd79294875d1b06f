//! Dialogue store port.
//!
//! Defines the contract for loading and persisting dialogue strategy
//! snapshots. Writes carry an optimistic version check: concurrent
//! transitions for the same dialogue would otherwise silently drop a
//! stage bump or interest delta, so a stale write must fail loudly and
//! be retried against a fresh snapshot.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::DialogueId;
use crate::domain::strategy::DialogueState;

/// Monotonic version of a stored snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Version of a dialogue that has never been stored.
    pub fn initial() -> Self {
        Self(0)
    }

    /// The version after one successful write.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw counter.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::initial()
    }
}

/// A snapshot together with the version it was read at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedDialogue {
    pub state: DialogueState,
    pub version: Version,
}

/// Errors surfaced by dialogue store implementations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DialogueStoreError {
    /// The snapshot changed since it was read; reload and retry.
    #[error("Version conflict on dialogue {dialogue_id}: expected {expected:?}, stored {stored:?}")]
    VersionConflict {
        dialogue_id: DialogueId,
        expected: Version,
        stored: Version,
    },

    /// No snapshot exists for the dialogue.
    #[error("Dialogue not found: {0}")]
    NotFound(DialogueId),

    /// The backing store failed.
    #[error("Dialogue store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence port for dialogue strategy snapshots.
///
/// Implementations must apply the version check atomically with the
/// write; the check is the lost-update guard for callers that cannot
/// hold a per-dialogue lock across the transition.
#[async_trait]
pub trait DialogueStore: Send + Sync {
    /// Loads the current snapshot, or `None` for a dialogue that has
    /// not been stored yet.
    async fn find(&self, id: &DialogueId) -> Result<Option<VersionedDialogue>, DialogueStoreError>;

    /// Persists a new snapshot.
    ///
    /// `expected_version` is the version the snapshot was read at
    /// ([`Version::initial`] for a dialogue never stored before).
    /// Returns the version assigned to the write.
    ///
    /// # Errors
    ///
    /// - `VersionConflict` if the stored version differs from
    ///   `expected_version`
    /// - `Unavailable` on backing store failure
    async fn save(
        &self,
        id: &DialogueId,
        state: DialogueState,
        expected_version: Version,
    ) -> Result<Version, DialogueStoreError>;

    /// Removes a dialogue snapshot (retirement is driven externally,
    /// never by the engine).
    ///
    /// # Errors
    ///
    /// - `NotFound` if no snapshot exists
    async fn delete(&self, id: &DialogueId) -> Result<(), DialogueStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialogue_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn DialogueStore) {}
    }

    #[test]
    fn version_starts_at_zero_and_increments() {
        let v = Version::initial();
        assert_eq!(v.value(), 0);
        assert_eq!(v.next().value(), 1);
        assert_eq!(v.next().next().value(), 2);
    }

    #[test]
    fn version_serializes_as_bare_number() {
        let json = serde_json::to_string(&Version::initial().next()).unwrap();
        assert_eq!(json, "1");
    }
}
