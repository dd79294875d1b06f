//! In-memory dialogue store implementation.
//!
//! This adapter provides an in-memory implementation of the
//! `DialogueStore` port. Useful for:
//! - Development and testing environments
//! - Single-server deployments without persistence requirements
//!
//! For production deployments requiring persistence, use a
//! database-backed implementation instead.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::DialogueId;
use crate::domain::strategy::DialogueState;
use crate::ports::{DialogueStore, DialogueStoreError, Version, VersionedDialogue};

/// In-memory implementation of the [`DialogueStore`] port.
///
/// Thread-safe via internal `Mutex`; the version check runs under the
/// same lock as the write, so conflicting writers observe
/// `VersionConflict` rather than losing an update. Does not persist data
/// across restarts.
#[derive(Default)]
pub struct InMemoryDialogueStore {
    rows: Mutex<HashMap<DialogueId, VersionedDialogue>>,
}

impl InMemoryDialogueStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored dialogues.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Returns true if no dialogues are stored.
    pub fn is_empty(&self) -> bool {
        self.rows.lock().unwrap().is_empty()
    }

    /// Clears all stored dialogues.
    ///
    /// Useful for testing scenarios that need a clean slate.
    pub fn clear(&self) {
        self.rows.lock().unwrap().clear();
    }
}

#[async_trait]
impl DialogueStore for InMemoryDialogueStore {
    async fn find(&self, id: &DialogueId) -> Result<Option<VersionedDialogue>, DialogueStoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.get(id).cloned())
    }

    async fn save(
        &self,
        id: &DialogueId,
        state: DialogueState,
        expected_version: Version,
    ) -> Result<Version, DialogueStoreError> {
        let mut rows = self.rows.lock().unwrap();

        let stored_version = rows
            .get(id)
            .map(|row| row.version)
            .unwrap_or_else(Version::initial);
        if stored_version != expected_version {
            return Err(DialogueStoreError::VersionConflict {
                dialogue_id: *id,
                expected: expected_version,
                stored: stored_version,
            });
        }

        let new_version = expected_version.next();
        rows.insert(
            *id,
            VersionedDialogue {
                state,
                version: new_version,
            },
        );
        Ok(new_version)
    }

    async fn delete(&self, id: &DialogueId) -> Result<(), DialogueStoreError> {
        let mut rows = self.rows.lock().unwrap();
        rows.remove(id)
            .map(|_| ())
            .ok_or(DialogueStoreError::NotFound(*id))
    }
}
