//! Snapshot persistence port.
//!
//! The store holds a single slot: the most recent snapshot. Adapters live in
//! `buildstat-store`; [`MemorySnapshotStore`] is provided here for tests and
//! embedding.

use crate::errors::Result;
use crate::model::Snapshot;
use std::sync::{Mutex, MutexGuard};

/// Single-slot snapshot persistence.
pub trait SnapshotStore {
    /// Read the previous snapshot, `None` when nothing usable is recorded
    ///
    /// # Errors
    /// Returns `StoreUnavailable` when the medium cannot be read.
    fn load(&self) -> Result<Option<Snapshot>>;

    /// Overwrite the slot with `snapshot`
    ///
    /// # Errors
    /// Returns `StoreUnavailable` when the medium cannot be written.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Forget the recorded snapshot; clearing an empty slot succeeds
    ///
    /// # Errors
    /// Returns `StoreUnavailable` when the record cannot be removed.
    fn clear(&self) -> Result<()>;
}

/// Snapshot store backed by process memory.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slot: Mutex<Option<Snapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `snapshot`
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot)),
        }
    }

    /// Current slot contents
    pub fn current(&self) -> Option<Snapshot> {
        self.slot().clone()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Snapshot>> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.slot().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        *self.slot() = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}
