//! Snapshot diff output types.

use crate::model::{Artifact, ArtifactCollection};
use serde::{Deserialize, Serialize};

/// Classification of one artifact collection against its previous version.
///
/// There is no "updated" bucket: an artifact whose name is in
/// both collections is retained regardless of size or kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactDelta {
    /// In the new collection, name absent from the old one (new order)
    pub added: Vec<Artifact>,
    /// In the old collection, name absent from the new one (old order)
    pub removed: Vec<Artifact>,
    /// The new collection in full
    pub current: Vec<Artifact>,
}

impl ArtifactDelta {
    /// True when nothing was added or removed
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Names of added artifacts, in order
    pub fn added_names(&self) -> Vec<&str> {
        self.added.iter().map(|a| a.name.as_str()).collect()
    }

    /// Names of removed artifacts, in order
    pub fn removed_names(&self) -> Vec<&str> {
        self.removed.iter().map(|a| a.name.as_str()).collect()
    }
}

/// Per-collection deltas between two snapshots.
///
/// Modules and assets are diffed independently and never merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotDelta {
    pub modules: ArtifactDelta,
    pub assets: ArtifactDelta,
}

impl SnapshotDelta {
    /// Borrow the delta for one collection
    pub fn collection(&self, collection: ArtifactCollection) -> &ArtifactDelta {
        match collection {
            ArtifactCollection::Modules => &self.modules,
            ArtifactCollection::Assets => &self.assets,
        }
    }

    /// True when neither collection gained or lost an artifact
    pub fn is_unchanged(&self) -> bool {
        self.modules.is_unchanged() && self.assets.is_unchanged()
    }
}
