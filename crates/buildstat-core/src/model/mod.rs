//! Canonical build snapshot model.

pub mod artifact;
pub mod snapshot;

pub use artifact::{Artifact, ArtifactCollection};
pub use snapshot::Snapshot;
