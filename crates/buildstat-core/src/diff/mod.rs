//! Snapshot diff engine.
//!
//! Compares the artifact collections of two build snapshots and classifies
//! each artifact as added, removed, or current.
//!
//! ## Entry point
//!
//! ```
//! use buildstat_core::diff::diff_artifacts;
//! use buildstat_core::model::Artifact;
//!
//! let old = vec![Artifact::new("a", "js", 10.0)];
//! let new = vec![Artifact::new("a", "js", 12.0), Artifact::new("b", "js", 5.0)];
//! let delta = diff_artifacts(Some(&old), &new);
//! assert_eq!(delta.added_names(), vec!["b"]);
//! assert!(delta.removed.is_empty());
//! ```
//!
//! ## Guarantees
//!
//! - **Name identity**: artifacts match by `name` only. A renamed artifact
//!   shows up as one removal plus one addition; size or kind changes under
//!   the same name are not reported.
//! - **Stable order**: `added` follows the new collection's order, `removed`
//!   the old collection's order.
//! - **Linear**: one hash lookup per artifact, no pairwise comparison.

pub mod engine;
pub mod model;

pub use engine::{diff_artifacts, diff_snapshots};
pub use model::{ArtifactDelta, SnapshotDelta};
