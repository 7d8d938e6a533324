//! buildstat Core - build snapshot normalization, diffing and reporting
//!
//! This crate provides the pure kernel of buildstat:
//! - Canonical snapshot and artifact models
//! - Normalization of raw compilation-result JSON
//! - Name-keyed artifact diffing between consecutive builds
//! - Report assembly and rendering (Markdown, JSON)
//! - Store and sink ports with in-memory implementations
//!
//! Filesystem adapters live in `buildstat-store`; orchestration of a build
//! event lives in `buildstat-engine`.

pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod render;
pub mod report;
pub mod store;

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, ReporterConfig};
pub use diff::{diff_artifacts, diff_snapshots, ArtifactDelta, SnapshotDelta};
pub use errors::{ExError, ExErrorKind, Result, SnapshotError};
pub use model::{Artifact, ArtifactCollection, Snapshot};
pub use normalize::{normalize, normalize_bytes, NormalizeWarning, Normalized};
pub use render::{RenderContext, ReportFormat, ReportRenderer, ReportSink};
pub use report::{assemble, assemble_with, AssembleOptions, Report};
pub use store::{MemorySnapshotStore, SnapshotStore};
