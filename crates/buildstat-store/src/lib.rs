//! buildstat Store - filesystem adapters
//!
//! Provides:
//! - `FsSnapshotStore`: the single-slot `stats.json` snapshot record
//! - `FsReportSink`: timestamped, never-overwritten report files
//! - Atomic temp→rename writes

pub mod errors;
pub mod fs;

// Re-export key types
pub use errors::Result;
pub use fs::report_sink::FsReportSink;
pub use fs::snapshot_store::{FsSnapshotStore, SNAPSHOT_RECORD};
