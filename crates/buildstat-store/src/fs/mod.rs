//! Filesystem adapters

pub mod atomic;
pub mod report_sink;
pub mod snapshot_store;
