use crate::model::{Artifact, ArtifactCollection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The canonical state of one completed build.
///
/// Produced by [`crate::normalize::normalize`]; never built from host data
/// any other way. Timestamps are epoch milliseconds as reported by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Build tool version string
    pub version: String,

    /// Build content hash
    pub hash: String,

    /// Output directory reported by the host
    pub output_path: String,

    /// Compilation start, epoch milliseconds
    pub start_time: i64,

    /// Compilation end, epoch milliseconds
    pub end_time: i64,

    /// `(end_time - start_time) / 1000`; negative values are kept as-is
    pub duration_seconds: f64,

    /// Modules in host emission order
    pub modules: Vec<Artifact>,

    /// Assets in host emission order
    pub assets: Vec<Artifact>,
}

impl Snapshot {
    /// Borrow one of the two artifact collections
    pub fn collection(&self, collection: ArtifactCollection) -> &[Artifact] {
        match collection {
            ArtifactCollection::Modules => &self.modules,
            ArtifactCollection::Assets => &self.assets,
        }
    }

    /// Start time as a UTC timestamp, if representable
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.start_time)
    }

    /// End time as a UTC timestamp, if representable
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.end_time)
    }
}

/// Compute the build duration in seconds from millisecond timestamps.
pub fn duration_seconds(start_time: i64, end_time: i64) -> f64 {
    // i128 keeps the subtraction exact for any pair of i64 inputs
    (i128::from(end_time) - i128::from(start_time)) as f64 / 1000.0
}
