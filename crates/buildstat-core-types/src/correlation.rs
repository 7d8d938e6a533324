//! Correlation types for build-event tracking
//!
//! Each build-completion notification gets one `BuildEventId`. Every
//! structured log event emitted while handling that notification carries it,
//! so the normalize / load / save / render steps of one build can be grouped.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single build-completion event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildEventId(String);

impl BuildEventId {
    /// Generate a new BuildEventId using UUIDv7 (time-ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for BuildEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BuildEventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
