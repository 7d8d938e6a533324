use serde::{Deserialize, Serialize};

/// A named build output: a module or an asset.
///
/// `name` is the sole identity key across snapshots. It is stored verbatim,
/// so names differing only by case or whitespace are distinct artifacts.
///
/// Serialized field names match the host tool's raw shape (`type`, `size`)
/// so a persisted snapshot can be fed back through the normalizer unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    /// Identity key, unique within one collection of one snapshot
    pub name: String,

    /// Category reported by the host (module type, asset type)
    #[serde(rename = "type")]
    pub kind: String,

    /// Size in KB, never negative
    #[serde(rename = "size")]
    pub size_kb: f64,

    /// Module was (re)built in this compilation
    #[serde(default)]
    pub built: bool,

    /// Output was served from the host's cache
    #[serde(default)]
    pub cached: bool,
}

impl Artifact {
    /// Create an artifact with the flags cleared
    pub fn new(name: impl Into<String>, kind: impl Into<String>, size_kb: f64) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            size_kb,
            built: false,
            cached: false,
        }
    }

    /// Set the module-only presentation flags
    pub fn with_flags(mut self, built: bool, cached: bool) -> Self {
        self.built = built;
        self.cached = cached;
        self
    }
}

/// The two artifact collections of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactCollection {
    Modules,
    Assets,
}

impl ArtifactCollection {
    /// Field name in the raw compilation result
    pub fn key(&self) -> &'static str {
        match self {
            ArtifactCollection::Modules => "modules",
            ArtifactCollection::Assets => "assets",
        }
    }

    /// Singular label used in rendered reports
    pub fn item_label(&self) -> &'static str {
        match self {
            ArtifactCollection::Modules => "Module",
            ArtifactCollection::Assets => "Asset",
        }
    }
}
