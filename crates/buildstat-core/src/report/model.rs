//! Report value types.

use crate::model::{Artifact, ArtifactCollection};
use serde::{Deserialize, Serialize};

/// The assembled report: a title plus ordered sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub title: String,
    pub sections: Vec<ReportSection>,
}

impl Report {
    /// The summary section, if present (always first in assembled reports)
    pub fn summary(&self) -> Option<&SummarySection> {
        self.sections.iter().find_map(|s| match s {
            ReportSection::Summary(summary) => Some(summary),
            ReportSection::Listing(_) => None,
        })
    }

    /// The listing section of the given kind, if present
    pub fn listing(&self, kind: ListingKind) -> Option<&ListingSection> {
        self.sections.iter().find_map(|s| match s {
            ReportSection::Listing(listing) if listing.kind == kind => Some(listing),
            _ => None,
        })
    }

    /// Kinds of all listing sections, in report order
    pub fn listing_kinds(&self) -> Vec<ListingKind> {
        self.sections
            .iter()
            .filter_map(|s| match s {
                ReportSection::Listing(listing) => Some(listing.kind),
                ReportSection::Summary(_) => None,
            })
            .collect()
    }

    /// True when the report carries added/removed sections
    pub fn has_diff_sections(&self) -> bool {
        self.listing_kinds().iter().any(|k| k.is_diff())
    }
}

/// One report section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum ReportSection {
    Summary(SummarySection),
    Listing(ListingSection),
}

/// Single-snapshot facts grouped under headings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummarySection {
    pub groups: Vec<FieldGroup>,
}

impl SummarySection {
    /// Look up a field value by label across all groups
    pub fn field(&self, label: &str) -> Option<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.fields.iter())
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// A heading with labelled values beneath it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldGroup {
    pub heading: String,
    pub fields: Vec<LabeledField>,
}

/// A `label: value` pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabeledField {
    pub label: String,
    pub value: String,
}

impl LabeledField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A labelled collection of artifacts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingSection {
    pub kind: ListingKind,
    pub artifacts: Vec<Artifact>,
}

/// Which artifacts a listing section holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    CurrentModules,
    AddedModules,
    RemovedModules,
    CurrentAssets,
    AddedAssets,
    RemovedAssets,
}

impl ListingKind {
    pub fn current(collection: ArtifactCollection) -> Self {
        match collection {
            ArtifactCollection::Modules => ListingKind::CurrentModules,
            ArtifactCollection::Assets => ListingKind::CurrentAssets,
        }
    }

    pub fn added(collection: ArtifactCollection) -> Self {
        match collection {
            ArtifactCollection::Modules => ListingKind::AddedModules,
            ArtifactCollection::Assets => ListingKind::AddedAssets,
        }
    }

    pub fn removed(collection: ArtifactCollection) -> Self {
        match collection {
            ArtifactCollection::Modules => ListingKind::RemovedModules,
            ArtifactCollection::Assets => ListingKind::RemovedAssets,
        }
    }

    /// The collection this listing draws from
    pub fn collection(&self) -> ArtifactCollection {
        match self {
            ListingKind::CurrentModules | ListingKind::AddedModules | ListingKind::RemovedModules => {
                ArtifactCollection::Modules
            }
            ListingKind::CurrentAssets | ListingKind::AddedAssets | ListingKind::RemovedAssets => {
                ArtifactCollection::Assets
            }
        }
    }

    /// True for added/removed listings
    pub fn is_diff(&self) -> bool {
        !matches!(self, ListingKind::CurrentModules | ListingKind::CurrentAssets)
    }

    /// Section heading used by renderers
    pub fn heading(&self) -> &'static str {
        match self {
            ListingKind::CurrentModules => "Module Information",
            ListingKind::AddedModules => "Added Modules",
            ListingKind::RemovedModules => "Removed Modules",
            ListingKind::CurrentAssets => "Assets Information",
            ListingKind::AddedAssets => "Added Assets",
            ListingKind::RemovedAssets => "Removed Assets",
        }
    }
}
