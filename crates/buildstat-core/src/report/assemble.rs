//! Report assembler.
//!
//! Pure transformation from snapshots to a [`Report`]; performs no I/O.

use crate::diff::diff_artifacts;
use crate::model::{ArtifactCollection, Snapshot};
use crate::report::model::{
    FieldGroup, LabeledField, ListingKind, ListingSection, Report, ReportSection, SummarySection,
};

/// Default report title
pub const DEFAULT_TITLE: &str = "Build Compilation Report";

/// Summary field labels, shared with renderers and tests.
pub mod labels {
    pub const BUILD_INFORMATION: &str = "Build Information";
    pub const COMPILATION_SUMMARY: &str = "Compilation Summary";
    pub const TOOL_VERSION: &str = "Tool version";
    pub const OUTPUT_PATH: &str = "Output path";
    pub const HASH: &str = "Compilation hash";
    pub const START: &str = "Compilation start";
    pub const END: &str = "Compilation end";
    pub const TIME_USED: &str = "Time used (in seconds)";
}

/// Knobs the host can set on assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembleOptions {
    /// Emit added/removed asset listings when a previous snapshot exists
    pub diff_assets: bool,
    /// Report title
    pub title: String,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            diff_assets: true,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// Assemble a report with default options.
pub fn assemble(current: &Snapshot, previous: Option<&Snapshot>) -> Report {
    assemble_with(current, previous, &AssembleOptions::default())
}

/// Assemble a report.
///
/// The diff engine is only consulted when `previous` is `Some`; with `None`
/// the report holds the summary and the two current listings only.
pub fn assemble_with(
    current: &Snapshot,
    previous: Option<&Snapshot>,
    options: &AssembleOptions,
) -> Report {
    let mut sections = vec![ReportSection::Summary(summary_section(current))];

    for collection in [ArtifactCollection::Modules, ArtifactCollection::Assets] {
        sections.push(listing(
            ListingKind::current(collection),
            current.collection(collection).to_vec(),
        ));

        let Some(previous) = previous else {
            continue;
        };
        if collection == ArtifactCollection::Assets && !options.diff_assets {
            continue;
        }

        let delta = diff_artifacts(
            Some(previous.collection(collection)),
            current.collection(collection),
        );
        sections.push(listing(ListingKind::added(collection), delta.added));
        sections.push(listing(ListingKind::removed(collection), delta.removed));
    }

    Report {
        title: options.title.clone(),
        sections,
    }
}

fn listing(kind: ListingKind, artifacts: Vec<crate::model::Artifact>) -> ReportSection {
    ReportSection::Listing(ListingSection { kind, artifacts })
}

fn format_timestamp(millis: i64, at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    match at {
        Some(t) => t.to_rfc3339(),
        None => millis.to_string(),
    }
}

fn summary_section(snapshot: &Snapshot) -> SummarySection {
    SummarySection {
        groups: vec![
            FieldGroup {
                heading: labels::BUILD_INFORMATION.to_string(),
                fields: vec![
                    LabeledField::new(labels::TOOL_VERSION, snapshot.version.as_str()),
                    LabeledField::new(labels::OUTPUT_PATH, snapshot.output_path.as_str()),
                ],
            },
            FieldGroup {
                heading: labels::COMPILATION_SUMMARY.to_string(),
                fields: vec![
                    LabeledField::new(labels::HASH, snapshot.hash.as_str()),
                    LabeledField::new(
                        labels::START,
                        format_timestamp(snapshot.start_time, snapshot.started_at()),
                    ),
                    LabeledField::new(
                        labels::END,
                        format_timestamp(snapshot.end_time, snapshot.ended_at()),
                    ),
                    LabeledField::new(labels::TIME_USED, snapshot.duration_seconds.to_string()),
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Artifact;

    fn art(name: &str, size: f64) -> Artifact {
        Artifact::new(name, "javascript/auto", size)
    }

    fn snapshot(modules: Vec<Artifact>, assets: Vec<Artifact>) -> Snapshot {
        Snapshot {
            version: "5.88.0".to_string(),
            hash: "abc123".to_string(),
            output_path: "/project/dist".to_string(),
            start_time: 1_700_000_000_000,
            end_time: 1_700_000_002_500,
            duration_seconds: 2.5,
            modules,
            assets,
        }
    }

    const FULL_ORDER: [ListingKind; 6] = [
        ListingKind::CurrentModules,
        ListingKind::AddedModules,
        ListingKind::RemovedModules,
        ListingKind::CurrentAssets,
        ListingKind::AddedAssets,
        ListingKind::RemovedAssets,
    ];

    #[test]
    fn test_first_build_has_no_diff_sections() {
        let cur = snapshot(vec![art("a", 1.0)], vec![art("main.js", 2.0)]);
        let report = assemble(&cur, None);

        assert!(matches!(report.sections[0], ReportSection::Summary(_)));
        assert_eq!(
            report.listing_kinds(),
            vec![ListingKind::CurrentModules, ListingKind::CurrentAssets]
        );
        assert!(!report.has_diff_sections());
        let assets = report.listing(ListingKind::CurrentAssets).unwrap();
        assert_eq!(assets.artifacts, vec![art("main.js", 2.0)]);
    }

    #[test]
    fn test_diffed_build_has_fixed_order() {
        let prev = snapshot(vec![art("a", 10.0)], vec![]);
        let cur = snapshot(vec![art("a", 12.0), art("b", 5.0)], vec![art("main.js", 1.0)]);
        let report = assemble(&cur, Some(&prev));

        assert!(matches!(report.sections[0], ReportSection::Summary(_)));
        assert_eq!(report.sections.len(), 7);
        assert_eq!(report.listing_kinds(), FULL_ORDER.to_vec());

        let added = report.listing(ListingKind::AddedModules).unwrap();
        assert_eq!(added.artifacts, vec![art("b", 5.0)]);
        let removed = report.listing(ListingKind::RemovedModules).unwrap();
        assert!(removed.artifacts.is_empty());
        let current = report.listing(ListingKind::CurrentModules).unwrap();
        assert_eq!(current.artifacts, vec![art("a", 12.0), art("b", 5.0)]);
        assert_eq!(
            report.listing(ListingKind::AddedAssets).unwrap().artifacts,
            vec![art("main.js", 1.0)]
        );
    }

    #[test]
    fn test_identical_snapshots_keep_empty_diff_sections() {
        let s = snapshot(vec![art("a", 1.0)], vec![art("main.js", 2.0)]);
        let report = assemble(&s, Some(&s));

        assert_eq!(report.listing_kinds(), FULL_ORDER.to_vec());
        for kind in FULL_ORDER.iter().filter(|k| k.is_diff()) {
            assert!(report.listing(*kind).unwrap().artifacts.is_empty());
        }
        assert_eq!(
            report.listing(ListingKind::CurrentModules).unwrap().artifacts,
            s.modules
        );
        assert_eq!(
            report.listing(ListingKind::CurrentAssets).unwrap().artifacts,
            s.assets
        );
    }

    #[test]
    fn test_asset_diff_can_be_disabled() {
        let prev = snapshot(vec![], vec![art("old.js", 1.0)]);
        let cur = snapshot(vec![], vec![art("new.js", 1.0)]);
        let options = AssembleOptions {
            diff_assets: false,
            ..AssembleOptions::default()
        };
        let report = assemble_with(&cur, Some(&prev), &options);
        assert_eq!(
            report.listing_kinds(),
            vec![
                ListingKind::CurrentModules,
                ListingKind::AddedModules,
                ListingKind::RemovedModules,
                ListingKind::CurrentAssets,
            ]
        );
    }

    #[test]
    fn test_summary_fields() {
        let report = assemble(&snapshot(vec![], vec![]), None);
        let summary = report.summary().unwrap();
        assert_eq!(summary.groups.len(), 2);
        assert_eq!(summary.groups[0].heading, labels::BUILD_INFORMATION);
        assert_eq!(summary.field(labels::TOOL_VERSION), Some("5.88.0"));
        assert_eq!(summary.field(labels::OUTPUT_PATH), Some("/project/dist"));
        assert_eq!(summary.field(labels::HASH), Some("abc123"));
        assert_eq!(
            summary.field(labels::START),
            Some("2023-11-14T22:13:20+00:00")
        );
        assert_eq!(summary.field(labels::TIME_USED), Some("2.5"));
        assert_eq!(report.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_negative_duration_is_shown_verbatim() {
        let mut s = snapshot(vec![], vec![]);
        s.duration_seconds = -3.0;
        let report = assemble(&s, None);
        assert_eq!(report.summary().unwrap().field(labels::TIME_USED), Some("-3"));
    }
}
