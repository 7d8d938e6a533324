//! Artifact diff computation.
//!
//! [`diff_artifacts`] classifies one collection; [`diff_snapshots`] runs it
//! independently for modules and assets.

use crate::diff::model::{ArtifactDelta, SnapshotDelta};
use crate::model::{Artifact, ArtifactCollection, Snapshot};
use std::collections::HashSet;

/// Names present in a collection, for O(1) membership tests.
fn name_set(artifacts: &[Artifact]) -> HashSet<&str> {
    artifacts.iter().map(|a| a.name.as_str()).collect()
}

/// Diff two artifact collections by name.
///
/// `old = None` means no previous snapshot exists: every artifact in `new`
/// is added and nothing is removed.
pub fn diff_artifacts(old: Option<&[Artifact]>, new: &[Artifact]) -> ArtifactDelta {
    let old = old.unwrap_or(&[]);
    let old_names = name_set(old);
    let new_names = name_set(new);

    let added: Vec<Artifact> = new
        .iter()
        .filter(|a| !old_names.contains(a.name.as_str()))
        .cloned()
        .collect();
    let removed: Vec<Artifact> = old
        .iter()
        .filter(|a| !new_names.contains(a.name.as_str()))
        .cloned()
        .collect();

    ArtifactDelta {
        added,
        removed,
        current: new.to_vec(),
    }
}

/// Diff both collections of two snapshots.
pub fn diff_snapshots(previous: &Snapshot, current: &Snapshot) -> SnapshotDelta {
    let per_collection = |c: ArtifactCollection| {
        diff_artifacts(Some(previous.collection(c)), current.collection(c))
    };
    SnapshotDelta {
        modules: per_collection(ArtifactCollection::Modules),
        assets: per_collection(ArtifactCollection::Assets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn art(name: &str, size: f64) -> Artifact {
        Artifact::new(name, "javascript/auto", size)
    }

    fn snapshot(modules: Vec<Artifact>, assets: Vec<Artifact>) -> Snapshot {
        Snapshot {
            version: "5.0.0".to_string(),
            hash: "h".to_string(),
            output_path: "/dist".to_string(),
            start_time: 0,
            end_time: 1000,
            duration_seconds: 1.0,
            modules,
            assets,
        }
    }

    #[test]
    fn test_added_module_keeps_retained_with_new_size() {
        let old = vec![art("a", 10.0)];
        let new = vec![art("a", 12.0), art("b", 5.0)];
        let d = diff_artifacts(Some(&old), &new);
        assert_eq!(d.added_names(), vec!["b"]);
        assert!(d.removed.is_empty());
        assert_eq!(d.current, vec![art("a", 12.0), art("b", 5.0)]);
    }

    #[test]
    fn test_removed_module() {
        let old = vec![art("x", 1.0), art("y", 1.0)];
        let new = vec![art("x", 1.0)];
        let d = diff_artifacts(Some(&old), &new);
        assert!(d.added.is_empty());
        assert_eq!(d.removed_names(), vec!["y"]);
    }

    #[test]
    fn test_no_previous_means_everything_added() {
        let new = vec![art("main.js", 3.0), art("vendor.js", 9.0)];
        let d = diff_artifacts(None, &new);
        assert_eq!(d.added, new);
        assert!(d.removed.is_empty());
        assert_eq!(d.current, new);
    }

    #[test]
    fn test_rename_is_add_plus_remove() {
        let old = vec![art("./src/old.js", 1.0)];
        let new = vec![art("./src/new.js", 1.0)];
        let d = diff_artifacts(Some(&old), &new);
        assert_eq!(d.added_names(), vec!["./src/new.js"]);
        assert_eq!(d.removed_names(), vec!["./src/old.js"]);
    }

    #[test]
    fn test_kind_change_is_not_reported() {
        let old = vec![Artifact::new("a", "javascript/auto", 1.0)];
        let new = vec![Artifact::new("a", "javascript/esm", 1.0)];
        assert!(diff_artifacts(Some(&old), &new).is_unchanged());
    }

    #[test]
    fn test_order_follows_originating_collection() {
        let old = vec![art("r3", 1.0), art("keep", 1.0), art("r1", 1.0)];
        let new = vec![art("n2", 1.0), art("keep", 1.0), art("n1", 1.0)];
        let d = diff_artifacts(Some(&old), &new);
        assert_eq!(d.added_names(), vec!["n2", "n1"]);
        assert_eq!(d.removed_names(), vec!["r3", "r1"]);
    }

    #[test]
    fn test_snapshot_collections_are_independent() {
        // same name in modules of one side and assets of the other
        let prev = snapshot(vec![art("shared", 1.0)], vec![]);
        let cur = snapshot(vec![], vec![art("shared", 1.0)]);
        let d = diff_snapshots(&prev, &cur);
        assert_eq!(d.modules.removed_names(), vec!["shared"]);
        assert_eq!(d.assets.added_names(), vec!["shared"]);
        assert!(!d.is_unchanged());
    }

    #[test]
    fn test_identical_snapshots_are_unchanged() {
        let s = snapshot(vec![art("a", 1.0)], vec![art("main.js", 2.0)]);
        let d = diff_snapshots(&s, &s);
        assert!(d.is_unchanged());
        assert_eq!(d.modules.current, s.modules);
        assert_eq!(d.collection(ArtifactCollection::Assets).current, s.assets);
    }

    fn unique_collection() -> impl Strategy<Value = Vec<Artifact>> {
        proptest::collection::vec("[a-e]{1,2}", 0..12).prop_map(|names| {
            let mut seen = HashSet::new();
            names
                .into_iter()
                .filter(|n| seen.insert(n.clone()))
                .map(|n| art(&n, 1.0))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_added_and_removed_are_disjoint(a in unique_collection(), b in unique_collection()) {
            let d = diff_artifacts(Some(&a), &b);
            let added: HashSet<&str> = d.added_names().into_iter().collect();
            for name in d.removed_names() {
                prop_assert!(!added.contains(name));
            }
        }

        #[test]
        fn prop_self_diff_is_empty(a in unique_collection()) {
            let d = diff_artifacts(Some(&a), &a);
            prop_assert!(d.added.is_empty());
            prop_assert!(d.removed.is_empty());
            prop_assert_eq!(d.current, a);
        }

        #[test]
        fn prop_none_old_adds_everything(a in unique_collection()) {
            let d = diff_artifacts(None, &a);
            prop_assert_eq!(&d.added, &a);
            prop_assert!(d.removed.is_empty());
            prop_assert_eq!(d.current, a);
        }

        #[test]
        fn prop_added_plus_retained_covers_new(a in unique_collection(), b in unique_collection()) {
            let d = diff_artifacts(Some(&a), &b);
            let old_names: HashSet<&str> = a.iter().map(|x| x.name.as_str()).collect();
            let retained = b.iter().filter(|x| old_names.contains(x.name.as_str())).count();
            prop_assert_eq!(d.added.len() + retained, b.len());
            for r in &d.removed {
                prop_assert!(a.contains(r));
            }
        }

        #[test]
        fn prop_order_is_subsequence(a in unique_collection(), b in unique_collection()) {
            let d = diff_artifacts(Some(&a), &b);
            let pos_b: Vec<usize> = d.added.iter()
                .filter_map(|x| b.iter().position(|y| y.name == x.name))
                .collect();
            prop_assert!(pos_b.windows(2).all(|w| w[0] < w[1]));
            let pos_a: Vec<usize> = d.removed.iter()
                .filter_map(|x| a.iter().position(|y| y.name == x.name))
                .collect();
            prop_assert!(pos_a.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
