//! Diff command
//!
//! Usage: buildstat diff <OLD_JSON> <NEW_JSON> [--json]

use buildstat_core::diff::{diff_snapshots, ArtifactDelta};
use buildstat_core::model::ArtifactCollection;
use buildstat_core::normalize::normalize;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Previous compilation result
    pub old: PathBuf,

    /// Current compilation result
    pub new: PathBuf,

    /// Print the delta as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let old = normalize(&super::read_raw(&args.old)?)?.snapshot;
    let new = normalize(&super::read_raw(&args.new)?)?.snapshot;

    let delta = diff_snapshots(&old, &new);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&delta)?);
        return Ok(());
    }

    for collection in [ArtifactCollection::Modules, ArtifactCollection::Assets] {
        print!("{}", format_delta(collection, delta.collection(collection)));
    }
    if delta.is_unchanged() {
        println!("no changes");
    }

    Ok(())
}

fn format_delta(collection: ArtifactCollection, delta: &ArtifactDelta) -> String {
    let mut output = format!(
        "{}: +{} -{}\n",
        collection.key(),
        delta.added.len(),
        delta.removed.len()
    );
    for name in delta.added_names() {
        output.push_str(&format!("  + {}\n", name));
    }
    for name in delta.removed_names() {
        output.push_str(&format!("  - {}\n", name));
    }
    output
}
