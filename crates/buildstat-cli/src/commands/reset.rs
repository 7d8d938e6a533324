//! Reset command
//!
//! Usage: buildstat reset [--store-dir <DIR>] [--config <FILE>]

use buildstat_core::store::SnapshotStore;
use buildstat_store::FsSnapshotStore;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Directory holding the snapshot (default: <tmp>/buildstat)
    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    /// TOML configuration file; its `[store] dir` applies unless --store-dir is given
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute reset command
pub fn execute(args: ResetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = FsSnapshotStore::new(super::resolve_store_dir(
        args.store_dir,
        args.config.as_deref(),
    )?);
    store.clear()?;
    println!("✓ Cleared {}", store.record_path().display());
    Ok(())
}
