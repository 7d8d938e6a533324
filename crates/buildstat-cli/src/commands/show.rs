//! Show command
//!
//! Usage: buildstat show [--store-dir <DIR>] [--config <FILE>]

use buildstat_core::store::SnapshotStore;
use buildstat_store::FsSnapshotStore;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Directory holding the snapshot (default: <tmp>/buildstat)
    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    /// TOML configuration file; its `[store] dir` applies unless --store-dir is given
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute show command
pub fn execute(args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = FsSnapshotStore::new(super::resolve_store_dir(
        args.store_dir,
        args.config.as_deref(),
    )?);

    let Some(snapshot) = store.load()? else {
        println!("no snapshot recorded");
        return Ok(());
    };

    println!("hash:      {}", snapshot.hash);
    println!("version:   {}", snapshot.version);
    println!("output:    {}", snapshot.output_path);
    match snapshot.started_at() {
        Some(at) => println!("started:   {}", at.to_rfc3339()),
        None => println!("started:   {}", snapshot.start_time),
    }
    println!("duration:  {}s", snapshot.duration_seconds);
    println!("modules:   {}", snapshot.modules.len());
    println!("assets:    {}", snapshot.assets.len());

    Ok(())
}
