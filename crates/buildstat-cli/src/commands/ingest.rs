//! Ingest command
//!
//! Usage: buildstat ingest <STATS_JSON> [--store-dir <DIR>] [--out-dir <DIR>]
//!        [--format markdown|json] [--no-asset-diff] [--config <FILE>]

use buildstat_core::config::ReporterConfig;
use buildstat_core::render::ReportFormat;
use buildstat_engine::BuildReporter;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Compilation-result JSON written by the build tool
    pub stats_json: PathBuf,

    /// Directory holding the previous snapshot (default: <tmp>/buildstat)
    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    /// Directory receiving the report (default: current directory)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Report format
    #[arg(long, value_parser = parse_format)]
    pub format: Option<ReportFormat>,

    /// Skip the added/removed asset sections
    #[arg(long)]
    pub no_asset_diff: bool,

    /// TOML configuration file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_format(s: &str) -> Result<ReportFormat, String> {
    ReportFormat::parse(s).ok_or_else(|| format!("unknown format '{}' (expected markdown or json)", s))
}

/// Merge flags over the (optional) configuration file
fn resolve_config(args: &IngestArgs) -> Result<ReporterConfig, Box<dyn std::error::Error>> {
    let mut config = super::load_optional_config(args.config.as_deref())?;

    if let Some(dir) = &args.store_dir {
        config.store.dir = Some(dir.clone());
    }
    if let Some(dir) = &args.out_dir {
        config.report.out_dir = dir.clone();
    }
    if let Some(format) = args.format {
        config.report.format = format;
    }
    if args.no_asset_diff {
        config.report.diff_assets = false;
    }

    Ok(config)
}

/// Execute ingest command
pub fn execute(args: IngestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(&args)?;
    let raw = super::read_raw(&args.stats_json)?;

    let outcome = BuildReporter::from_config(&config).on_build_complete(&raw)?;

    for warning in &outcome.warnings {
        eprintln!("warning: {}", warning);
    }
    if !outcome.persisted {
        eprintln!("warning: snapshot not saved; the next build will not be diffed against this one");
    }

    println!("{}", outcome.output_path.display());
    Ok(())
}
