//! buildstat CLI
//!
//! Command-line interface for buildstat

use buildstat_core::logging_facility::{self, Profile};
use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "buildstat")]
#[command(about = "buildstat - build compilation reports with change tracking", long_about = None)]
struct Cli {
    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Human,
    Json,
}

impl From<LogFormat> for Profile {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Human => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Record a completed build and write its report
    Ingest(commands::ingest::IngestArgs),
    /// Compare two compilation results without touching the store
    Diff(commands::diff::DiffArgs),
    /// Print the stored snapshot summary
    Show(commands::show::ShowArgs),
    /// Forget the stored snapshot
    Reset(commands::reset::ResetArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_format.into());

    let result = match cli.command {
        Commands::Ingest(args) => commands::ingest::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Show(args) => commands::show::execute(args),
        Commands::Reset(args) => commands::reset::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
