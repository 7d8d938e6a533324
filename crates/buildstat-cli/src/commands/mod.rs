pub mod diff;
pub mod ingest;
pub mod reset;
pub mod show;

use buildstat_core::config::{load_config, ReporterConfig};
use buildstat_core::errors::{ExError, ExErrorKind};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Read a compilation-result JSON file
///
/// Unparseable JSON is reported as a malformed snapshot.
pub fn read_raw(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let raw = serde_json::from_str(&text).map_err(|e| {
        ExError::new(ExErrorKind::MalformedSnapshot)
            .with_op("read_stats")
            .with_message(format!("{}: {}", path.display(), e))
    })?;
    Ok(raw)
}

/// The `--config` file, or defaults when none is given
pub fn load_optional_config(
    path: Option<&Path>,
) -> Result<ReporterConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None => Ok(ReporterConfig::default()),
    }
}

/// `--store-dir`, then the config's `[store] dir`, then the default store directory
pub fn resolve_store_dir(
    store_dir: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match store_dir {
        Some(dir) => Ok(dir),
        None => Ok(load_optional_config(config)?.store_dir()),
    }
}
