//! Reporter configuration.
//!
//! Loaded from an optional TOML file; every key has a default so an empty
//! file (or no file) is a valid configuration.

use crate::errors::{ExError, ExErrorKind, Result};
use crate::render::ReportFormat;
use crate::report::assemble::DEFAULT_TITLE;
use crate::report::AssembleOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name used under the system temp dir when no store dir is set
pub const DEFAULT_STORE_DIR_NAME: &str = "buildstat";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<ConfigError> for ExError {
    fn from(err: ConfigError) -> Self {
        ExError::new(ExErrorKind::InvalidConfig)
            .with_op("load_config")
            .with_message(err.to_string())
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReporterConfig {
    pub store: StoreConfig,
    pub report: ReportConfig,
}

/// `[store]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory holding `stats.json`
    pub dir: Option<PathBuf>,
}

/// `[report]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub out_dir: PathBuf,
    pub format: ReportFormat,
    pub diff_assets: bool,
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            format: ReportFormat::Markdown,
            diff_assets: true,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ReporterConfig {
    /// Store directory, falling back to the system temp dir
    pub fn store_dir(&self) -> PathBuf {
        self.store.dir.clone().unwrap_or_else(default_store_dir)
    }

    /// Assembly options derived from the `[report]` table
    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            diff_assets: self.report.diff_assets,
            title: self.report.title.clone(),
        }
    }
}

/// `<temp_dir>/buildstat`
pub fn default_store_dir() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_STORE_DIR_NAME)
}

/// Load and validate a configuration file.
///
/// # Errors
/// Returns `InvalidConfig` if the file cannot be read, parsed or validated.
pub fn load_config(path: &Path) -> Result<ReporterConfig> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::from)?;
    load_config_from_str(&content)
}

/// Parse and validate configuration from a TOML string.
///
/// # Errors
/// Returns `InvalidConfig` on malformed TOML, unknown keys or invalid values.
pub fn load_config_from_str(content: &str) -> Result<ReporterConfig> {
    let config: ReporterConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ReporterConfig) -> std::result::Result<(), ConfigError> {
    if config.report.title.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "report.title".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if config.report.out_dir.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "report.out_dir".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if matches!(&config.store.dir, Some(dir) if dir.as_os_str().is_empty()) {
        return Err(ConfigError::InvalidValue {
            field: "store.dir".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, ReporterConfig::default());
        assert_eq!(config.store_dir(), std::env::temp_dir().join("buildstat"));
        assert_eq!(config.report.format, ReportFormat::Markdown);
        assert!(config.report.diff_assets);
        assert_eq!(config.assemble_options(), AssembleOptions::default());
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
[store]
dir = "/var/cache/buildstat"

[report]
out_dir = "reports"
format = "json"
diff_assets = false
title = "Nightly"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.store_dir(), PathBuf::from("/var/cache/buildstat"));
        assert_eq!(config.report.out_dir, PathBuf::from("reports"));
        assert_eq!(config.report.format, ReportFormat::Json);
        let options = config.assemble_options();
        assert!(!options.diff_assets);
        assert_eq!(options.title, "Nightly");
    }

    #[test]
    fn test_unknown_format_is_invalid_config() {
        let err = load_config_from_str("[report]\nformat = \"pdf\"\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
        assert_eq!(err.code(), "ERR_INVALID_CONFIG");
    }

    #[test]
    fn test_malformed_toml_is_invalid_config() {
        let err = load_config_from_str("[report\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }

    #[test]
    fn test_unknown_key_is_invalid_config() {
        let err = load_config_from_str("[report]\noutdir = \"x\"\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }

    #[test]
    fn test_empty_title_rejected() {
        let err = load_config_from_str("[report]\ntitle = \"  \"\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
        assert!(err.message().contains("report.title"));
    }

    #[test]
    fn test_missing_file_is_invalid_config() {
        let err = load_config(Path::new("/definitely/not/here/buildstat.toml")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }
}
