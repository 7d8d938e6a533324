//! Report rendering.
//!
//! Renderers turn an assembled [`Report`](crate::report::Report) into bytes;
//! sinks decide where those bytes go. Neither inspects snapshots directly.

pub mod json;
pub mod markdown;
pub mod sink;

use crate::errors::Result;
use crate::report::Report;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use sink::{MemoryReportSink, ReportSink};

/// Output format of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

impl ReportFormat {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
        }
    }

    /// Parse a format name as used on the command line and in config files
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Some(ReportFormat::Markdown),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }

    /// The renderer for this format
    pub fn renderer(&self) -> Box<dyn ReportRenderer + Send + Sync> {
        match self {
            ReportFormat::Markdown => Box::new(MarkdownRenderer),
            ReportFormat::Json => Box::new(JsonRenderer),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Facts about the render itself, not the build.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// Wall-clock time the report was produced, in the host's local offset
    pub generated_at: DateTime<FixedOffset>,
}

impl RenderContext {
    pub fn new(generated_at: DateTime<FixedOffset>) -> Self {
        Self { generated_at }
    }
}

/// Converts a report into its on-disk byte form.
pub trait ReportRenderer {
    /// The format this renderer produces
    fn format(&self) -> ReportFormat;

    /// Render the report
    ///
    /// # Errors
    /// Returns `RenderFailure` if the report cannot be encoded.
    fn render(&self, report: &Report, context: &RenderContext) -> Result<Vec<u8>>;
}
