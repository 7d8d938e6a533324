use crate::errors::Result;
use crate::render::ReportFormat;
use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;
use std::sync::Mutex;

/// Destination for rendered reports.
pub trait ReportSink {
    /// Persist one rendered report and return where it went
    ///
    /// # Errors
    /// Returns `RenderFailure` if the report cannot be written.
    fn write_report(
        &self,
        bytes: &[u8],
        format: ReportFormat,
        generated_at: DateTime<FixedOffset>,
    ) -> Result<PathBuf>;
}

/// A report written to a [`MemoryReportSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReport {
    pub location: PathBuf,
    pub format: ReportFormat,
    pub bytes: Vec<u8>,
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryReportSink {
    reports: Mutex<Vec<StoredReport>>,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports written so far, oldest first
    pub fn reports(&self) -> Vec<StoredReport> {
        match self.reports.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// The most recent report, if any
    pub fn last(&self) -> Option<StoredReport> {
        self.reports().pop()
    }
}

impl ReportSink for MemoryReportSink {
    fn write_report(
        &self,
        bytes: &[u8],
        format: ReportFormat,
        _generated_at: DateTime<FixedOffset>,
    ) -> Result<PathBuf> {
        let mut reports = match self.reports.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let location = PathBuf::from(format!("memory/report-{}.{}", reports.len() + 1, format.extension()));
        reports.push(StoredReport {
            location: location.clone(),
            format,
            bytes: bytes.to_vec(),
        });
        Ok(location)
    }
}
