//! Timestamped report files
//!
//! Reports land in `<out_dir>/build-report_<YYYY-MM-DD>_<HH:MM:SS>.<ext>`
//! with filesystem-unsafe characters replaced by `-`. An existing file is
//! never overwritten; a numeric suffix is appended instead.

use crate::errors::{render_failure, Result};
use buildstat_core::render::{ReportFormat, ReportSink};
use chrono::{DateTime, FixedOffset};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File name prefix of every report
pub const REPORT_FILE_PREFIX: &str = "build-report";

/// Upper bound on `-N` suffixes tried before giving up
const MAX_SUFFIX: u32 = 9_999;

const UNSAFE_CHARS: [char; 9] = ['/', '?', '<', '>', '\\', ':', '*', '|', '"'];

/// Replace filesystem-unsafe characters with `-`
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '-' } else { c })
        .collect()
}

/// File stem for a report generated at `generated_at` (no extension)
pub fn report_file_stem(generated_at: &DateTime<FixedOffset>) -> String {
    sanitize_file_name(&format!(
        "{}_{}",
        REPORT_FILE_PREFIX,
        generated_at.format("%Y-%m-%d_%H:%M:%S")
    ))
}

/// Writes reports into a directory, one new file per report
#[derive(Debug, Clone)]
pub struct FsReportSink {
    out_dir: PathBuf,
}

impl FsReportSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn candidate(&self, stem: &str, suffix: u32, ext: &str) -> PathBuf {
        if suffix == 0 {
            self.out_dir.join(format!("{}.{}", stem, ext))
        } else {
            self.out_dir.join(format!("{}-{}.{}", stem, suffix, ext))
        }
    }
}

impl ReportSink for FsReportSink {
    fn write_report(
        &self,
        bytes: &[u8],
        format: ReportFormat,
        generated_at: DateTime<FixedOffset>,
    ) -> Result<PathBuf> {
        const OP: &str = "write_report";

        fs::create_dir_all(&self.out_dir).map_err(|e| {
            render_failure(
                OP,
                format!("cannot create {}: {}", self.out_dir.display(), e),
            )
        })?;

        let stem = report_file_stem(&generated_at);
        for suffix in 0..=MAX_SUFFIX {
            let path = self.candidate(&stem, suffix, format.extension());
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(render_failure(
                        OP,
                        format!("cannot create {}: {}", path.display(), e),
                    ))
                }
            };

            if let Err(e) = file.write_all(bytes).and_then(|_| file.flush()) {
                drop(file);
                let _ = fs::remove_file(&path);
                return Err(render_failure(
                    OP,
                    format!("cannot write {}: {}", path.display(), e),
                ));
            }

            tracing::debug!(
                component = module_path!(),
                op = OP,
                path = %path.display(),
                bytes = bytes.len(),
                "report written"
            );
            return Ok(path);
        }

        Err(render_failure(
            OP,
            format!("no free report name for {} in {}", stem, self.out_dir.display()),
        ))
    }
}
