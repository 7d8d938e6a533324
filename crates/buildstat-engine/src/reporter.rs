//! Build-event adapter.
//!
//! [`BuildReporter`] handles one "build complete" notification end to end:
//! normalize → load previous → save current → assemble → render → write.
//!
//! ## Error policy
//!
//! - Malformed input fails the event before anything is persisted.
//! - Store failures are logged and absorbed: a failed load means "first
//!   build", a failed save leaves `persisted = false`.
//! - Render and sink failures surface as `RenderFailure`.
//!
//! ## Logging Ownership
//!
//! Each step is bracketed by `log_op_start!` / `log_op_end!` /
//! `log_op_error!`, all carrying the event's `build_event_id`. Lower layers
//! only emit `debug!`/`warn!` details.

use buildstat_core::config::ReporterConfig;
use buildstat_core::errors::{ExError, ExErrorKind, Result};
use buildstat_core::model::Snapshot;
use buildstat_core::normalize::{normalize, NormalizeWarning};
use buildstat_core::render::{RenderContext, ReportRenderer, ReportSink};
use buildstat_core::report::{assemble_with, AssembleOptions, Report};
use buildstat_core::store::SnapshotStore;
use buildstat_core::{log_op_end, log_op_error, log_op_start};
use buildstat_core_types::BuildEventId;
use buildstat_store::{FsReportSink, FsSnapshotStore};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::clock::{Clock, SystemClock};

/// What one handled build event produced.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Correlation id stamped on every log event of this build
    pub event_id: BuildEventId,
    /// The assembled report
    pub report: Report,
    /// Where the sink put the rendered report
    pub output_path: PathBuf,
    /// No usable previous snapshot was available
    pub first_build: bool,
    /// The current snapshot was saved for the next build
    pub persisted: bool,
    /// Non-fatal normalization findings
    pub warnings: Vec<NormalizeWarning>,
}

/// Entry point invoked once per completed build.
pub struct BuildReporter {
    store: Arc<dyn SnapshotStore + Send + Sync>,
    renderer: Box<dyn ReportRenderer + Send + Sync>,
    sink: Arc<dyn ReportSink + Send + Sync>,
    clock: Box<dyn Clock>,
    options: AssembleOptions,
}

impl BuildReporter {
    /// Create a reporter with the system clock and default assembly options
    pub fn new(
        store: Arc<dyn SnapshotStore + Send + Sync>,
        renderer: Box<dyn ReportRenderer + Send + Sync>,
        sink: Arc<dyn ReportSink + Send + Sync>,
    ) -> Self {
        Self {
            store,
            renderer,
            sink,
            clock: Box::new(SystemClock),
            options: AssembleOptions::default(),
        }
    }

    /// Filesystem-backed reporter built from configuration
    pub fn from_config(config: &ReporterConfig) -> Self {
        Self::new(
            Arc::new(FsSnapshotStore::new(config.store_dir())),
            config.report.format.renderer(),
            Arc::new(FsReportSink::new(config.report.out_dir.clone())),
        )
        .with_options(config.assemble_options())
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_options(mut self, options: AssembleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &AssembleOptions {
        &self.options
    }

    /// Handle a completed build
    ///
    /// # Errors
    /// - `MalformedSnapshot`: the compilation result could not be normalized;
    ///   nothing was saved or rendered
    /// - `RenderFailure`: the report could not be rendered or written; the
    ///   snapshot may already be saved
    pub fn on_build_complete(&self, raw: &Value) -> Result<BuildOutcome> {
        let event_id = BuildEventId::new();
        log_op_start!("on_build_complete", build_event_id = event_id.as_str());
        let start = Instant::now();

        let result = self.handle(&event_id, raw);

        match &result {
            Ok(outcome) => {
                log_op_end!(
                    "on_build_complete",
                    duration_ms = elapsed_ms(start),
                    build_event_id = event_id.as_str(),
                    first_build = outcome.first_build,
                    persisted = outcome.persisted,
                    output_path = %outcome.output_path.display()
                );
            }
            Err(e) => {
                log_op_error!(
                    "on_build_complete",
                    *e,
                    duration_ms = elapsed_ms(start),
                    build_event_id = event_id.as_str()
                );
            }
        }

        result
    }

    /// Handle a completed build, then signal `done` exactly once
    ///
    /// `done` sees the same result that is returned, whether the event
    /// succeeded or failed.
    ///
    /// # Errors
    /// Same as [`BuildReporter::on_build_complete`].
    pub fn on_build_complete_then<F>(&self, raw: &Value, done: F) -> Result<BuildOutcome>
    where
        F: FnOnce(&Result<BuildOutcome>),
    {
        let result = self.on_build_complete(raw);
        done(&result);
        result
    }

    fn handle(&self, event_id: &BuildEventId, raw: &Value) -> Result<BuildOutcome> {
        let normalized = step(event_id, "normalize", || normalize(raw))?;
        let current = normalized.snapshot;

        let previous = self.load_previous(event_id);
        let persisted = self.save_current(event_id, &current);

        let report = step(event_id, "assemble", || {
            Ok(assemble_with(&current, previous.as_ref(), &self.options))
        })?;

        let context = RenderContext::new(self.clock.now());
        let bytes = step(event_id, "render", || {
            self.renderer
                .render(&report, &context)
                .map_err(as_render_failure)
        })?;

        let format = self.renderer.format();
        let output_path = step(event_id, "write_report", || {
            self.sink
                .write_report(&bytes, format, context.generated_at)
                .map_err(as_render_failure)
        })?;

        Ok(BuildOutcome {
            event_id: event_id.clone(),
            report,
            output_path,
            first_build: previous.is_none(),
            persisted,
            warnings: normalized.warnings,
        })
    }

    fn load_previous(&self, event_id: &BuildEventId) -> Option<Snapshot> {
        match step(event_id, "load_snapshot", || self.store.load()) {
            Ok(previous) => previous,
            Err(_) => {
                tracing::warn!(
                    component = module_path!(),
                    op = "load_snapshot",
                    build_event_id = event_id.as_str(),
                    "previous snapshot unavailable; treating as first build"
                );
                None
            }
        }
    }

    fn save_current(&self, event_id: &BuildEventId, current: &Snapshot) -> bool {
        match step(event_id, "save_snapshot", || self.store.save(current)) {
            Ok(()) => true,
            Err(_) => {
                tracing::warn!(
                    component = module_path!(),
                    op = "save_snapshot",
                    build_event_id = event_id.as_str(),
                    "current snapshot not persisted; next build will not diff against it"
                );
                false
            }
        }
    }
}

/// Run one pipeline step with lifecycle logging
fn step<T>(event_id: &BuildEventId, op: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    log_op_start!(op, build_event_id = event_id.as_str());
    let start = Instant::now();

    match f() {
        Ok(value) => {
            log_op_end!(
                op,
                duration_ms = elapsed_ms(start),
                build_event_id = event_id.as_str()
            );
            Ok(value)
        }
        Err(e) => {
            let e = e.with_build_event_id(event_id.clone());
            log_op_error!(
                op,
                e,
                duration_ms = elapsed_ms(start),
                build_event_id = event_id.as_str()
            );
            Err(e)
        }
    }
}

fn as_render_failure(err: ExError) -> ExError {
    if err.kind() == ExErrorKind::RenderFailure {
        return err;
    }
    let message = err.message().to_string();
    ExError::new(ExErrorKind::RenderFailure)
        .with_op("render")
        .with_message(message)
        .with_source(err)
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use buildstat_core::logging_facility::test_capture::init_test_capture;
    use buildstat_core::render::{JsonRenderer, MarkdownRenderer, MemoryReportSink, ReportFormat};
    use buildstat_core::store::MemorySnapshotStore;
    use buildstat_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
    use chrono::DateTime;
    use serde_json::json;

    fn clock() -> Box<dyn Clock> {
        Box::new(FixedClock(
            DateTime::parse_from_rfc3339("2026-10-17T10:00:00+00:00").unwrap(),
        ))
    }

    fn raw(modules: &[&str]) -> Value {
        let modules: Vec<Value> = modules
            .iter()
            .map(|m| json!({ "name": m, "type": "javascript/auto", "size": 1.0 }))
            .collect();
        json!({
            "version": "5.88.0",
            "hash": "h",
            "outputPath": "/dist",
            "startTime": 0,
            "endTime": 1000,
            "modules": modules,
            "assets": []
        })
    }

    struct BrokenRenderer;

    impl ReportRenderer for BrokenRenderer {
        fn format(&self) -> ReportFormat {
            ReportFormat::Markdown
        }

        fn render(&self, _report: &Report, _context: &RenderContext) -> Result<Vec<u8>> {
            Err(ExError::new(ExErrorKind::Internal).with_message("encoder exploded"))
        }
    }

    #[test]
    fn test_steps_are_logged_with_event_id() {
        let capture = init_test_capture();
        let reporter = BuildReporter::new(
            Arc::new(MemorySnapshotStore::new()),
            Box::new(MarkdownRenderer),
            Arc::new(MemoryReportSink::new()),
        )
        .with_clock(clock());

        let outcome = reporter.on_build_complete(&raw(&["a"])).unwrap();

        let mut expected = vec![("on_build_complete", EVENT_START)];
        for op in [
            "normalize",
            "load_snapshot",
            "save_snapshot",
            "assemble",
            "render",
            "write_report",
        ] {
            expected.push((op, EVENT_START));
            expected.push((op, EVENT_END));
        }
        expected.push(("on_build_complete", EVENT_END));
        let expected: Vec<(String, String)> = expected
            .into_iter()
            .map(|(op, event)| (op.to_string(), event.to_string()))
            .collect();

        assert_eq!(capture.step_trail(outcome.event_id.as_str()), expected);
    }

    #[test]
    fn test_renderer_error_becomes_render_failure() {
        let capture = init_test_capture();
        let store = Arc::new(MemorySnapshotStore::new());
        let reporter = BuildReporter::new(
            store.clone(),
            Box::new(BrokenRenderer),
            Arc::new(MemoryReportSink::new()),
        )
        .with_clock(clock());

        let err = reporter.on_build_complete(&raw(&["a"])).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::RenderFailure);
        assert_eq!(
            err.source_error().map(|s| s.kind()),
            Some(ExErrorKind::Internal)
        );
        assert!(err.build_event_id().is_some());
        // Persisted before rendering
        assert!(store.current().is_some());

        let id = err.build_event_id().unwrap().as_str();
        assert_eq!(capture.count_step(id, "render", EVENT_END_ERROR), 1);
        assert_eq!(capture.count_step(id, "write_report", EVENT_START), 0);
        assert_eq!(
            capture.count_step(id, "on_build_complete", EVENT_END_ERROR),
            1
        );
    }

    #[test]
    fn test_json_renderer_is_used_for_output() {
        let sink = Arc::new(MemoryReportSink::new());
        let reporter = BuildReporter::new(
            Arc::new(MemorySnapshotStore::new()),
            Box::new(JsonRenderer),
            sink.clone(),
        )
        .with_clock(clock());

        let outcome = reporter.on_build_complete(&raw(&["a"])).unwrap();

        let stored = sink.last().unwrap();
        assert_eq!(stored.location, outcome.output_path);
        assert_eq!(stored.format, ReportFormat::Json);
        let doc: Value = serde_json::from_slice(&stored.bytes).unwrap();
        assert_eq!(doc["generatedAt"], "2026-10-17T10:00:00+00:00");
    }
}
