//! Build-trace capture for logging assertions
//!
//! Records every emitted event in memory and indexes it by
//! `build_event_id`, so a test can read back the step trail of a single
//! build even while other tests log concurrently into the same buffer.

use buildstat_core_types::schema::{FIELD_BUILD_EVENT_ID, FIELD_EVENT, FIELD_OP};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded log event.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    /// Value of a recorded field, rendered as text
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    /// Lifecycle marker (`start`, `end`, `end_error`), absent on detail events
    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    pub fn build_event_id(&self) -> Option<&str> {
        self.field(FIELD_BUILD_EVENT_ID)
    }

    /// True for the lifecycle event `event` of step `op`
    pub fn is_step(&self, op: &str, event: &str) -> bool {
        self.op() == Some(op) && self.event() == Some(event)
    }
}

// Numbers and bools arrive through `record_debug`, whose output matches
// their `Display` form.
struct FieldRecorder(BTreeMap<String, String>);

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

fn lock(log: &EventLog) -> MutexGuard<'_, Vec<CapturedEvent>> {
    match log.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

struct CaptureLayer {
    log: EventLog,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder(BTreeMap::new());
        event.record(&mut recorder);
        lock(&self.log).push(CapturedEvent {
            level: *event.metadata().level(),
            fields: recorder.0,
        });
    }
}

/// Read handle over the shared capture buffer.
#[derive(Clone)]
pub struct TestCapture {
    log: EventLog,
}

impl TestCapture {
    /// Every event captured so far, in emission order
    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.log).clone()
    }

    /// Events stamped with `build_event_id`, in emission order
    pub fn for_build(&self, build_event_id: &str) -> Vec<CapturedEvent> {
        lock(&self.log)
            .iter()
            .filter(|e| e.build_event_id() == Some(build_event_id))
            .cloned()
            .collect()
    }

    /// `(op, event)` lifecycle pairs of one build, in emission order
    pub fn step_trail(&self, build_event_id: &str) -> Vec<(String, String)> {
        self.for_build(build_event_id)
            .iter()
            .filter_map(|e| Some((e.op()?.to_string(), e.event()?.to_string())))
            .collect()
    }

    /// How many times one build logged `event` for step `op`
    pub fn count_step(&self, build_event_id: &str, op: &str, event: &str) -> usize {
        self.for_build(build_event_id)
            .iter()
            .filter(|e| e.is_step(op, event))
            .count()
    }

    /// Events for step `op` regardless of build
    pub fn for_op(&self, op: &str) -> Vec<CapturedEvent> {
        lock(&self.log)
            .iter()
            .filter(|e| e.op() == Some(op))
            .cloned()
            .collect()
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber (first call only)
///
/// Must not be combined with [`init`](super::init) in the same process.
///
/// # Example
///
/// ```
/// use buildstat_core::logging_facility::test_capture::init_test_capture;
/// use buildstat_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example", build_event_id = "build-1");
/// assert_eq!(capture.count_step("build-1", "doc_example", "start"), 1);
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let log = EventLog::default();
            tracing_subscriber::registry()
                .with(CaptureLayer { log: log.clone() })
                .init();
            TestCapture { log }
        })
        .clone()
}
