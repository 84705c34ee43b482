//! In-memory log capture for tests.
//!
//! One process-wide subscriber records every event emitted through the
//! `log_op_*` macros. Tests share it and run in parallel, so assertions
//! should filter on a value only that test produces (an op name, an input
//! text, a field key).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event. `op` and `event` are lifted out of `fields` for
/// matching; every field, including those two, stays in `fields` as text.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    /// True if this is `event` emitted by operation `op`.
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

#[derive(Default)]
struct FieldText(BTreeMap<String, String>);

impl Visit for FieldText {
    // strings would otherwise come through Debug with quotes
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

type Journal = Arc<Mutex<Vec<CapturedEvent>>>;

struct JournalLayer(Journal);

impl<S: Subscriber> Layer<S> for JournalLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut text = FieldText::default();
        event.record(&mut text);
        let fields = text.0;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            op: fields.get("op").cloned(),
            event: fields.get("event").cloned(),
            fields,
        };
        lock(&self.0).push(captured);
    }
}

// a test that panicked mid-push must not hide events from the others
fn lock(journal: &Journal) -> MutexGuard<'_, Vec<CapturedEvent>> {
    journal.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read handle on the shared journal.
#[derive(Clone)]
pub struct TestCapture {
    journal: Journal,
}

impl TestCapture {
    /// Every event recorded so far, oldest first.
    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.journal).clone()
    }

    fn matching(&self, keep: impl Fn(&CapturedEvent) -> bool) -> Vec<CapturedEvent> {
        lock(&self.journal).iter().filter(|e| keep(e)).cloned().collect()
    }

    /// Events emitted by one operation, oldest first.
    pub fn events_for(&self, op: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.op.as_deref() == Some(op))
    }

    /// WARN events whose `field` was recorded as `value`.
    pub fn warnings_with(&self, field: &str, value: &str) -> Vec<CapturedEvent> {
        self.matching(|e| {
            e.level == Level::WARN && e.fields.get(field).map(String::as_str) == Some(value)
        })
    }

    pub fn count_events(&self, keep: impl Fn(&CapturedEvent) -> bool) -> usize {
        lock(&self.journal).iter().filter(|e| keep(e)).count()
    }

    /// # Panics
    ///
    /// If no recorded event is `event` from operation `op`.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "Expected event op={op} event={event}; {} events recorded",
            events.len()
        );
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capturing subscriber on first call and return a handle to it.
///
/// ```
/// use recon_core::logging_facility::test_capture::init_test_capture;
/// use recon_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("capture_doc_example");
/// capture.assert_event_exists("capture_doc_example", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let journal = Journal::default();
            tracing_subscriber::registry()
                .with(JournalLayer(journal.clone()))
                .init();
            TestCapture { journal }
        })
        .clone()
}
