#![forbid(unsafe_code)]

//! Capture of controller log lines for assertions.
//!
//! [`LogCapture`] is a `tracing_subscriber::Layer` that stores every event
//! it sees. [`with_captured_logs`] installs it as the thread's default
//! subscriber for the duration of a closure, so parallel tests never see
//! each other's lines.
//!
//! ```
//! use veil_harness::logging::{with_captured_logs, CaptureConfig};
//!
//! let ((), logs) = with_captured_logs(CaptureConfig::default(), || {
//!     tracing::warn!("view cache missing");
//! });
//! assert!(logs.contains(tracing::Level::WARN, "cache missing"));
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

/// What the capture layer keeps.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Most verbose level recorded. Default: `TRACE`.
    pub max_level: Level,
    /// Keep structured fields beyond `message`. Default: true.
    pub keep_fields: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_level: Level::TRACE,
            keep_fields: true,
        }
    }
}

impl CaptureConfig {
    /// Builder: record only events at `level` or less verbose.
    #[must_use]
    pub fn max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }

    /// Builder: set whether to keep structured fields.
    #[must_use]
    pub fn keep_fields(mut self, keep: bool) -> Self {
        self.keep_fields = keep;
        self
    }
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    /// Value of the structured field `name`, if recorded.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl EventVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value.to_string());
    }
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

fn lock(events: &EventLog) -> MutexGuard<'_, Vec<CapturedEvent>> {
    match events.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Layer that records events into a shared buffer.
pub struct LogCapture {
    events: EventLog,
    config: CaptureConfig,
}

impl LogCapture {
    /// Create a layer and the handle used to read what it records.
    pub fn new(config: CaptureConfig) -> (Self, CapturedLogs) {
        let events: EventLog = Arc::default();
        let handle = CapturedLogs {
            events: Arc::clone(&events),
        };
        (Self { events, config }, handle)
    }
}

impl<S> Layer<S> for LogCapture
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() > self.config.max_level {
            return;
        }
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        let fields = if self.config.keep_fields {
            visitor.fields
        } else {
            Vec::new()
        };
        lock(&self.events).push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message.unwrap_or_default(),
            fields,
        });
    }
}

/// Read handle for events recorded by a [`LogCapture`].
#[derive(Clone)]
pub struct CapturedLogs {
    events: EventLog,
}

impl CapturedLogs {
    /// Every recorded event, oldest first.
    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.events).clone()
    }

    /// Messages recorded at exactly `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        lock(&self.events)
            .iter()
            .filter(|event| event.level == level)
            .map(|event| event.message.clone())
            .collect()
    }

    /// Whether some event at `level` has a message containing `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        lock(&self.events)
            .iter()
            .any(|event| event.level == level && event.message.contains(needle))
    }

    /// Number of events whose message contains `needle`, at any level.
    pub fn count(&self, needle: &str) -> usize {
        lock(&self.events)
            .iter()
            .filter(|event| event.message.contains(needle))
            .count()
    }
}

impl fmt::Debug for CapturedLogs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedLogs")
            .field("events", &lock(&self.events).len())
            .finish()
    }
}

/// Run `f` with a capturing subscriber as this thread's default.
pub fn with_captured_logs<R>(config: CaptureConfig, f: impl FnOnce() -> R) -> (R, CapturedLogs) {
    let (layer, handle) = LogCapture::new(config);
    let subscriber = tracing_subscriber::registry().with(layer);
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_message_and_fields() {
        let ((), logs) = with_captured_logs(CaptureConfig::default(), || {
            tracing::info!(rule = "abc", count = 3u64, "applied");
        });
        let events = logs.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::INFO);
        assert_eq!(events[0].message, "applied");
        assert_eq!(events[0].field("rule"), Some("abc"));
        assert_eq!(events[0].field("count"), Some("3"));
    }

    #[test]
    fn max_level_filters_verbose_events() {
        let config = CaptureConfig::default().max_level(Level::INFO);
        let ((), logs) = with_captured_logs(config, || {
            tracing::debug!("noise");
            tracing::warn!("signal");
        });
        assert_eq!(logs.count("noise"), 0);
        assert!(logs.contains(Level::WARN, "signal"));
    }

    #[test]
    fn fields_can_be_dropped() {
        let config = CaptureConfig::default().keep_fields(false);
        let ((), logs) = with_captured_logs(config, || {
            tracing::info!(rule = "abc", "applied");
        });
        assert!(logs.events()[0].fields.is_empty());
    }
}
