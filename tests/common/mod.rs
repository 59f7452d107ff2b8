use planner_params::models::{InstanceConfig, InstanceParameters};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Fields of one captured event, keyed by field name. The event text is
/// stored under `message`.
pub type EventFields = BTreeMap<String, String>;

/// Collects the fields of every event at `level` seen while installed.
#[derive(Clone)]
struct EventCollector {
    level: Level,
    events: Arc<Mutex<Vec<EventFields>>>,
}

struct FieldVisitor(EventFields);

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{:?}", value));
    }
}

impl<S: Subscriber> Layer<S> for EventCollector {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == self.level {
            let mut visitor = FieldVisitor(EventFields::new());
            event.record(&mut visitor);
            self.events.lock().unwrap().push(visitor.0);
        }
    }
}

/// Run `f` with a subscriber that records events at `level`, returning its
/// result and the fields of every such event it emitted.
#[allow(dead_code)]
pub fn capture_events<T>(level: Level, f: impl FnOnce() -> T) -> (T, Vec<EventFields>) {
    let collector = EventCollector {
        level,
        events: Arc::default(),
    };
    let subscriber = tracing_subscriber::registry().with(collector.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    let events = collector.events.lock().unwrap().clone();
    (result, events)
}

#[allow(dead_code)]
pub fn capture_warning_fields<T>(f: impl FnOnce() -> T) -> (T, Vec<EventFields>) {
    capture_events(Level::WARN, f)
}

/// Like [`capture_warning_fields`], keeping only the warning messages.
#[allow(dead_code)]
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let (result, warnings) = capture_warning_fields(f);
    let messages = warnings
        .into_iter()
        .map(|mut fields| fields.remove("message").unwrap_or_default())
        .collect();
    (result, messages)
}

/// Instance with only `max_nb_transfers` configured.
#[allow(dead_code)]
pub fn instance_with_transfers(max_nb_transfers: Option<u32>) -> InstanceParameters {
    InstanceParameters {
        max_nb_transfers,
        ..Default::default()
    }
}

/// Write an instance file into `dir`.
#[allow(dead_code)]
pub fn write_instance(dir: &Path, file_name: &str, instance: &InstanceConfig) {
    let json = serde_json::to_string_pretty(instance).expect("Failed to serialize instance");
    fs::write(dir.join(file_name), json).expect("Failed to write instance file");
}
