//! Record processors applied by the dispatch bridge before a record is written

use super::log_context::FieldValue;
use super::log_record::LogRecord;
use parking_lot::RwLock;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Turns a record into an enriched copy of itself.
pub trait Processor: Send + Sync {
    fn process(&self, record: LogRecord) -> LogRecord;

    fn name(&self) -> &str;
}

pub type SharedProcessor = Arc<dyn Processor>;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn current_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn current_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Annotates records with host metadata.
///
/// Adds the process id, the current thread and any persistent fields set on
/// the processor (service name, environment, ...). Fields already present on
/// the record win.
///
/// # Example
///
/// ```
/// use hooklog::{HostContextProcessor, LogLevel, LogRecord, Processor};
///
/// let host = HostContextProcessor::new();
/// host.set("service", "checkout");
///
/// let record = host.process(LogRecord::new("HTTP", LogLevel::Info, "ok"));
/// assert!(record.context().get("service").is_some());
/// assert!(record.context().get("pid").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HostContextProcessor {
    fields: Arc<RwLock<BTreeMap<String, FieldValue>>>,
}

impl HostContextProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a persistent field, overwriting an existing one
    pub fn set<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) {
        self.fields.write().remove(key);
    }

    pub fn fields(&self) -> BTreeMap<String, FieldValue> {
        self.fields.read().clone()
    }
}

impl Processor for HostContextProcessor {
    fn process(&self, record: LogRecord) -> LogRecord {
        let mut context = record
            .context()
            .clone()
            .with_default_field("pid", std::process::id())
            .with_default_field(
                "thread",
                current_thread_name().unwrap_or_else(current_thread_id),
            );

        for (key, value) in self.fields.read().iter() {
            context = context.with_default_field(key.clone(), value.clone());
        }

        record.with_context(context)
    }

    fn name(&self) -> &str {
        "host-context"
    }
}
