//! Helpers shared by the integration test binaries

#![allow(dead_code)]

use hooklog::prelude::*;
use hooklog::{Result, SharedSink};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Sink keeping every record in memory.
pub struct MemorySink {
    min_level: LogLevel,
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new(min_level: LogLevel) -> Arc<Self> {
        Arc::new(Self {
            min_level,
            records: Mutex::new(Vec::new()),
        })
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|r| r.message().to_string())
            .collect()
    }
}

impl Sink for MemorySink {
    fn append(&self, record: &LogRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

pub fn new_bus() -> (Arc<MemoryBus>, Arc<dyn CallbackBus>) {
    let bus = Arc::new(MemoryBus::new());
    let dyn_bus: Arc<dyn CallbackBus> = bus.clone();
    (bus, dyn_bus)
}

/// Route the default sink to `sink` through the extension point.
pub fn supply_sink(bus: &MemoryBus, sink: Arc<MemorySink>) {
    let shared: SharedSink = sink;
    bus.register_transform(
        filters::DEFAULT_SINK,
        Arc::new(move |_: HookValue, _: &[HookValue]| HookValue::Sink(Arc::clone(&shared))),
        10,
        1,
    );
}

/// Register `descriptor` during the registration broadcast.
pub fn contribute(bus: &MemoryBus, descriptor: ListenerDescriptor) {
    bus.register(
        hooklog::REGISTER_LISTENERS_EVENT,
        Arc::new(move |args: &[HookValue]| {
            if let Some(registry) = args.first().and_then(HookValue::as_listeners) {
                registry
                    .register(descriptor.clone())
                    .expect("registry open during broadcast");
            }
        }),
        10,
        1,
    );
}

pub fn quiet_config() -> BootConfig {
    BootConfig::default().with_error_capture(false)
}

/// Route crate diagnostics to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
