//! Stress tests for the hook log bridge
//!
//! These tests verify behavior under load:
//! - Many contributed listeners bound in one boot
//! - Concurrent publication into a shared file sink
//! - Deeply stacked transformer chains

mod common;

use common::{contribute, new_bus, quiet_config, supply_sink, MemorySink};
use hooklog::prelude::*;
use hooklog::{FileSink, SharedSink};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

struct Numbered {
    id: String,
    priority: i64,
    order: Arc<Mutex<Vec<i64>>>,
}

impl HookListener for Numbered {
    fn id(&self) -> &str {
        &self.id
    }

    fn listen_to(&self) -> Vec<String> {
        vec!["tick".to_string(), "tock".to_string()]
    }

    fn priority(&self) -> Option<i64> {
        Some(self.priority)
    }
}

impl ObserverListener for Numbered {
    fn update(&self, _args: &[HookValue]) -> Option<LogRecord> {
        self.order.lock().push(self.priority);
        None
    }
}

impl TransformerListener for Numbered {
    fn filter(&self, value: HookValue, _args: &[HookValue]) -> HookValue {
        match value {
            HookValue::Int(n) => HookValue::Int(n + 1),
            other => other,
        }
    }
}

#[test]
fn test_many_listeners_bind_in_priority_order() {
    let (bus, dyn_bus) = new_bus();
    let order = Arc::new(Mutex::new(Vec::new()));
    supply_sink(&bus, MemorySink::new(LogLevel::Debug));

    // registered in a scrambled order
    let priorities: Vec<i64> = (0..500).map(|i| (i * 7919) % 500).collect();
    for priority in &priorities {
        contribute(
            &bus,
            ListenerDescriptor::observer(Arc::new(Numbered {
                id: format!("listener-{}", priority),
                priority: *priority,
                order: Arc::clone(&order),
            })),
        );
    }

    let boot = Bootstrapper::builder(dyn_bus).config(quiet_config()).build();
    boot.boot();

    assert_eq!(boot.bindings().len(), priorities.len() * 2);

    bus.trigger("tick", &[]);
    let seen = order.lock().clone();
    let mut sorted = priorities.clone();
    sorted.sort_unstable();
    assert_eq!(seen, sorted);
}

#[test]
fn test_long_transformer_chain() {
    let (bus, dyn_bus) = new_bus();
    let order = Arc::new(Mutex::new(Vec::new()));
    supply_sink(&bus, MemorySink::new(LogLevel::Debug));

    for priority in 0..1000 {
        contribute(
            &bus,
            ListenerDescriptor::transformer(Arc::new(Numbered {
                id: format!("t-{}", priority),
                priority,
                order: Arc::clone(&order),
            })),
        );
    }

    Bootstrapper::builder(dyn_bus).config(quiet_config()).build().boot();

    let out = bus.trigger_transform("tock", HookValue::Int(0), &[]);
    assert_eq!(out.as_int(), Some(1000));
    assert!(order.lock().is_empty());
}

#[test]
fn test_concurrent_publication_to_file_sink() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 250;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("stress.log");
    let sink: SharedSink = Arc::new(FileSink::new(&path, LogLevel::Debug).unwrap());

    let (bus, dyn_bus) = new_bus();
    let supplied = Arc::clone(&sink);
    bus.register_transform(
        filters::DEFAULT_SINK,
        Arc::new(move |_: HookValue, _: &[HookValue]| HookValue::Sink(Arc::clone(&supplied))),
        10,
        1,
    );

    let boot = Arc::new(Bootstrapper::builder(dyn_bus).config(quiet_config()).build());
    boot.boot();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let boot = Arc::clone(&boot);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    boot.emitter()
                        .log_to("HTTP", LogLevel::Info, format!("thread {} message {}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    sink.flush().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);

    let unique: HashSet<&str> = lines
        .iter()
        .map(|line| line.split(": ").nth(1).unwrap().split(" {").next().unwrap())
        .collect();
    assert_eq!(unique.len(), THREADS * PER_THREAD);
    assert!(lines.iter().all(|line| line.contains("HTTP.INFO: thread ")));
    assert_eq!(boot.metrics().written_count() as usize, THREADS * PER_THREAD);
}

#[test]
fn test_concurrent_level_events() {
    let (bus, dyn_bus) = new_bus();
    let sink = MemorySink::new(LogLevel::Warning);
    supply_sink(&bus, Arc::clone(&sink));

    let boot = Bootstrapper::builder(Arc::clone(&dyn_bus)).config(quiet_config()).build();
    boot.boot();

    let handles: Vec<_> = LogLevel::ALL
        .into_iter()
        .map(|level| {
            let bus = Arc::clone(&dyn_bus);
            thread::spawn(move || {
                for i in 0..100 {
                    bus.trigger(
                        &level_event(level),
                        &[HookValue::from(format!("{} {}", level, i)), HookValue::from("DB")],
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let records = sink.records();
    // Warning and above: Warning, Error, Critical, Alert, Emergency
    assert_eq!(records.len(), 5 * 100);
    assert!(records.iter().all(|r| r.level() >= LogLevel::Warning));
    assert_eq!(boot.metrics().filtered_count(), 3 * 100);
}
