//! Panic capture installs a process-wide hook, so it gets its own test binary
//! and a single test function.

mod common;

use common::{new_bus, supply_sink, MemorySink};
use hooklog::prelude::*;
use hooklog::ERROR_CHANNEL;
use std::panic;
use std::sync::Arc;

fn booted(sink: &Arc<MemorySink>) -> (Arc<dyn CallbackBus>, Bootstrapper) {
    let (bus, dyn_bus) = new_bus();
    supply_sink(&bus, Arc::clone(sink));

    let boot = Bootstrapper::builder(Arc::clone(&dyn_bus))
        .config(BootConfig::default())
        .build();
    assert_eq!(boot.boot(), BootOutcome::Booted);
    (dyn_bus, boot)
}

#[test]
fn test_panics_are_published_as_critical_records() {
    let first_sink = MemorySink::new(LogLevel::Debug);
    let (_first_bus, _first) = booted(&first_sink);

    let result = panic::catch_unwind(|| {
        panic!("boom");
    });
    assert!(result.is_err());

    let formatted = panic::catch_unwind(|| {
        let code = 7;
        panic!("exit code {}", code);
    });
    assert!(formatted.is_err());

    let records = first_sink.records();
    assert_eq!(records.len(), 2);

    let record = &records[0];
    assert_eq!(record.channel(), ERROR_CHANNEL);
    assert_eq!(record.level(), LogLevel::Critical);
    assert_eq!(record.message(), "boom");
    assert!(record.context().get("file").is_some());
    assert!(record.context().get("line").is_some());

    assert_eq!(records[1].message(), "exit code 7");

    // a second boot redirects the single hook instead of stacking another
    let second_sink = MemorySink::new(LogLevel::Debug);
    let (_second_bus, _second) = booted(&second_sink);

    let again = panic::catch_unwind(|| {
        panic!("after second boot");
    });
    assert!(again.is_err());

    assert_eq!(first_sink.records().len(), 2);
    assert_eq!(second_sink.messages(), vec!["after second boot"]);
}
