//! Central dispatch bridge between the log events and the sink

use super::channels::ChannelSet;
use crate::core::{
    DispatchMetrics, LogLevel, LogRecord, SharedProcessor, SharedSink, DEFAULT_CHANNEL,
};
use crate::hooks::{level_event, CallbackBus, HookValue, LOG_EVENT, UNBOUNDED_ARGS};
use std::sync::Arc;

/// Priority of the bridge's binding on the generic log event.
pub const BRIDGE_PRIORITY: i64 = 100;

/// What became of a record handed to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Written,
    BelowThreshold,
    UnknownChannel,
    NoSink,
    WriteFailed,
    Ignored,
}

/// Turns bus arguments into records and writes them to the resolved sink.
pub struct LogDispatcher {
    sink: Option<SharedSink>,
    processors: Vec<SharedProcessor>,
    channels: ChannelSet,
    metrics: Arc<DispatchMetrics>,
}

impl LogDispatcher {
    pub fn new(
        sink: Option<SharedSink>,
        processors: Vec<SharedProcessor>,
        channels: ChannelSet,
        metrics: Arc<DispatchMetrics>,
    ) -> Self {
        Self {
            sink,
            processors,
            channels,
            metrics,
        }
    }

    /// Build a record from trigger arguments.
    ///
    /// Accepted forms: a `Record`, or a `Str` message optionally followed by a
    /// `Str` channel and, on the generic event only, an `Int` level code. A
    /// level event forces its level onto the record.
    pub fn record_from_args(args: &[HookValue], forced: Option<LogLevel>) -> Option<LogRecord> {
        match args.first()? {
            HookValue::Record(record) => Some(match forced {
                Some(level) => record.clone().with_level(level),
                None => record.clone(),
            }),
            HookValue::Str(message) => {
                let channel = args
                    .get(1)
                    .and_then(HookValue::as_str)
                    .unwrap_or(DEFAULT_CHANNEL);
                let level = forced.unwrap_or_else(|| {
                    args.get(2)
                        .and_then(HookValue::as_int)
                        .and_then(LogLevel::from_code)
                        .unwrap_or(LogLevel::Debug)
                });
                Some(LogRecord::new(channel, level, message.clone()))
            }
            _ => None,
        }
    }

    pub fn dispatch(&self, args: &[HookValue], forced: Option<LogLevel>) -> DispatchOutcome {
        match Self::record_from_args(args, forced) {
            Some(record) => self.handle(record),
            None => {
                tracing::debug!(args = ?args, "ignoring log event with unsupported arguments");
                DispatchOutcome::Ignored
            }
        }
    }

    pub fn handle(&self, record: LogRecord) -> DispatchOutcome {
        if !self.channels.contains(record.channel()) {
            self.metrics.record_dropped();
            tracing::debug!(channel = record.channel(), "dropping record for unknown channel");
            return DispatchOutcome::UnknownChannel;
        }

        let Some(sink) = &self.sink else {
            self.metrics.record_dropped();
            return DispatchOutcome::NoSink;
        };

        if !sink.handles(record.level()) {
            self.metrics.record_filtered();
            return DispatchOutcome::BelowThreshold;
        }

        let record = self
            .processors
            .iter()
            .fold(record, |record, processor| processor.process(record));

        match sink.append(&record) {
            Ok(()) => {
                self.metrics.record_written();
                DispatchOutcome::Written
            }
            Err(e) => {
                self.metrics.record_failed_write();
                tracing::warn!(sink = sink.name(), error = %e, "failed to write log record");
                DispatchOutcome::WriteFailed
            }
        }
    }

    pub fn sink(&self) -> Option<&SharedSink> {
        self.sink.as_ref()
    }

    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    /// Bind on the generic log event and on every level event.
    pub fn install(self: &Arc<Self>, bus: &dyn CallbackBus) {
        let dispatcher = Arc::clone(self);
        bus.register(
            LOG_EVENT,
            Arc::new(move |args: &[HookValue]| {
                dispatcher.dispatch(args, None);
            }),
            BRIDGE_PRIORITY,
            UNBOUNDED_ARGS,
        );

        for level in LogLevel::ALL {
            let dispatcher = Arc::clone(self);
            bus.register(
                &level_event(level),
                Arc::new(move |args: &[HookValue]| {
                    dispatcher.dispatch(args, Some(level));
                }),
                level.hook_priority(BRIDGE_PRIORITY),
                UNBOUNDED_ARGS,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HookLogError, Result, Sink};
    use parking_lot::Mutex;

    struct VecSink {
        min_level: LogLevel,
        records: Mutex<Vec<LogRecord>>,
        fail: bool,
    }

    impl VecSink {
        fn new(min_level: LogLevel) -> Arc<Self> {
            Arc::new(Self {
                min_level,
                records: Mutex::new(Vec::new()),
                fail: false,
            })
        }
    }

    impl Sink for VecSink {
        fn append(&self, record: &LogRecord) -> Result<()> {
            if self.fail {
                return Err(HookLogError::writer("disk full"));
            }
            self.records.lock().push(record.clone());
            Ok(())
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "vec"
        }

        fn min_level(&self) -> LogLevel {
            self.min_level
        }
    }

    fn dispatcher(sink: Option<SharedSink>) -> (LogDispatcher, Arc<DispatchMetrics>) {
        let metrics = Arc::new(DispatchMetrics::new());
        (
            LogDispatcher::new(sink, Vec::new(), ChannelSet::default(), Arc::clone(&metrics)),
            metrics,
        )
    }

    #[test]
    fn test_record_from_string_args() {
        let record = LogDispatcher::record_from_args(
            &[HookValue::from("boom"), HookValue::from("DB"), HookValue::Int(400)],
            None,
        )
        .unwrap();
        assert_eq!(record.channel(), "DB");
        assert_eq!(record.level(), LogLevel::Error);

        let record = LogDispatcher::record_from_args(&[HookValue::from("plain")], None).unwrap();
        assert_eq!(record.channel(), DEFAULT_CHANNEL);
        assert_eq!(record.level(), LogLevel::Debug);
    }

    #[test]
    fn test_level_event_forces_level() {
        let original = LogRecord::new("HTTP", LogLevel::Debug, "x");
        let record = LogDispatcher::record_from_args(
            &[HookValue::Record(original), HookValue::Int(100)],
            Some(LogLevel::Alert),
        )
        .unwrap();
        assert_eq!(record.level(), LogLevel::Alert);

        assert!(LogDispatcher::record_from_args(&[HookValue::Int(1)], None).is_none());
        assert!(LogDispatcher::record_from_args(&[], None).is_none());
    }

    #[test]
    fn test_handle_outcomes() {
        let sink = VecSink::new(LogLevel::Warning);
        let (dispatcher, metrics) = dispatcher(Some(sink.clone()));

        let warn = LogRecord::new("HTTP", LogLevel::Warning, "slow");
        let info = LogRecord::new("HTTP", LogLevel::Info, "fine");
        let stray = LogRecord::new("NOPE", LogLevel::Error, "where");

        assert_eq!(dispatcher.handle(warn), DispatchOutcome::Written);
        assert_eq!(dispatcher.handle(info), DispatchOutcome::BelowThreshold);
        assert_eq!(dispatcher.handle(stray), DispatchOutcome::UnknownChannel);

        assert_eq!(sink.records.lock().len(), 1);
        assert_eq!(metrics.written_count(), 1);
        assert_eq!(metrics.filtered_count(), 1);
        assert_eq!(metrics.dropped_count(), 1);
    }

    #[test]
    fn test_without_sink_records_are_dropped() {
        let (dispatcher, metrics) = dispatcher(None);
        let record = LogRecord::new("HTTP", LogLevel::Error, "lost");

        assert_eq!(dispatcher.handle(record), DispatchOutcome::NoSink);
        assert_eq!(metrics.dropped_count(), 1);
    }

    #[test]
    fn test_write_failure_is_contained() {
        let sink = Arc::new(VecSink {
            min_level: LogLevel::Debug,
            records: Mutex::new(Vec::new()),
            fail: true,
        });
        let (dispatcher, metrics) = dispatcher(Some(sink));

        let outcome = dispatcher.handle(LogRecord::new("DB", LogLevel::Error, "x"));
        assert_eq!(outcome, DispatchOutcome::WriteFailed);
        assert_eq!(metrics.failed_write_count(), 1);
    }

    #[test]
    fn test_processors_run_in_order() {
        struct Tag(&'static str);

        impl crate::core::Processor for Tag {
            fn process(&self, record: LogRecord) -> LogRecord {
                let seen = match record.context().get("tags") {
                    Some(crate::core::FieldValue::String(s)) => format!("{},{}", s, self.0),
                    _ => self.0.to_string(),
                };
                record.with_context_field("tags", seen)
            }

            fn name(&self) -> &str {
                self.0
            }
        }

        let sink = VecSink::new(LogLevel::Debug);
        let dispatcher = LogDispatcher::new(
            Some(sink.clone()),
            vec![Arc::new(Tag("a")), Arc::new(Tag("b"))],
            ChannelSet::default(),
            Arc::new(DispatchMetrics::new()),
        );

        dispatcher.handle(LogRecord::new("DB", LogLevel::Info, "x"));

        let records = sink.records.lock();
        assert_eq!(
            records[0].context().get("tags"),
            Some(&crate::core::FieldValue::String("a,b".into()))
        );
    }
}
