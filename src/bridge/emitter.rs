//! Publishing records onto the generic log event

use crate::core::{DispatchMetrics, LogLevel, LogRecord, DEFAULT_CHANNEL};
use crate::hooks::{CallbackBus, HookValue, LOG_EVENT};
use std::cell::Cell;
use std::sync::{Arc, Weak};

/// Publishes records on [`LOG_EVENT`].
///
/// Observer listeners publish from inside a dispatch, which re-enters the bus
/// synchronously. The emitter tracks how deeply such publications are nested
/// and refuses one nested more than `max_depth` levels below a top-level
/// publication, so a listener reacting to its own records cannot recurse
/// without bound. Nesting is counted per thread, across all emitters.
#[derive(Clone)]
pub struct LogEmitter {
    bus: Weak<dyn CallbackBus>,
    max_depth: usize,
    metrics: Arc<DispatchMetrics>,
}

thread_local! {
    static EMIT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

struct DepthGuard;

impl DepthGuard {
    /// Enter one level; returns the depth before entering.
    fn enter() -> (Self, usize) {
        let depth = EMIT_DEPTH.with(|d| d.replace(d.get() + 1));
        (DepthGuard, depth)
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        EMIT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

impl LogEmitter {
    pub fn new(bus: &Arc<dyn CallbackBus>, max_depth: usize, metrics: Arc<DispatchMetrics>) -> Self {
        Self {
            bus: Arc::downgrade(bus),
            max_depth,
            metrics,
        }
    }

    /// Publish `record`. Returns `false` when it was refused or the bus is gone.
    pub fn emit(&self, record: LogRecord) -> bool {
        let Some(bus) = self.bus.upgrade() else {
            return false;
        };

        let (_guard, depth) = DepthGuard::enter();

        if depth > self.max_depth {
            self.metrics.record_reentrancy_dropped();
            tracing::warn!(
                depth,
                max_depth = self.max_depth,
                channel = record.channel(),
                "dropping log record emitted too deep inside log dispatch"
            );
            return false;
        }

        bus.trigger(LOG_EVENT, &[HookValue::Record(record)]);
        true
    }

    /// Publish a message on the default channel.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> bool {
        self.emit(LogRecord::new(DEFAULT_CHANNEL, level, message))
    }

    /// Publish a message on `channel`.
    pub fn log_to(&self, channel: &str, level: LogLevel, message: impl Into<String>) -> bool {
        self.emit(LogRecord::new(channel, level, message))
    }

    /// Number of publications currently on this thread's stack.
    pub fn depth(&self) -> usize {
        EMIT_DEPTH.with(Cell::get)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
