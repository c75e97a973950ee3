//! Error-capturing collaborator

use super::channels::ERROR_CHANNEL;
use super::emitter::LogEmitter;
use crate::core::{LogLevel, LogRecord};
use parking_lot::Mutex;
use std::cell::Cell;
use std::panic::PanicHookInfo;
use std::sync::Once;

/// Turns host errors into log records.
pub trait ErrorCapture: Send + Sync {
    /// Start capturing; captured errors are published through `emitter`.
    fn init(&self, emitter: LogEmitter);

    fn name(&self) -> &str;
}

thread_local! {
    static IN_PANIC_HOOK: Cell<bool> = const { Cell::new(false) };
}

static HOOK_INSTALLED: Once = Once::new();

static PANIC_EMITTER: Mutex<Option<LogEmitter>> = parking_lot::const_mutex(None);

/// Publishes panics as `CRITICAL` records on the [`ERROR_CHANNEL`].
///
/// The process panic hook is installed once and chains to the hook that was
/// in place before, so the default panic message is still printed. Each
/// `init` redirects it to the new emitter; earlier emitters stop receiving
/// panics.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicCapture;

impl PanicCapture {
    pub fn new() -> Self {
        Self
    }

    /// The record published for a panic.
    pub fn record_for(info: &PanicHookInfo<'_>) -> LogRecord {
        let payload = info.payload();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        let mut record = LogRecord::new(ERROR_CHANNEL, LogLevel::Critical, message);
        if let Some(location) = info.location() {
            record = record
                .with_context_field("file", location.file())
                .with_context_field("line", location.line());
        }
        if let Some(name) = std::thread::current().name() {
            record = record.with_context_field("thread", name);
        }
        record
    }

    fn install_hook() {
        let previous = std::panic::take_hook();

        std::panic::set_hook(Box::new(move |info| {
            // a listener panicking while we publish must not recurse here
            let nested = IN_PANIC_HOOK.with(|flag| flag.replace(true));
            if !nested {
                let emitter = PANIC_EMITTER.lock().clone();
                if let Some(emitter) = emitter {
                    emitter.emit(Self::record_for(info));
                }
                IN_PANIC_HOOK.with(|flag| flag.set(false));
            }
            previous(info);
        }));
    }
}

impl ErrorCapture for PanicCapture {
    fn init(&self, emitter: LogEmitter) {
        *PANIC_EMITTER.lock() = Some(emitter);
        HOOK_INSTALLED.call_once(Self::install_hook);
    }

    fn name(&self) -> &str {
        "panic"
    }
}
