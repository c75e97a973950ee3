//! Logging macros for ergonomic record publishing.
//!
//! Each macro formats its message like `format!` and publishes it through a
//! [`LogEmitter`](crate::LogEmitter) on the default channel.
//!
//! # Examples
//!
//! ```
//! use hooklog::prelude::*;
//! use hooklog::{info, warning};
//! use std::sync::Arc;
//!
//! let bus: Arc<dyn CallbackBus> = Arc::new(MemoryBus::new());
//! let boot = Bootstrapper::new(Arc::clone(&bus));
//! let emitter = boot.emitter();
//!
//! info!(emitter, "Server started");
//!
//! let port = 8080;
//! warning!(emitter, "Port {} is already bound", port);
//!
//! assert_eq!(bus.trigger_count(LOG_EVENT), 2);
//! ```

/// Publish a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use hooklog::prelude::*;
/// # use std::sync::Arc;
/// # let bus: Arc<dyn CallbackBus> = Arc::new(MemoryBus::new());
/// # let boot = Bootstrapper::new(Arc::clone(&bus));
/// use hooklog::log;
/// log!(boot.emitter(), LogLevel::Notice, "Simple message");
/// log!(boot.emitter(), LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($emitter:expr, $level:expr, $($arg:tt)+) => {
        $emitter.log($level, format!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($emitter:expr, $($arg:tt)+) => {
        $crate::log!($emitter, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($emitter:expr, $($arg:tt)+) => {
        $crate::log!($emitter, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! notice {
    ($emitter:expr, $($arg:tt)+) => {
        $crate::log!($emitter, $crate::LogLevel::Notice, $($arg)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($emitter:expr, $($arg:tt)+) => {
        $crate::log!($emitter, $crate::LogLevel::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($emitter:expr, $($arg:tt)+) => {
        $crate::log!($emitter, $crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical {
    ($emitter:expr, $($arg:tt)+) => {
        $crate::log!($emitter, $crate::LogLevel::Critical, $($arg)+)
    };
}

#[macro_export]
macro_rules! alert {
    ($emitter:expr, $($arg:tt)+) => {
        $crate::log!($emitter, $crate::LogLevel::Alert, $($arg)+)
    };
}

#[macro_export]
macro_rules! emergency {
    ($emitter:expr, $($arg:tt)+) => {
        $crate::log!($emitter, $crate::LogLevel::Emergency, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::hooks::{CallbackBus, HookValue, MemoryBus, LOG_EVENT};
    use crate::Bootstrapper;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_macros_publish_formatted_records() {
        let bus: Arc<dyn CallbackBus> = Arc::new(MemoryBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        bus.register(
            LOG_EVENT,
            Arc::new(move |args: &[HookValue]| {
                if let Some(record) = args.first().and_then(HookValue::as_record) {
                    seen_clone
                        .lock()
                        .push(format!("{} {}", record.level(), record.message()));
                }
            }),
            10,
            1,
        );

        let boot = Bootstrapper::new(Arc::clone(&bus));
        let emitter = boot.emitter();

        crate::debug!(emitter, "d{}", 1);
        crate::critical!(emitter, "disk {}% full", 99);
        crate::emergency!(emitter, "down");

        assert_eq!(
            *seen.lock(),
            vec!["DEBUG d1", "CRITICAL disk 99% full", "EMERGENCY down"]
        );
    }
}
