//! Core types: levels, records, sinks, processors, configuration

pub mod config;
pub mod error;
pub mod log_context;
pub mod log_level;
pub mod log_record;
pub mod metrics;
pub mod processor;
pub mod sink;

pub use config::{BootConfig, CONTENT_DIR_VAR, DEFAULT_LOG_DIR_VAR, MIN_LEVEL_VAR};
pub use error::{HookLogError, Result};
pub use log_context::{FieldValue, LogContext};
pub use log_level::{priority_for_level, LogLevel, MAX_LEVEL_CODE};
pub use log_record::{LogRecord, DEFAULT_CHANNEL};
pub use metrics::DispatchMetrics;
pub use processor::{HostContextProcessor, Processor, SharedProcessor};
pub use sink::{SharedSink, Sink};
