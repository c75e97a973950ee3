//! Sink trait for log record destinations

use super::{error::Result, log_level::LogLevel, log_record::LogRecord};
use std::path::Path;
use std::sync::Arc;

pub trait Sink: Send + Sync {
    fn append(&self, record: &LogRecord) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;

    /// Records below this level are not handed to `append`.
    fn min_level(&self) -> LogLevel {
        LogLevel::Debug
    }

    fn handles(&self, level: LogLevel) -> bool {
        level >= self.min_level()
    }

    /// Filesystem location, for sinks that write to one.
    fn location(&self) -> Option<&Path> {
        None
    }
}

pub type SharedSink = Arc<dyn Sink>;
