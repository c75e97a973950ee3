//! Log record structure

use super::log_context::{FieldValue, LogContext};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel used when a record is published without one.
pub const DEFAULT_CHANNEL: &str = "DEBUG";

/// A published log record.
///
/// Records are never changed in place once published; the `with_*` methods
/// consume the record and return a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    channel: String,
    level: LogLevel,
    message: String,
    #[serde(default, skip_serializing_if = "LogContext::is_empty")]
    context: LogContext,
    datetime: DateTime<Utc>,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log lines.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(channel: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            channel: channel.into(),
            level,
            message: Self::sanitize_message(&message),
            context: LogContext::new(),
            datetime: Utc::now(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.datetime
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn with_context_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.context = self.context.with_field(key, value);
        self
    }

    #[must_use]
    pub fn with_datetime(mut self, datetime: DateTime<Utc>) -> Self {
        self.datetime = datetime;
        self
    }
}
