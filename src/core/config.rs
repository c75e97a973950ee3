//! Bootstrap configuration

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the default sink directory.
pub const DEFAULT_LOG_DIR_VAR: &str = "HOOKLOG_LOG_DIR";

/// Environment variable read by [`BootConfig::from_env`] for the sink threshold.
pub const MIN_LEVEL_VAR: &str = "HOOKLOG_MIN_LEVEL";

/// Environment variable read by [`BootConfig::from_env`] for the content directory.
pub const CONTENT_DIR_VAR: &str = "HOOKLOG_CONTENT_DIR";

/// Settings read by the bootstrapper and the default sink resolver.
///
/// # Example
///
/// ```
/// use hooklog::{BootConfig, LogLevel};
///
/// let config = BootConfig::default()
///     .with_content_dir("/srv/app/content")
///     .with_min_level(LogLevel::Warning)
///     .with_max_reentrant_depth(4);
///
/// assert_eq!(config.min_level, LogLevel::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Base directory; the default sink lives in `content_dir/hooklog`
    pub content_dir: PathBuf,

    /// Name of the environment variable overriding the sink directory
    pub log_dir_var: String,

    /// strftime pattern for the default sink file name
    pub filename_pattern: String,

    /// Extension appended when the file name has none
    pub default_extension: String,

    /// Minimum level written by the default sink
    pub min_level: LogLevel,

    /// Whether the error-capturing collaborator is initialized
    pub error_capture: bool,

    /// How deep listeners may nest record emissions
    pub max_reentrant_depth: usize,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            content_dir: std::env::temp_dir(),
            log_dir_var: DEFAULT_LOG_DIR_VAR.to_string(),
            filename_pattern: "%Y/%m-%d".to_string(),
            default_extension: "log".to_string(),
            min_level: LogLevel::Debug,
            error_capture: true,
            max_reentrant_depth: 8,
        }
    }
}

impl BootConfig {
    /// Defaults overridden by `HOOKLOG_CONTENT_DIR` and `HOOKLOG_MIN_LEVEL`.
    ///
    /// An unparsable level keeps the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = std::env::var_os(CONTENT_DIR_VAR).filter(|v| !v.is_empty()) {
            config.content_dir = PathBuf::from(dir);
        }

        if let Ok(level) = std::env::var(MIN_LEVEL_VAR) {
            match level.parse::<LogLevel>() {
                Ok(level) => config.min_level = level,
                Err(e) => tracing::warn!(error = %e, "ignoring {}", MIN_LEVEL_VAR),
            }
        }

        config
    }

    #[must_use]
    pub fn with_content_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.content_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_log_dir_var(mut self, var: impl Into<String>) -> Self {
        self.log_dir_var = var.into();
        self
    }

    #[must_use]
    pub fn with_filename_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.filename_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn with_default_extension(mut self, extension: impl Into<String>) -> Self {
        self.default_extension = extension.into();
        self
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn with_error_capture(mut self, enabled: bool) -> Self {
        self.error_capture = enabled;
        self
    }

    #[must_use]
    pub fn with_max_reentrant_depth(mut self, depth: usize) -> Self {
        self.max_reentrant_depth = depth;
        self
    }
}
