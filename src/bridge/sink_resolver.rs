//! Resolution of the default sink

use crate::core::{BootConfig, HookLogError, Result, SharedSink};
use crate::hooks::{filters, CallbackBus, HookValue};
use crate::sinks::FileSink;
use chrono::{DateTime, Utc};
use std::ffi::OsString;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Subdirectory of the content directory holding the default sink.
pub const DEFAULT_SINK_SUBDIR: &str = "hooklog";

/// Decision of the default-sink extension point.
enum Supplied {
    Sink(SharedSink),
    Disabled,
    Nothing,
}

/// Resolves where records go when nobody supplied a sink.
///
/// Each step can be overridden through an extension point on the bus:
/// the sink itself, its directory, its file name pattern and its full path.
pub struct DefaultSinkResolver<'a> {
    bus: &'a dyn CallbackBus,
    config: &'a BootConfig,
}

impl<'a> DefaultSinkResolver<'a> {
    pub fn new(bus: &'a dyn CallbackBus, config: &'a BootConfig) -> Self {
        Self { bus, config }
    }

    pub fn resolve(&self) -> Option<SharedSink> {
        self.resolve_at(Utc::now())
    }

    /// Like [`resolve`](Self::resolve) with a fixed date for the file name.
    pub fn resolve_at(&self, now: DateTime<Utc>) -> Option<SharedSink> {
        match self.supplied_sink() {
            Supplied::Sink(sink) => return Some(sink),
            Supplied::Disabled => {
                tracing::debug!("default sink disabled by extension point");
                return None;
            }
            Supplied::Nothing => {}
        }

        let path = self.sink_path(now);
        match self.open(&path) {
            Ok(sink) => Some(sink),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "no default log sink");
                None
            }
        }
    }

    fn supplied_sink(&self) -> Supplied {
        match self
            .bus
            .trigger_transform(filters::DEFAULT_SINK, HookValue::Null, &[])
        {
            HookValue::Sink(sink) => Supplied::Sink(sink),
            HookValue::Bool(false) => Supplied::Disabled,
            HookValue::Null => Supplied::Nothing,
            other => {
                tracing::debug!(value = ?other, "ignoring unsupported default sink override");
                Supplied::Nothing
            }
        }
    }

    /// Directory of the default sink.
    ///
    /// The environment variable named by the config wins over the content
    /// directory; the extension point wins over both.
    pub fn sink_dir(&self) -> PathBuf {
        self.sink_dir_from(std::env::var_os(&self.config.log_dir_var))
    }

    /// [`sink_dir`](Self::sink_dir) with the environment value already read.
    fn sink_dir_from(&self, env_dir: Option<OsString>) -> PathBuf {
        let dir = env_dir
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.config.content_dir.join(DEFAULT_SINK_SUBDIR));

        self.filtered_str(filters::DEFAULT_SINK_DIR, dir.to_string_lossy().into_owned())
            .map(PathBuf::from)
            .unwrap_or(dir)
    }

    /// File name of the default sink for `now`, relative to [`sink_dir`](Self::sink_dir).
    pub fn sink_filename(&self, now: DateTime<Utc>) -> String {
        let pattern = self
            .filtered_str(filters::DEFAULT_SINK_FILENAME, self.config.filename_pattern.clone())
            .unwrap_or_else(|| self.config.filename_pattern.clone());

        let mut filename = String::new();
        if write!(filename, "{}", now.format(&pattern)).is_err() {
            tracing::warn!(pattern = %pattern, "invalid file name pattern, using it verbatim");
            filename = pattern;
        }

        if Path::new(&filename).extension().is_none() && !self.config.default_extension.is_empty() {
            filename.push('.');
            filename.push_str(&self.config.default_extension);
        }

        filename
    }

    pub fn sink_path(&self, now: DateTime<Utc>) -> PathBuf {
        let path = self.sink_dir().join(self.sink_filename(now));

        self.filtered_str(filters::DEFAULT_SINK_PATH, path.to_string_lossy().into_owned())
            .map(PathBuf::from)
            .unwrap_or(path)
    }

    fn open(&self, path: &Path) -> Result<SharedSink> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| HookLogError::directory_create(parent, e))?;
        }

        Ok(Arc::new(FileSink::new(path, self.config.min_level)?))
    }

    /// Run a string extension point; `None` unless it returns a non-empty `Str`.
    fn filtered_str(&self, filter: &str, value: String) -> Option<String> {
        match self.bus.trigger_transform(filter, HookValue::Str(value), &[]) {
            HookValue::Str(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}
