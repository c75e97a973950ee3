//! File sink implementation

use crate::core::{HookLogError, LogLevel, LogRecord, Result, Sink};
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one line per record to a file.
///
/// Every write holds an exclusive advisory lock on the file, so concurrent
/// processes sharing the default sink do not interleave partial lines.
pub struct FileSink {
    path: PathBuf,
    min_level: LogLevel,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, min_level: LogLevel) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| HookLogError::sink_open(&path, e))?;

        Ok(Self {
            path,
            min_level,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format_line(record: &LogRecord) -> Result<String> {
        let mut line = format!(
            "[{}] {}.{}: {}",
            record.datetime().to_rfc3339(),
            record.channel(),
            record.level(),
            record.message()
        );

        if !record.context().is_empty() {
            line.push(' ');
            line.push_str(&record.context().to_json()?);
        }

        line.push('\n');
        Ok(line)
    }
}

impl Sink for FileSink {
    fn append(&self, record: &LogRecord) -> Result<()> {
        let line = Self::format_line(record)?;
        let mut writer = self.writer.lock();

        FileExt::lock_exclusive(writer.get_ref())?;
        let written = writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.flush());
        FileExt::unlock(writer.get_ref())?;

        written.map_err(HookLogError::from)
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }

    fn min_level(&self) -> LogLevel {
        self.min_level
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.writer.get_mut().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_one_line_per_record() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.log");
        let sink = FileSink::new(&path, LogLevel::Debug).unwrap();

        sink.append(&LogRecord::new("HTTP", LogLevel::Info, "first")).unwrap();
        sink.append(
            &LogRecord::new("DB", LogLevel::Error, "second\ninjected").with_context_field("ms", 12),
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("HTTP.INFO: first"));
        assert!(lines[1].contains("DB.ERROR: second\\ninjected {\"ms\":12}"));
    }

    #[test]
    fn test_appends_to_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.log");
        std::fs::write(&path, "existing\n").unwrap();

        let sink = FileSink::new(&path, LogLevel::Warning).unwrap();
        sink.append(&LogRecord::new("HTTP", LogLevel::Warning, "new")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("existing\n"));
        assert_eq!(sink.min_level(), LogLevel::Warning);
        assert!(!sink.handles(LogLevel::Info));
        assert_eq!(sink.location(), Some(path.as_path()));
    }

    #[test]
    fn test_open_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("app.log");

        let err = FileSink::new(&path, LogLevel::Debug).err().unwrap();
        assert!(matches!(err, HookLogError::SinkOpen { .. }));
    }
}
