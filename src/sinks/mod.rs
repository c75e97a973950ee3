//! Sink implementations

pub mod file;

pub use file::FileSink;

pub use crate::core::Sink;
