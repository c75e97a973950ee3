//! Values threaded through bus callbacks

use crate::core::{LogRecord, SharedProcessor, SharedSink};
use crate::listeners::ListenerRegistry;
use std::fmt;
use std::sync::Arc;

/// Argument or filtered value passed through the callback bus.
#[derive(Clone, Default)]
pub enum HookValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<HookValue>),
    Record(LogRecord),
    Sink(SharedSink),
    Processor(SharedProcessor),
    Listeners(Arc<ListenerRegistry>),
}

impl HookValue {
    pub fn is_null(&self) -> bool {
        matches!(self, HookValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HookValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            HookValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HookValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&LogRecord> {
        match self {
            HookValue::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[HookValue]> {
        match self {
            HookValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_listeners(&self) -> Option<&Arc<ListenerRegistry>> {
        match self {
            HookValue::Listeners(registry) => Some(registry),
            _ => None,
        }
    }
}

impl fmt::Debug for HookValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookValue::Null => write!(f, "Null"),
            HookValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            HookValue::Int(i) => f.debug_tuple("Int").field(i).finish(),
            HookValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
            HookValue::List(items) => f.debug_tuple("List").field(items).finish(),
            HookValue::Record(r) => f.debug_tuple("Record").field(r).finish(),
            HookValue::Sink(s) => f.debug_tuple("Sink").field(&s.name()).finish(),
            HookValue::Processor(p) => f.debug_tuple("Processor").field(&p.name()).finish(),
            HookValue::Listeners(registry) => f
                .debug_tuple("Listeners")
                .field(&registry.len())
                .finish(),
        }
    }
}

impl PartialEq for HookValue {
    /// Sinks, processors and registries compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HookValue::Null, HookValue::Null) => true,
            (HookValue::Bool(a), HookValue::Bool(b)) => a == b,
            (HookValue::Int(a), HookValue::Int(b)) => a == b,
            (HookValue::Str(a), HookValue::Str(b)) => a == b,
            (HookValue::List(a), HookValue::List(b)) => a == b,
            (HookValue::Record(a), HookValue::Record(b)) => a == b,
            (HookValue::Sink(a), HookValue::Sink(b)) => Arc::ptr_eq(a, b),
            (HookValue::Processor(a), HookValue::Processor(b)) => Arc::ptr_eq(a, b),
            (HookValue::Listeners(a), HookValue::Listeners(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for HookValue {
    fn from(b: bool) -> Self {
        HookValue::Bool(b)
    }
}

impl From<i64> for HookValue {
    fn from(i: i64) -> Self {
        HookValue::Int(i)
    }
}

impl From<&str> for HookValue {
    fn from(s: &str) -> Self {
        HookValue::Str(s.to_string())
    }
}

impl From<String> for HookValue {
    fn from(s: String) -> Self {
        HookValue::Str(s)
    }
}

impl From<LogRecord> for HookValue {
    fn from(r: LogRecord) -> Self {
        HookValue::Record(r)
    }
}

impl From<SharedSink> for HookValue {
    fn from(s: SharedSink) -> Self {
        HookValue::Sink(s)
    }
}

impl From<SharedProcessor> for HookValue {
    fn from(p: SharedProcessor) -> Self {
        HookValue::Processor(p)
    }
}

impl<T: Into<HookValue>> From<Vec<T>> for HookValue {
    fn from(items: Vec<T>) -> Self {
        HookValue::List(items.into_iter().map(Into::into).collect())
    }
}
