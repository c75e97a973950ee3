//! In-process callback bus

use super::bus::{ActionHandler, CallbackBus, TransformHandler};
use super::value::HookValue;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Action,
    Transform,
}

/// What [`MemoryBus::registered`] reports about one binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredHandler {
    pub priority: i64,
    pub kind: HandlerKind,
    pub accepted_args: usize,
}

#[derive(Clone)]
enum Handler {
    Action(ActionHandler),
    Transform(TransformHandler),
}

#[derive(Clone)]
struct Entry {
    handler: Handler,
    accepted_args: usize,
}

type PriorityTable = BTreeMap<i64, Vec<Entry>>;

/// [`CallbackBus`] kept in memory for the lifetime of one unit of work.
///
/// Handlers are snapshotted before a trigger runs, so a handler may register
/// new handlers or trigger events (including the one being dispatched) without
/// deadlocking; handlers added during a dispatch run from the next trigger on.
///
/// # Example
///
/// ```
/// use hooklog::{CallbackBus, HookValue, MemoryBus};
/// use std::sync::Arc;
///
/// let bus = MemoryBus::new();
/// bus.register_transform(
///     "greeting",
///     Arc::new(|value: HookValue, _args: &[HookValue]| match value {
///         HookValue::Str(s) => HookValue::Str(format!("{s}!")),
///         other => other,
///     }),
///     10,
///     1,
/// );
///
/// let out = bus.trigger_transform("greeting", HookValue::from("hello"), &[]);
/// assert_eq!(out.as_str(), Some("hello!"));
/// ```
#[derive(Default)]
pub struct MemoryBus {
    events: RwLock<HashMap<String, PriorityTable>>,
    fired: Mutex<HashMap<String, usize>>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, event: &str, priority: i64, entry: Entry) {
        self.events
            .write()
            .entry(event.to_string())
            .or_default()
            .entry(priority)
            .or_default()
            .push(entry);
    }

    fn snapshot(&self, event: &str) -> Vec<Entry> {
        self.events
            .read()
            .get(event)
            .map(|table| table.values().flatten().cloned().collect())
            .unwrap_or_default()
    }

    /// Bindings of `event` in dispatch order.
    pub fn registered(&self, event: &str) -> Vec<RegisteredHandler> {
        self.events
            .read()
            .get(event)
            .map(|table| {
                table
                    .iter()
                    .flat_map(|(priority, entries)| {
                        entries.iter().map(move |entry| RegisteredHandler {
                            priority: *priority,
                            kind: match entry.handler {
                                Handler::Action(_) => HandlerKind::Action,
                                Handler::Transform(_) => HandlerKind::Transform,
                            },
                            accepted_args: entry.accepted_args,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_bindings(&self, event: &str) -> bool {
        self.events
            .read()
            .get(event)
            .is_some_and(|table| table.values().any(|entries| !entries.is_empty()))
    }

    /// Total number of bindings across all events.
    pub fn binding_count(&self) -> usize {
        self.events
            .read()
            .values()
            .flat_map(|table| table.values())
            .map(Vec::len)
            .sum()
    }

    /// Names of every event with at least one binding, sorted.
    pub fn events(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .events
            .read()
            .iter()
            .filter(|(_, table)| table.values().any(|entries| !entries.is_empty()))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}

impl CallbackBus for MemoryBus {
    fn register(&self, event: &str, handler: ActionHandler, priority: i64, accepted_args: usize) {
        self.insert(
            event,
            priority,
            Entry {
                handler: Handler::Action(handler),
                accepted_args,
            },
        );
    }

    fn register_transform(
        &self,
        event: &str,
        handler: TransformHandler,
        priority: i64,
        accepted_args: usize,
    ) {
        self.insert(
            event,
            priority,
            Entry {
                handler: Handler::Transform(handler),
                accepted_args,
            },
        );
    }

    fn trigger(&self, event: &str, args: &[HookValue]) {
        *self.fired.lock().entry(event.to_string()).or_insert(0) += 1;

        for entry in self.snapshot(event) {
            if let Handler::Action(handler) = entry.handler {
                let take = entry.accepted_args.min(args.len());
                handler(&args[..take]);
            }
        }
    }

    fn trigger_transform(&self, event: &str, value: HookValue, args: &[HookValue]) -> HookValue {
        self.snapshot(event)
            .into_iter()
            .fold(value, |value, entry| match entry.handler {
                Handler::Transform(handler) => {
                    let take = entry.accepted_args.saturating_sub(1).min(args.len());
                    handler(value, &args[..take])
                }
                Handler::Action(_) => value,
            })
    }

    fn trigger_count(&self, event: &str) -> usize {
        self.fired.lock().get(event).copied().unwrap_or(0)
    }
}
