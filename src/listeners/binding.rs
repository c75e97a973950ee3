//! Callback bindings produced for listeners

use super::descriptor::{Capability, ListenerDescriptor, ListenerId};
use crate::bridge::LogEmitter;
use crate::hooks::{CallbackBus, HookValue, UNBOUNDED_ARGS};
use std::fmt;
use std::sync::Arc;

/// One listener bound to one event name.
pub struct CallbackBinding {
    event: String,
    priority: i64,
    capability: Capability,
    listener: ListenerDescriptor,
    emitter: LogEmitter,
}

impl CallbackBinding {
    pub(crate) fn new(
        event: impl Into<String>,
        priority: i64,
        capability: Capability,
        listener: ListenerDescriptor,
        emitter: LogEmitter,
    ) -> Self {
        Self {
            event: event.into(),
            priority,
            capability,
            listener,
            emitter,
        }
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn listener_id(&self) -> &ListenerId {
        self.listener.id()
    }

    /// Run the listener with `args`.
    ///
    /// The observer side runs first; a record it returns is published on the
    /// generic log event before this call returns. For a transformer binding
    /// `args[0]` is the threaded value and the filter result is returned.
    pub fn invoke(&self, args: &[HookValue]) -> Option<HookValue> {
        self.observe(args);

        if self.capability != Capability::Transformer {
            return None;
        }

        let transformer = self.listener.transformer_handle()?;
        let (value, rest) = match args.split_first() {
            Some((value, rest)) => (value.clone(), rest),
            None => (HookValue::Null, args),
        };
        Some(transformer.filter(value, rest))
    }

    /// Run only the observer side, if the listener has one.
    fn observe(&self, args: &[HookValue]) {
        if let Some(observer) = self.listener.observer_handle() {
            if let Some(record) = observer.update(args) {
                self.emitter.emit(record);
            }
        }
    }

    /// Register on the bus according to the binding capability.
    ///
    /// A listener with both capabilities gets two registrations at the same
    /// priority: a broadcast reaches `update`, a transform runs `update` and
    /// returns the `filter` result.
    pub(crate) fn install(self: &Arc<Self>, bus: &dyn CallbackBus) {
        if self.listener.observer_handle().is_some() {
            let binding = Arc::clone(self);
            bus.register(
                &self.event,
                Arc::new(move |args: &[HookValue]| binding.observe(args)),
                self.priority,
                UNBOUNDED_ARGS,
            );
        }

        if self.capability == Capability::Transformer {
            let binding = Arc::clone(self);
            bus.register_transform(
                &self.event,
                Arc::new(move |value: HookValue, args: &[HookValue]| {
                    let mut full = Vec::with_capacity(args.len() + 1);
                    full.push(value.clone());
                    full.extend_from_slice(args);
                    binding.invoke(&full).unwrap_or(value)
                }),
                self.priority,
                UNBOUNDED_ARGS,
            );
        }
    }
}

impl fmt::Debug for CallbackBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackBinding")
            .field("event", &self.event)
            .field("priority", &self.priority)
            .field("capability", &self.capability)
            .field("listener", self.listener.id())
            .finish()
    }
}
