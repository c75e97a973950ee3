//! Binding contributed listeners onto the callback bus

use super::binding::CallbackBinding;
use super::descriptor::ListenerDescriptor;
use crate::bridge::LogEmitter;
use crate::hooks::{filters, CallbackBus, HookValue};
use std::sync::Arc;

/// Priority for listeners that do not ask for one; runs them late.
pub const DEFAULT_LISTENER_PRIORITY: i64 = i64::MAX - 10;

pub struct ListenerBindingEngine {
    bus: Arc<dyn CallbackBus>,
    emitter: LogEmitter,
}

impl ListenerBindingEngine {
    pub fn new(bus: Arc<dyn CallbackBus>, emitter: LogEmitter) -> Self {
        Self { bus, emitter }
    }

    /// The listener's priority after the priority extension point.
    ///
    /// Anything but an `Int` from the extension point keeps the prior value.
    pub fn effective_priority(&self, listener: &ListenerDescriptor) -> i64 {
        let priority = listener.priority().unwrap_or(DEFAULT_LISTENER_PRIORITY);

        self.bus
            .trigger_transform(
                filters::LISTENER_PRIORITY,
                HookValue::Int(priority),
                &[HookValue::Str(listener.id().to_string())],
            )
            .as_int()
            .unwrap_or(priority)
    }

    /// Register one binding per event the listener declares.
    ///
    /// A listener without capabilities yields no bindings.
    pub fn bind(&self, listener: ListenerDescriptor) -> Vec<Arc<CallbackBinding>> {
        let Some(capability) = listener.capabilities().binding_capability() else {
            tracing::debug!(
                listener = %listener.id(),
                "listener has neither observer nor transformer capability, not binding it"
            );
            return Vec::new();
        };

        let priority = self.effective_priority(&listener);

        listener
            .events()
            .iter()
            .map(|event| {
                let binding = Arc::new(CallbackBinding::new(
                    event.clone(),
                    priority,
                    capability,
                    listener.clone(),
                    self.emitter.clone(),
                ));
                binding.install(self.bus.as_ref());
                tracing::debug!(
                    listener = %listener.id(),
                    event = %event,
                    priority,
                    capability = ?capability,
                    "bound listener"
                );
                binding
            })
            .collect()
    }

    pub fn bind_all<I>(&self, listeners: I) -> Vec<Arc<CallbackBinding>>
    where
        I: IntoIterator<Item = ListenerDescriptor>,
    {
        listeners
            .into_iter()
            .flat_map(|listener| self.bind(listener))
            .collect()
    }
}
