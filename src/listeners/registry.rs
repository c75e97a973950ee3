//! Listener registry filled during the registration broadcast

use super::descriptor::ListenerDescriptor;
use crate::core::{HookLogError, Result};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct RegistryState {
    listeners: Vec<ListenerDescriptor>,
    flushed: bool,
}

/// Write-once-then-drained collection of listener descriptors.
///
/// Contributors receive it as the argument of the registration broadcast and
/// call [`register`](Self::register). The bootstrapper drains it right after
/// the broadcast returns; later registrations are rejected.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    state: Mutex<RegistryState>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, descriptor: ListenerDescriptor) -> Result<()> {
        let mut state = self.state.lock();
        if state.flushed {
            return Err(HookLogError::registry_flushed(descriptor.id().as_str()));
        }
        state.listeners.push(descriptor);
        Ok(())
    }

    /// Current contents, in registration order. Empty once flushed.
    pub fn listeners(&self) -> Vec<ListenerDescriptor> {
        self.state.lock().listeners.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the contents and close the registry.
    pub fn drain(&self) -> Vec<ListenerDescriptor> {
        let mut state = self.state.lock();
        state.flushed = true;
        std::mem::take(&mut state.listeners)
    }

    /// Discard the contents and close the registry.
    pub fn flush(&self) {
        self.drain();
    }

    pub fn is_flushed(&self) -> bool {
        self.state.lock().flushed
    }
}
