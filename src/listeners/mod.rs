//! Contributed listeners: descriptors, the registry and the binding engine

pub mod binding;
pub mod descriptor;
pub mod engine;
pub mod registry;

pub use binding::CallbackBinding;
pub use descriptor::{
    Capability, CapabilitySet, HookListener, ListenerDescriptor, ListenerId, ObserverListener,
    TransformerListener,
};
pub use engine::{ListenerBindingEngine, DEFAULT_LISTENER_PRIORITY};
pub use registry::ListenerRegistry;
