//! Callback bus contract, the in-process bus and the values it carries

pub mod bus;
pub mod events;
pub mod memory_bus;
pub mod value;

pub use bus::{ActionHandler, CallbackBus, TransformHandler, UNBOUNDED_ARGS};
pub use events::{
    filters, level_event, LOADED_EVENT, LOG_EVENT, REGISTER_LISTENERS_EVENT, SETUP_EVENT,
};
pub use memory_bus::{HandlerKind, MemoryBus, RegisteredHandler};
pub use value::HookValue;
