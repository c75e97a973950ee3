//! # hooklog
//!
//! Bridges structured log records to a priority-ordered callback bus, so
//! third-party code can observe or transform log records without touching the
//! logging pipeline itself.
//!
//! ## Features
//!
//! - **One-time setup**: [`Bootstrapper::boot`] is idempotent and never fails
//! - **Severity-ordered bindings**: one dispatch binding per level event,
//!   more severe levels at earlier priorities
//! - **Contributed listeners**: observers publish new records, transformers
//!   rewrite values threaded through an event
//! - **Default file sink**: resolved through overridable extension points
//!
//! ## Example
//!
//! ```
//! use hooklog::prelude::*;
//! use std::sync::Arc;
//!
//! let bus: Arc<dyn CallbackBus> = Arc::new(MemoryBus::new());
//!
//! // keep the default sink out of the way for this example
//! bus.register_transform(
//!     filters::DEFAULT_SINK,
//!     Arc::new(|_: HookValue, _: &[HookValue]| HookValue::Bool(false)),
//!     10,
//!     1,
//! );
//!
//! let boot = Bootstrapper::builder(Arc::clone(&bus))
//!     .config(BootConfig::default().with_error_capture(false))
//!     .build();
//! boot.boot();
//!
//! bus.trigger(LOG_EVENT, &[HookValue::from("cache warmed")]);
//! hooklog::error!(boot.emitter(), "payment gateway returned {}", 502);
//! ```

pub mod bridge;
pub mod core;
pub mod hooks;
pub mod listeners;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::bridge::{BootOutcome, Bootstrapper, LogEmitter};
    pub use crate::core::{
        BootConfig, FieldValue, LogContext, LogLevel, LogRecord, Processor, Sink,
    };
    pub use crate::hooks::{filters, level_event, CallbackBus, HookValue, MemoryBus, LOG_EVENT};
    pub use crate::listeners::{
        HookListener, ListenerDescriptor, ListenerRegistry, ObserverListener,
        TransformerListener,
    };
}

pub use bridge::{
    BootOutcome, Bootstrapper, BootstrapperBuilder, ChannelSet, DefaultSinkResolver,
    DispatchOutcome, ErrorCapture, LogDispatcher, LogEmitter, PanicCapture, SetupState,
    BRIDGE_PRIORITY, ERROR_CHANNEL,
};
pub use crate::core::{
    priority_for_level, BootConfig, DispatchMetrics, FieldValue, HookLogError,
    HostContextProcessor, LogContext, LogLevel, LogRecord, Processor, Result, SharedProcessor,
    SharedSink, Sink, DEFAULT_CHANNEL, MAX_LEVEL_CODE,
};
pub use hooks::{
    filters, level_event, ActionHandler, CallbackBus, HandlerKind, HookValue, MemoryBus,
    RegisteredHandler, TransformHandler, LOADED_EVENT, LOG_EVENT, REGISTER_LISTENERS_EVENT,
    SETUP_EVENT, UNBOUNDED_ARGS,
};
pub use listeners::{
    CallbackBinding, Capability, CapabilitySet, HookListener, ListenerBindingEngine,
    ListenerDescriptor, ListenerId, ListenerRegistry, ObserverListener, TransformerListener,
    DEFAULT_LISTENER_PRIORITY,
};
pub use sinks::FileSink;
