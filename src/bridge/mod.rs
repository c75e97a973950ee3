//! Bootstrap and dispatch: wiring log events, sinks and listeners onto the bus

pub mod bootstrapper;
pub mod channels;
pub mod dispatcher;
pub mod emitter;
pub mod error_capture;
pub mod sink_resolver;

pub use bootstrapper::{BootOutcome, Bootstrapper, BootstrapperBuilder, SetupState};
pub use channels::{ChannelSet, DEFAULT_CHANNELS, ERROR_CHANNEL};
pub use dispatcher::{DispatchOutcome, LogDispatcher, BRIDGE_PRIORITY};
pub use emitter::LogEmitter;
pub use error_capture::{ErrorCapture, PanicCapture};
pub use sink_resolver::{DefaultSinkResolver, DEFAULT_SINK_SUBDIR};
