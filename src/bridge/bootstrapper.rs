//! One-time setup of the hook log bridge

use super::channels::ChannelSet;
use super::dispatcher::LogDispatcher;
use super::emitter::LogEmitter;
use super::error_capture::{ErrorCapture, PanicCapture};
use super::sink_resolver::DefaultSinkResolver;
use crate::core::{BootConfig, DispatchMetrics, HostContextProcessor, SharedProcessor, SharedSink};
use crate::hooks::{
    filters, CallbackBus, HookValue, LOADED_EVENT, REGISTER_LISTENERS_EVENT, SETUP_EVENT,
};
use crate::listeners::{CallbackBinding, ListenerBindingEngine, ListenerRegistry};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// "Has booted" flag; goes from `false` to `true` once and never back.
#[derive(Debug, Default)]
pub struct SetupState {
    booted: AtomicBool,
}

impl SetupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_booted(&self) -> bool {
        self.booted.load(Ordering::SeqCst)
    }

    /// Returns `true` only for the call that performed the transition.
    pub fn mark_booted(&self) -> bool {
        self.booted
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootOutcome {
    Booted,
    AlreadyBooted,
    Disabled,
}

/// Wires the dispatch bridge and contributed listeners onto a bus.
///
/// # Example
///
/// ```
/// use hooklog::{BootConfig, BootOutcome, Bootstrapper, CallbackBus, MemoryBus};
/// use std::sync::Arc;
///
/// let bus: Arc<dyn CallbackBus> = Arc::new(MemoryBus::new());
/// let boot = Bootstrapper::builder(Arc::clone(&bus))
///     .config(BootConfig::default().with_error_capture(false))
///     .build();
///
/// assert_eq!(boot.boot(), BootOutcome::Booted);
/// assert_eq!(boot.boot(), BootOutcome::AlreadyBooted);
/// ```
pub struct Bootstrapper {
    bus: Arc<dyn CallbackBus>,
    config: BootConfig,
    state: SetupState,
    error_capture: Arc<dyn ErrorCapture>,
    metrics: Arc<DispatchMetrics>,
    emitter: LogEmitter,
    default_sink: Mutex<Option<SharedSink>>,
    bindings: Mutex<Vec<Arc<CallbackBinding>>>,
}

impl Bootstrapper {
    pub fn new(bus: Arc<dyn CallbackBus>) -> Self {
        Self::builder(bus).build()
    }

    pub fn builder(bus: Arc<dyn CallbackBus>) -> BootstrapperBuilder {
        BootstrapperBuilder::new(bus)
    }

    /// Run setup once. Never fails; see [`BootOutcome`] for what happened.
    pub fn boot(&self) -> BootOutcome {
        if self.state.is_booted() || self.bus.trigger_count(SETUP_EVENT) > 0 {
            tracing::debug!("hook log bridge already set up");
            return BootOutcome::AlreadyBooted;
        }

        let enabled = self
            .bus
            .trigger_transform(filters::ENABLE, HookValue::Bool(true), &[]);
        if enabled.as_bool() == Some(false) {
            tracing::debug!("hook log bridge disabled by extension point");
            return BootOutcome::Disabled;
        }

        if !self.state.mark_booted() {
            return BootOutcome::AlreadyBooted;
        }
        self.bus.trigger(SETUP_EVENT, &[]);

        self.init_error_capture();

        let sink = DefaultSinkResolver::new(self.bus.as_ref(), &self.config).resolve();
        *self.default_sink.lock() = sink.clone();

        let dispatcher = Arc::new(LogDispatcher::new(
            sink,
            self.resolve_processors(),
            ChannelSet::resolve(self.bus.as_ref()),
            Arc::clone(&self.metrics),
        ));
        dispatcher.install(self.bus.as_ref());

        self.bind_listeners();

        self.bus.trigger(LOADED_EVENT, &[]);
        tracing::debug!(
            listeners = self.bindings.lock().len(),
            has_default_sink = self.default_sink.lock().is_some(),
            "hook log bridge loaded"
        );
        BootOutcome::Booted
    }

    fn init_error_capture(&self) {
        if !self.config.error_capture {
            return;
        }

        let enabled = self
            .bus
            .trigger_transform(filters::ENABLE_ERROR_CAPTURE, HookValue::Bool(true), &[]);
        if enabled.as_bool() == Some(false) {
            return;
        }

        tracing::debug!(capture = self.error_capture.name(), "initializing error capture");
        self.error_capture.init(self.emitter.clone());
    }

    /// Built-in processors passed through the processors extension point.
    fn resolve_processors(&self) -> Vec<SharedProcessor> {
        let defaults: Vec<SharedProcessor> = vec![Arc::new(HostContextProcessor::new())];
        let value = self.bus.trigger_transform(
            filters::DEFAULT_PROCESSORS,
            HookValue::List(defaults.iter().cloned().map(HookValue::Processor).collect()),
            &[],
        );

        match value.as_list() {
            Some(items) => items
                .iter()
                .filter_map(|item| match item {
                    HookValue::Processor(processor) => Some(Arc::clone(processor)),
                    _ => None,
                })
                .collect(),
            None => defaults,
        }
    }

    fn bind_listeners(&self) {
        let registry = Arc::new(ListenerRegistry::new());
        self.bus.trigger(
            REGISTER_LISTENERS_EVENT,
            &[HookValue::Listeners(Arc::clone(&registry))],
        );

        let engine = ListenerBindingEngine::new(Arc::clone(&self.bus), self.emitter.clone());
        let bindings = engine.bind_all(registry.drain());
        self.bindings.lock().extend(bindings);
    }

    pub fn is_booted(&self) -> bool {
        self.state.is_booted()
    }

    pub fn config(&self) -> &BootConfig {
        &self.config
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Emitter for publishing records onto the bus.
    pub fn emitter(&self) -> &LogEmitter {
        &self.emitter
    }

    /// The sink resolved during boot, if any.
    pub fn default_sink(&self) -> Option<SharedSink> {
        self.default_sink.lock().clone()
    }

    /// Bindings created for contributed listeners.
    pub fn bindings(&self) -> Vec<Arc<CallbackBinding>> {
        self.bindings.lock().clone()
    }
}

/// Builder for constructing a [`Bootstrapper`]
pub struct BootstrapperBuilder {
    bus: Arc<dyn CallbackBus>,
    config: BootConfig,
    error_capture: Arc<dyn ErrorCapture>,
}

impl BootstrapperBuilder {
    pub fn new(bus: Arc<dyn CallbackBus>) -> Self {
        Self {
            bus,
            config: BootConfig::default(),
            error_capture: Arc::new(PanicCapture::new()),
        }
    }

    #[must_use]
    pub fn config(mut self, config: BootConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the default [`PanicCapture`].
    #[must_use]
    pub fn error_capture<C: ErrorCapture + 'static>(mut self, capture: C) -> Self {
        self.error_capture = Arc::new(capture);
        self
    }

    pub fn build(self) -> Bootstrapper {
        let metrics = Arc::new(DispatchMetrics::new());
        let emitter = LogEmitter::new(
            &self.bus,
            self.config.max_reentrant_depth,
            Arc::clone(&metrics),
        );

        Bootstrapper {
            bus: self.bus,
            config: self.config,
            state: SetupState::new(),
            error_capture: self.error_capture,
            metrics,
            emitter,
            default_sink: Mutex::new(None),
            bindings: Mutex::new(Vec::new()),
        }
    }
}
