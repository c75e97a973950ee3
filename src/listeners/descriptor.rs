//! Listener traits and the descriptor contributors register

use crate::core::LogRecord;
use crate::hooks::HookValue;
use std::fmt;
use std::sync::Arc;

/// Identity and interest of a contributed listener.
pub trait HookListener: Send + Sync {
    /// Stable identifier, passed to the priority extension point.
    fn id(&self) -> &str;

    /// Event names this listener wants to be bound to.
    fn listen_to(&self) -> Vec<String>;

    /// Explicit priority; `None` uses the engine default.
    fn priority(&self) -> Option<i64> {
        None
    }
}

/// A listener that reacts to an event, optionally producing a new record.
pub trait ObserverListener: HookListener {
    /// A returned record is published on the generic log event.
    fn update(&self, args: &[HookValue]) -> Option<LogRecord>;
}

/// A listener that rewrites the value threaded through an event.
pub trait TransformerListener: HookListener {
    fn filter(&self, value: HookValue, args: &[HookValue]) -> HookValue;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Observer,
    Transformer,
}

/// Subset of {Observer, Transformer}.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    observer: bool,
    transformer: bool,
}

impl CapabilitySet {
    pub const EMPTY: CapabilitySet = CapabilitySet {
        observer: false,
        transformer: false,
    };

    #[must_use]
    pub fn with(mut self, capability: Capability) -> Self {
        match capability {
            Capability::Observer => self.observer = true,
            Capability::Transformer => self.transformer = true,
        }
        self
    }

    pub fn contains(&self, capability: Capability) -> bool {
        match capability {
            Capability::Observer => self.observer,
            Capability::Transformer => self.transformer,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.observer && !self.transformer
    }

    /// The capability a binding is registered with. Transformer wins.
    pub fn binding_capability(&self) -> Option<Capability> {
        if self.transformer {
            Some(Capability::Transformer)
        } else if self.observer {
            Some(Capability::Observer)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(String);

impl ListenerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListenerId {
    fn from(s: &str) -> Self {
        ListenerId(s.to_string())
    }
}

/// What a contributor registers: the listener handle plus the capabilities
/// found on it at construction time.
///
/// # Example
///
/// ```
/// use hooklog::{Capability, HookListener, HookValue, ListenerDescriptor, TransformerListener};
/// use std::sync::Arc;
///
/// struct Upper;
///
/// impl HookListener for Upper {
///     fn id(&self) -> &str { "upper" }
///     fn listen_to(&self) -> Vec<String> { vec!["title".into()] }
/// }
///
/// impl TransformerListener for Upper {
///     fn filter(&self, value: HookValue, _args: &[HookValue]) -> HookValue {
///         match value {
///             HookValue::Str(s) => HookValue::Str(s.to_uppercase()),
///             other => other,
///         }
///     }
/// }
///
/// let descriptor = ListenerDescriptor::transformer(Arc::new(Upper));
/// assert!(descriptor.capabilities().contains(Capability::Transformer));
/// assert!(!descriptor.capabilities().contains(Capability::Observer));
/// ```
#[derive(Clone)]
pub struct ListenerDescriptor {
    id: ListenerId,
    events: Vec<String>,
    priority: Option<i64>,
    capabilities: CapabilitySet,
    observer: Option<Arc<dyn ObserverListener>>,
    transformer: Option<Arc<dyn TransformerListener>>,
}

impl ListenerDescriptor {
    fn from_listener(listener: &dyn HookListener) -> Self {
        let mut events: Vec<String> = Vec::new();
        for event in listener.listen_to() {
            if !events.contains(&event) {
                events.push(event);
            }
        }

        Self {
            id: ListenerId::from(listener.id()),
            events,
            priority: listener.priority(),
            capabilities: CapabilitySet::EMPTY,
            observer: None,
            transformer: None,
        }
    }

    /// A listener with no usable capability. Binding it creates nothing.
    pub fn inert<L: HookListener + 'static>(listener: Arc<L>) -> Self {
        Self::from_listener(listener.as_ref())
    }

    pub fn observer<L: ObserverListener + 'static>(listener: Arc<L>) -> Self {
        let mut descriptor = Self::from_listener(listener.as_ref());
        descriptor.capabilities = CapabilitySet::EMPTY.with(Capability::Observer);
        descriptor.observer = Some(listener);
        descriptor
    }

    pub fn transformer<L: TransformerListener + 'static>(listener: Arc<L>) -> Self {
        let mut descriptor = Self::from_listener(listener.as_ref());
        descriptor.capabilities = CapabilitySet::EMPTY.with(Capability::Transformer);
        descriptor.transformer = Some(listener);
        descriptor
    }

    pub fn observer_and_transformer<L>(listener: Arc<L>) -> Self
    where
        L: ObserverListener + TransformerListener + 'static,
    {
        let mut descriptor = Self::from_listener(listener.as_ref());
        descriptor.capabilities = CapabilitySet::EMPTY
            .with(Capability::Observer)
            .with(Capability::Transformer);
        descriptor.observer = Some(listener.clone());
        descriptor.transformer = Some(listener);
        descriptor
    }

    /// Override the listener's own priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn id(&self) -> &ListenerId {
        &self.id
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn priority(&self) -> Option<i64> {
        self.priority
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    pub(crate) fn observer_handle(&self) -> Option<&Arc<dyn ObserverListener>> {
        self.observer.as_ref()
    }

    pub(crate) fn transformer_handle(&self) -> Option<&Arc<dyn TransformerListener>> {
        self.transformer.as_ref()
    }
}

impl fmt::Debug for ListenerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerDescriptor")
            .field("id", &self.id)
            .field("events", &self.events)
            .field("priority", &self.priority)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}
