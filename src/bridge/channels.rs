//! Channel set known to the dispatch bridge

use crate::hooks::{filters, CallbackBus, HookValue};

/// Channel used for records produced by the error capture.
pub const ERROR_CHANNEL: &str = "PANIC";

pub const DEFAULT_CHANNELS: [&str; 5] = ["HTTP", "DB", "SECURITY", "DEBUG", ERROR_CHANNEL];

/// Ordered set of channel names. Always contains [`ERROR_CHANNEL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSet {
    names: Vec<String>,
}

impl ChannelSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self { names: Vec::new() };
        for name in names {
            set.insert(name);
        }
        set.insert(ERROR_CHANNEL);
        set
    }

    /// Defaults passed through the channels extension point.
    ///
    /// A `List` result replaces the defaults (non-string items are skipped);
    /// anything else keeps them.
    pub fn resolve(bus: &dyn CallbackBus) -> Self {
        let defaults = Self::default();
        let value = bus.trigger_transform(
            filters::CHANNELS,
            HookValue::List(defaults.names.iter().map(|n| HookValue::Str(n.clone())).collect()),
            &[],
        );

        match value.as_list() {
            Some(items) => Self::new(items.iter().filter_map(HookValue::as_str)),
            None => defaults,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() || self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::MemoryBus;
    use std::sync::Arc;

    #[test]
    fn test_defaults() {
        let set = ChannelSet::default();
        assert_eq!(set.names().len(), 5);
        assert!(set.contains("HTTP"));
        assert!(set.contains(ERROR_CHANNEL));
    }

    #[test]
    fn test_error_channel_is_always_present() {
        let set = ChannelSet::new(["CRON"]);
        assert_eq!(set.names(), &["CRON".to_string(), ERROR_CHANNEL.to_string()]);
    }

    #[test]
    fn test_resolve_with_extension_point() {
        let bus = MemoryBus::new();
        bus.register_transform(
            filters::CHANNELS,
            Arc::new(|value: HookValue, _: &[HookValue]| {
                let mut items = value.as_list().map(<[HookValue]>::to_vec).unwrap_or_default();
                items.push(HookValue::from("MAILER"));
                items.push(HookValue::Int(3));
                HookValue::List(items)
            }),
            10,
            1,
        );

        let set = ChannelSet::resolve(&bus);
        assert!(set.contains("MAILER"));
        assert!(set.contains("HTTP"));
        assert_eq!(set.names().len(), 6);
    }

    #[test]
    fn test_resolve_ignores_non_list() {
        let bus = MemoryBus::new();
        bus.register_transform(
            filters::CHANNELS,
            Arc::new(|_: HookValue, _: &[HookValue]| HookValue::Bool(false)),
            10,
            1,
        );

        assert_eq!(ChannelSet::resolve(&bus), ChannelSet::default());
    }
}
