//! Callback bus contract
//!
//! A named, priority-ordered, multi-subscriber registry with two invocation
//! modes: fire-and-forget broadcast (`trigger`) and sequential value transform
//! (`trigger_transform`). Lower priorities run first; equal priorities run in
//! registration order.

use super::value::HookValue;
use std::sync::Arc;

/// Observer-form handler. Receives at most `accepted_args` arguments.
pub type ActionHandler = Arc<dyn Fn(&[HookValue]) + Send + Sync>;

/// Transformer-form handler. Receives the current value plus at most
/// `accepted_args - 1` extra arguments and returns the next value.
pub type TransformHandler = Arc<dyn Fn(HookValue, &[HookValue]) -> HookValue + Send + Sync>;

/// Accept every argument a trigger passes.
pub const UNBOUNDED_ARGS: usize = usize::MAX;

pub trait CallbackBus: Send + Sync {
    fn register(&self, event: &str, handler: ActionHandler, priority: i64, accepted_args: usize);

    fn register_transform(
        &self,
        event: &str,
        handler: TransformHandler,
        priority: i64,
        accepted_args: usize,
    );

    /// Invoke every observer binding of `event` in priority order.
    fn trigger(&self, event: &str, args: &[HookValue]);

    /// Thread `value` through every transformer binding of `event`.
    fn trigger_transform(&self, event: &str, value: HookValue, args: &[HookValue]) -> HookValue;

    /// How many times `trigger` has been called for `event`.
    fn trigger_count(&self, event: &str) -> usize;
}
