//! Fixed event names and extension points

use crate::core::LogLevel;

/// Generic log event; the dispatch bridge listens here.
pub const LOG_EVENT: &str = "hooklog.log";

/// Fired once when setup starts.
pub const SETUP_EVENT: &str = "hooklog.setup";

/// Broadcast carrying the [`ListenerRegistry`](crate::ListenerRegistry) to contributors.
pub const REGISTER_LISTENERS_EVENT: &str = "hooklog.register-listeners";

/// Fired once setup has finished.
pub const LOADED_EVENT: &str = "hooklog.loaded";

/// Extension points read through `trigger_transform`.
pub mod filters {
    /// `Bool`, default `true`. `false` disables the whole bridge.
    pub const ENABLE: &str = "hooklog.enable";

    /// `Bool`, default `true`. `false` skips the error capture.
    pub const ENABLE_ERROR_CAPTURE: &str = "hooklog.enable-error-capture";

    /// `List` of `Processor`, default the host-context processor.
    pub const DEFAULT_PROCESSORS: &str = "hooklog.default-processors";

    /// `List` of `Str` channel names.
    pub const CHANNELS: &str = "hooklog.channels";

    /// `Null` by default; `Sink` supplies one, `Bool(false)` disables it.
    pub const DEFAULT_SINK: &str = "hooklog.default-sink";

    /// `Str` directory of the default sink.
    pub const DEFAULT_SINK_DIR: &str = "hooklog.default-sink-dir";

    /// `Str` strftime pattern of the default sink file name.
    pub const DEFAULT_SINK_FILENAME: &str = "hooklog.default-sink-filename";

    /// `Str` full path of the default sink.
    pub const DEFAULT_SINK_PATH: &str = "hooklog.default-sink-path";

    /// `Int` priority of a listener; the listener id is the extra argument.
    pub const LISTENER_PRIORITY: &str = "hooklog.listener-priority";
}

/// Level-specific log event, e.g. `hooklog.log.error`.
pub fn level_event(level: LogLevel) -> String {
    format!("{}.{}", LOG_EVENT, level.hook_suffix())
}
