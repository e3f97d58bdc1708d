//! Debug channel helpers.
//!
//! Trace events go to the `readability` target and are only emitted when the
//! extraction options enable `debug`, so a subscriber installed for other
//! reasons does not see them by accident.

macro_rules! debug_trace {
    ($enabled:expr, $($arg:tt)+) => {
        if $enabled {
            tracing::debug!(target: "readability", $($arg)+);
        }
    };
}
