//! Logging macros for the ambient global context.
//!
//! The leveled macros check the threshold *before* expanding their format
//! arguments, so a suppressed call never evaluates them:
//!
//! ```
//! use linelog::{infof, warnf};
//!
//! infof!("Server listening on port {}", 8080);
//! warnf!("Retry attempt {} of {}", 3, 5);
//! ```

/// Logs with automatic formatting at a runtime-chosen level.
///
/// ```
/// # use linelog::{logf, Level};
/// logf!(Level::Info, "Simple message");
/// logf!(Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! logf {
    ($lvl:expr, $($arg:tt)+) => {{
        let lvl = $lvl;
        if $crate::log_enabled(lvl) {
            $crate::logf(lvl, ::core::format_args!($($arg)+));
        }
    }};
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::logf!($crate::Level::Debug, $($arg)+)
    };
}

/// Logs a verbose-level message.
#[macro_export]
macro_rules! logvf {
    ($($arg:tt)+) => {
        $crate::logf!($crate::Level::Verbose, $($arg)+)
    };
}

/// Logs an info-level message.
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::logf!($crate::Level::Info, $($arg)+)
    };
}

/// Logs a warning-level message.
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::logf!($crate::Level::Warning, $($arg)+)
    };
}

/// Logs an error-level message.
#[macro_export]
macro_rules! errf {
    ($($arg:tt)+) => {
        $crate::logf!($crate::Level::Error, $($arg)+)
    };
}

/// Logs a critical-level message.
#[macro_export]
macro_rules! critf {
    ($($arg:tt)+) => {
        $crate::logf!($crate::Level::Critical, $($arg)+)
    };
}

/// Logs at fatal level, then panics or invokes the configured termination
/// strategy, depending on `fatal_panics`.
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::fatalf(::core::format_args!($($arg)+))
    };
}

/// Logs at fatal level and evaluates to `1`, for CLI mains that return
/// their exit code.
#[macro_export]
macro_rules! ferrf {
    ($($arg:tt)+) => {
        $crate::ferrf(::core::format_args!($($arg)+))
    };
}

/// Unconditional raw output: no level gate, no level decorations, no
/// caller location.
#[macro_export]
macro_rules! printf {
    ($($arg:tt)+) => {
        $crate::printf(::core::format_args!($($arg)+))
    };
}
