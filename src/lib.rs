//! # linelog
//!
//! A lightweight leveled logging facade that multiplexes between a plain
//! text console format (optionally ANSI-colored) and compact line-delimited
//! JSON, with caller location, timestamps, and an optional per-thread id.
//!
//! ## Features
//!
//! - **Cheap gating**: an atomic threshold check per call; format arguments
//!   and attribute values are never evaluated for suppressed calls
//! - **Three output shapes**: colored console, plain text, or one JSON
//!   object per line with a fixed field order
//! - **Structured attributes**: typed key/value pairs with a hand-rolled
//!   encoder (sorted map keys, bare `NaN`/`Inf` tokens) and a serde
//!   fallback for arbitrary types
//! - **Ambient or scoped**: a global context for simple programs, or
//!   per-instance [`Context`] values for tests and embedders
//!
//! ```
//! use linelog::{attr, infof, Level};
//!
//! linelog::set_log_level_quiet(Level::Info);
//! infof!("Server listening on port {}", 8080);
//! linelog::s(Level::Info, "request", &[attr("status", 200), attr("path", "/healthz")]);
//! ```

pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        any, attr, err, validate_level, wire, ColorScheme, Context, JsonEntry, KeyVal, Level,
        LevelFlag, LineWriter, LogConfig, ParseLevelError, Value, WireValue,
    };
}

pub use core::context::{
    config_from_env, configure, console_logging, env_help, fatalf, ferrf, get_log_level, global,
    log_enabled, logf, printf, s, set_color_mode, set_defaults_for_client_tools, set_log_level,
    set_log_level_quiet, set_log_level_str, set_output,
};
pub use core::{
    any, attr, err, json_level_to_level, level_by_name, time_to_ts, validate_level, wire,
    ColorScheme, Context, FatalExit, JsonEntry, KeyVal, Level, LevelFlag, LineWriter, LogConfig,
    ParseLevelError, Value, WireValue, ENV_VARS, LEVEL_NAMES,
};
