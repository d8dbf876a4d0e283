//! Core facade types: levels, configuration, attribute values, colors, and
//! the line renderer.

pub mod colors;
pub mod config;
pub mod context;
pub mod entry;
pub mod level;
pub mod tid;
pub mod value;
pub mod writer;

pub use colors::ColorScheme;
pub use config::{FatalExit, LogConfig, ENV_VARS};
pub use context::Context;
pub use entry::{time_to_ts, JsonEntry};
pub use level::{
    json_level_to_level, level_by_name, validate_level, Level, LevelFlag, ParseLevelError,
    LEVEL_NAMES,
};
pub use value::{any, attr, err, wire, KeyVal, Value, WireValue};
pub use writer::LineWriter;
