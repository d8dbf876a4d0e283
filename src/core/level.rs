//! Log level definitions and name validation

use std::fmt;
use std::str::FromStr;

/// Severity of a log call, ordered from `Debug` (lowest) to `Fatal`.
///
/// `NoLevel` is a sentinel for "always emit, with no level decorations";
/// it is valid as a call-site level but never as a threshold. Thresholds
/// accepted by the level setter range from `Debug` to `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(i32)]
pub enum Level {
    Debug = 0,
    Verbose = 1,
    #[default]
    Info = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
    Fatal = 6,
    NoLevel = 7,
}

/// Names accepted by [`validate_level`], in threshold order.
pub const LEVEL_NAMES: [&str; 7] = [
    "Debug",
    "Verbose",
    "Info",
    "Warning",
    "Error",
    "Critical",
    "Fatal",
];

// JSON wire tokens per level, quotes included so the renderer can splice
// them in as-is. Short names match what log aggregation UIs colorize.
// NoLevel maps to "info".
const LEVEL_JSON: [&str; 8] = [
    "\"dbug\"",
    "\"trace\"",
    "\"info\"",
    "\"warn\"",
    "\"err\"",
    "\"crit\"",
    "\"fatal\"",
    "\"info\"",
];

// Three-letter forms used by the color console format.
const LEVEL_ABBREV: [&str; 8] = ["DBG", "VRB", "INF", "WRN", "ERR", "CRI", "FTL", ""];

// Single-letter forms used by the plain text format.
const LEVEL_LETTER: [&str; 8] = ["D", "V", "I", "W", "E", "C", "F", ""];

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::NoLevel => "NoLevel",
            _ => LEVEL_NAMES[self as usize],
        }
    }

    pub(crate) fn json_token(self) -> &'static str {
        LEVEL_JSON[self as usize]
    }

    pub(crate) fn abbrev(self) -> &'static str {
        LEVEL_ABBREV[self as usize]
    }

    pub(crate) fn letter(self) -> &'static str {
        LEVEL_LETTER[self as usize]
    }

    pub(crate) fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(Level::Debug),
            1 => Some(Level::Verbose),
            2 => Some(Level::Info),
            3 => Some(Level::Warning),
            4 => Some(Level::Error),
            5 => Some(Level::Critical),
            6 => Some(Level::Fatal),
            7 => Some(Level::NoLevel),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name does not validate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseLevelError {
    #[error("invalid log level {input:?}: should be one of {:?}", LEVEL_NAMES)]
    UnknownLevel { input: String },
}

/// Case-insensitive lookup of a level by name. Leading/trailing whitespace
/// is ignored. The error enumerates the valid names.
pub fn validate_level(name: &str) -> Result<Level, ParseLevelError> {
    let trimmed = name.trim();
    for (i, candidate) in LEVEL_NAMES.iter().enumerate() {
        if trimmed.eq_ignore_ascii_case(candidate) {
            // i is 0..7 so the lookup cannot fail
            return Level::from_i32(i as i32).ok_or_else(|| ParseLevelError::UnknownLevel {
                input: trimmed.to_string(),
            });
        }
    }
    Err(ParseLevelError::UnknownLevel {
        input: trimmed.to_string(),
    })
}

/// Lookup of a level by name, `None` for unknown names.
pub fn level_by_name(name: &str) -> Option<Level> {
    validate_level(name).ok()
}

/// Maps a JSON wire token (`"warn"`, `"crit"`, ...) back to its [`Level`].
///
/// `"info"` maps to [`Level::Info`], never to the `NoLevel` sentinel that
/// also serializes as `"info"`.
pub fn json_level_to_level(token: &str) -> Option<Level> {
    LEVEL_JSON[..7]
        .iter()
        .position(|t| t.trim_matches('"') == token)
        .and_then(|i| Level::from_i32(i as i32))
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_level(s)
    }
}

/// Command-line-flag value object for the global log level.
///
/// `LevelFlag::new()` produces an instance owned by this library: its
/// `Display` reflects the current global threshold, so flag help text shows
/// the real default. A `Default`-constructed (zero-value) instance renders
/// as the empty string instead, so generically-constructed flag objects do
/// not advertise a bogus level name.
pub struct LevelFlag {
    ours: bool,
}

impl LevelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self { ours: true }
    }

    /// Validates and applies a level name to the global threshold.
    pub fn set(&self, value: &str) -> Result<(), ParseLevelError> {
        crate::set_log_level_str(value)
    }
}

impl Default for LevelFlag {
    fn default() -> Self {
        Self { ours: false }
    }
}

impl fmt::Display for LevelFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.ours {
            return Ok(());
        }
        f.write_str(crate::get_log_level().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Level::Debug < Level::Verbose);
        assert!(Level::Verbose < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Critical);
        assert!(Level::Critical < Level::Fatal);
        assert!(Level::Fatal < Level::NoLevel);
    }

    #[test]
    fn test_validate_level() {
        assert_eq!(validate_level("Warning"), Ok(Level::Warning));
        assert_eq!(validate_level("warning"), Ok(Level::Warning));
        assert_eq!(validate_level("  iNFo\n"), Ok(Level::Info));
        let err = validate_level("bogus").unwrap_err();
        assert!(err.to_string().contains("should be one of"));
        assert!(err.to_string().contains("Critical"));
    }

    #[test]
    fn test_level_by_name() {
        assert_eq!(level_by_name("Verbose"), Some(Level::Verbose));
        assert_eq!(level_by_name("nope"), None);
    }

    #[test]
    fn test_json_tokens() {
        assert_eq!(Level::Warning.json_token(), "\"warn\"");
        assert_eq!(Level::NoLevel.json_token(), "\"info\"");
    }

    #[test]
    fn test_json_level_reverse() {
        assert_eq!(json_level_to_level("warn"), Some(Level::Warning));
        // "info" resolves to Info, not the NoLevel sentinel.
        assert_eq!(json_level_to_level("info"), Some(Level::Info));
        assert_eq!(json_level_to_level("fatal"), Some(Level::Fatal));
        assert_eq!(json_level_to_level("nope"), None);
    }

    #[test]
    fn test_letters_and_abbrevs() {
        assert_eq!(Level::Debug.letter(), "D");
        assert_eq!(Level::NoLevel.letter(), "");
        assert_eq!(Level::Critical.abbrev(), "CRI");
    }

    #[test]
    fn test_display() {
        assert_eq!(Level::Verbose.to_string(), "Verbose");
        assert_eq!(Level::NoLevel.to_string(), "NoLevel");
    }
}
