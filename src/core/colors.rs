//! ANSI color handling for the console output format.
//!
//! The active scheme is all-empty strings when color mode is off, so the
//! renderer can splice color fields in unconditionally.

use super::level::Level;

/// A set of ANSI escape sequences used by the color console format.
///
/// The palette a context activates is derived from its template scheme (see
/// [`ColorScheme::ANSI`]); embedding programs may install a tweaked template
/// and the level color table is re-derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub reset: &'static str,
    pub red: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub blue: &'static str,
    pub purple: &'static str,
    pub cyan: &'static str,
    pub gray: &'static str,
    pub white: &'static str,
    pub bright_red: &'static str,
    pub dark_gray: &'static str,
}

impl ColorScheme {
    /// Standard ANSI escape codes.
    pub const ANSI: ColorScheme = ColorScheme {
        reset: "\x1b[0m",
        red: "\x1b[31m",
        green: "\x1b[32m",
        yellow: "\x1b[33m",
        blue: "\x1b[34m",
        purple: "\x1b[35m",
        cyan: "\x1b[36m",
        gray: "\x1b[37m",
        white: "\x1b[97m",
        bright_red: "\x1b[91m",
        dark_gray: "\x1b[90m",
    };

    /// All-empty scheme, active whenever color mode is off.
    pub const NONE: ColorScheme = ColorScheme {
        reset: "",
        red: "",
        green: "",
        yellow: "",
        blue: "",
        purple: "",
        cyan: "",
        gray: "",
        white: "",
        bright_red: "",
        dark_gray: "",
    };
}

/// Active scheme plus the level color table derived from it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColorTable {
    pub scheme: ColorScheme,
    pub level: [&'static str; 8],
}

impl ColorTable {
    pub(crate) fn derive(scheme: ColorScheme) -> Self {
        Self {
            scheme,
            level: [
                scheme.gray,       // Debug
                scheme.cyan,       // Verbose
                scheme.green,      // Info
                scheme.yellow,     // Warning
                scheme.red,        // Error
                scheme.purple,     // Critical
                scheme.bright_red, // Fatal
                scheme.dark_gray,  // NoLevel
            ],
        }
    }

    /// The level marker for the color format: `[WRN]` with the brackets in
    /// dark gray and the abbreviation in the level color. `NoLevel` gets
    /// only the dark gray decoration code.
    pub(crate) fn level_to_str(&self, lvl: Level) -> String {
        if lvl == Level::NoLevel {
            return self.scheme.dark_gray.to_string();
        }
        format!(
            "{}[{}{}{}]",
            self.scheme.dark_gray,
            self.level[lvl as usize],
            lvl.abbrev(),
            self.scheme.dark_gray
        )
    }
}
