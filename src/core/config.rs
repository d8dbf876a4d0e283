//! Logger configuration record, defaults, and environment binding.

use std::fmt;
use std::sync::Arc;

/// Injectable termination strategy invoked by fatal-level calls when
/// panicking is disabled.
pub type FatalExit = Arc<dyn Fn(i32) + Send + Sync>;

/// Mutable configuration read by the renderer on every log call.
///
/// Fields are mutated through [`Context::configure`](crate::Context::configure),
/// which re-derives the cached color decision; a change takes effect on the
/// very next log call. Configuration is meant to be changed during setup or
/// quiescent periods, not concurrently with steady-state logging.
#[derive(Clone)]
pub struct LogConfig {
    /// Prefix inserted between line metadata and the message. An empty
    /// prefix renders as a single space.
    pub log_prefix: String,
    /// Capture and log the caller's file name and line number.
    pub log_file_and_line: bool,
    /// If true, fatal-level calls panic (stack trace) instead of invoking
    /// [`fatal_exit`](Self::fatal_exit).
    pub fatal_panics: bool,
    /// Termination strategy for fatal-level calls when not panicking.
    pub fatal_exit: FatalExit,
    /// Structured JSON output instead of text (unless color mode wins).
    pub json: bool,
    /// Suppress timestamps in JSON and color output.
    pub no_timestamp: bool,
    /// Use text+color mode when the sink is detected to be a console.
    pub console_color: bool,
    /// Force color mode even when the sink is not a console (useful for CI
    /// that renders ANSI colors).
    pub force_color: bool,
    /// Include the thread (concurrency-unit) id in JSON and color output.
    pub thread_id: bool,
    /// Combine paired request/response log lines into one entry. Read by
    /// HTTP-logging collaborators layered on this crate.
    pub combine_request_and_response: bool,
}

impl LogConfig {
    /// Defaults best suited for servers: caller file/line, a `"> "` prefix
    /// splitting line info from the message, panic (+exit) on fatal, and
    /// JSON output unless a console is detected.
    #[must_use]
    pub fn server_defaults() -> Self {
        Self {
            log_prefix: "> ".to_string(),
            log_file_and_line: true,
            fatal_panics: true,
            fatal_exit: Arc::new(|code| std::process::exit(code)),
            json: true,
            no_timestamp: false,
            console_color: true,
            force_color: false,
            thread_id: true,
            combine_request_and_response: false,
        }
    }

    /// Defaults for command-line tools: no caller info, no prefix, plain
    /// text, and fatal exits instead of panicking.
    #[must_use]
    pub fn cli_defaults() -> Self {
        Self {
            log_prefix: " ".to_string(),
            log_file_and_line: false,
            fatal_panics: false,
            json: false,
            thread_id: false,
            ..Self::server_defaults()
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::server_defaults()
    }
}

impl fmt::Debug for LogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogConfig")
            .field("log_prefix", &self.log_prefix)
            .field("log_file_and_line", &self.log_file_and_line)
            .field("fatal_panics", &self.fatal_panics)
            .field("json", &self.json)
            .field("no_timestamp", &self.no_timestamp)
            .field("console_color", &self.console_color)
            .field("force_color", &self.force_color)
            .field("thread_id", &self.thread_id)
            .field(
                "combine_request_and_response",
                &self.combine_request_and_response,
            )
            .finish_non_exhaustive()
    }
}

/// Environment variable consumed for each configuration field, in the
/// order they are applied and dumped.
pub const ENV_VARS: [&str; 10] = [
    "LOGGER_LOG_PREFIX",
    "LOGGER_LOG_FILE_AND_LINE",
    "LOGGER_FATAL_PANICS",
    "LOGGER_JSON",
    "LOGGER_NO_TIMESTAMP",
    "LOGGER_CONSOLE_COLOR",
    "LOGGER_FORCE_COLOR",
    "LOGGER_THREAD_ID",
    "LOGGER_COMBINE_REQUEST_AND_RESPONSE",
    "LOGGER_LEVEL",
];

/// Boolean syntax accepted by the environment binding.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}
