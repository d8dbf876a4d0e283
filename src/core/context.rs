//! Process-wide logging context and the line renderer.
//!
//! A [`Context`] owns everything a log call reads: the atomic level
//! threshold, the configuration record, the output sink, and the cached
//! color decision. Simple programs use the ambient [`global`] context
//! through the crate-level functions and macros; tests and embedders that
//! want isolation construct their own.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::OnceLock;

use chrono::Local;
use parking_lot::{Mutex, RwLock};

use super::colors::{ColorScheme, ColorTable};
use super::config::{parse_bool, LogConfig};
use super::entry::time_to_ts;
use super::level::{validate_level, Level, ParseLevelError};
use super::tid;
use super::value::{quote_into, KeyVal};
use super::writer::Sink;

pub struct Context {
    level: AtomicI32,
    config: RwLock<LogConfig>,
    sink: Mutex<Sink>,
    /// Cached color decision, recomputed by [`Context::set_color_mode`].
    color: AtomicBool,
    /// Template palette used whenever color mode turns on.
    ansi: RwLock<ColorScheme>,
    /// Active palette and level color table (all empty when color is off).
    active: RwLock<ColorTable>,
}

impl Context {
    /// Creates a context logging to stderr with the given configuration.
    #[must_use]
    pub fn new(config: LogConfig) -> Self {
        let ctx = Self {
            level: AtomicI32::new(Level::Info as i32),
            config: RwLock::new(config),
            sink: Mutex::new(Sink::Stderr),
            color: AtomicBool::new(false),
            ansi: RwLock::new(ColorScheme::ANSI),
            active: RwLock::new(ColorTable::derive(ColorScheme::NONE)),
        };
        ctx.set_color_mode();
        ctx
    }

    // --- Level threshold ---------------------------------------------------

    /// The currently configured threshold.
    pub fn log_level(&self) -> Level {
        Level::from_i32(self.level.load(Ordering::Relaxed)).unwrap_or(Level::Info)
    }

    /// True if a call at `lvl` is currently emitted. `NoLevel` bypasses the
    /// threshold at the renderer, not here.
    #[inline]
    pub fn log_enabled(&self, lvl: Level) -> bool {
        lvl as i32 >= self.level.load(Ordering::Relaxed)
    }

    /// Sets the threshold, logging the change at Info level.
    ///
    /// Levels above `Critical` are rejected: the threshold is left
    /// unchanged, one Error-level diagnostic is emitted, and `None` is
    /// returned. On success returns the previous threshold. (Levels below
    /// `Debug` are unrepresentable.)
    #[track_caller]
    pub fn set_log_level(&self, lvl: Level) -> Option<Level> {
        self.set_log_level_impl(lvl, true, Location::caller())
    }

    /// Like [`set_log_level`](Self::set_log_level) but does not log the
    /// change itself.
    #[track_caller]
    pub fn set_log_level_quiet(&self, lvl: Level) -> Option<Level> {
        self.set_log_level_impl(lvl, false, Location::caller())
    }

    /// Validates a level name and applies it as the threshold.
    #[track_caller]
    pub fn set_log_level_str(&self, name: &str) -> Result<(), ParseLevelError> {
        let lvl = validate_level(name)?;
        self.set_log_level_impl(lvl, true, Location::caller());
        Ok(())
    }

    fn set_log_level_impl(
        &self,
        lvl: Level,
        log_change: bool,
        loc: &Location<'_>,
    ) -> Option<Level> {
        let prev = self.log_level();
        if lvl > Level::Critical {
            self.render(
                Level::Error,
                Some(loc),
                &format!(
                    "set_log_level called with level {} higher than Critical!",
                    lvl as i32
                ),
                &[],
            );
            return None;
        }
        if lvl != prev {
            // The notice is gated by the threshold in effect before the change.
            if log_change && self.log_enabled(Level::Info) {
                self.render(
                    Level::Info,
                    Some(loc),
                    &format!(
                        "Log level is now {} {} (was {} {})",
                        lvl as i32, lvl, prev as i32, prev
                    ),
                    &[],
                );
            }
            self.level.store(lvl as i32, Ordering::Relaxed);
        }
        Some(prev)
    }

    // --- Configuration and sink --------------------------------------------

    /// Applies a configuration change and re-derives the cached color mode
    /// so it takes effect on the very next log call.
    pub fn configure(&self, f: impl FnOnce(&mut LogConfig)) {
        {
            let mut cfg = self.config.write();
            f(&mut cfg);
        }
        self.set_color_mode();
    }

    /// A snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> LogConfig {
        self.config.read().clone()
    }

    /// Redirects output to an arbitrary writer. Terminal-ness of an unknown
    /// writer is conservatively false, so color auto-detection turns off.
    pub fn set_output(&self, w: Box<dyn Write + Send>) {
        *self.sink.lock() = Sink::Custom(w);
        self.set_color_mode();
    }

    /// Redirects output to a file; color auto-detection inspects the file
    /// (character devices count as consoles).
    pub fn set_output_file(&self, f: File) {
        *self.sink.lock() = Sink::File(f);
        self.set_color_mode();
    }

    pub fn log_to_stderr(&self) {
        *self.sink.lock() = Sink::Stderr;
        self.set_color_mode();
    }

    pub fn log_to_stdout(&self) {
        *self.sink.lock() = Sink::Stdout;
        self.set_color_mode();
    }

    /// True if the current sink is an interactive terminal.
    pub fn console_logging(&self) -> bool {
        self.sink.lock().is_terminal()
    }

    // --- Color handling ----------------------------------------------------

    /// The cached color decision read by the hot path.
    pub fn color_mode(&self) -> bool {
        self.color.load(Ordering::Relaxed)
    }

    /// Recomputes whether output should use color
    /// (`force_color || (console_color && sink is a terminal)`) and
    /// re-derives the active palette and level color table.
    ///
    /// Called automatically by [`configure`](Self::configure) and the sink
    /// setters; never called on the logging hot path.
    pub fn set_color_mode(&self) {
        let on = {
            let cfg = self.config.read();
            cfg.force_color || (cfg.console_color && self.console_logging())
        };
        self.color.store(on, Ordering::Relaxed);
        let scheme = if on { *self.ansi.read() } else { ColorScheme::NONE };
        *self.active.write() = ColorTable::derive(scheme);
    }

    /// Installs a custom palette template and re-derives the level colors.
    pub fn set_ansi_palette(&self, scheme: ColorScheme) {
        *self.ansi.write() = scheme;
        self.set_color_mode();
    }

    /// The palette template used when color mode is on.
    #[must_use]
    pub fn ansi_palette(&self) -> ColorScheme {
        *self.ansi.read()
    }

    /// The active palette: all-empty strings when color mode is off.
    #[must_use]
    pub fn colors(&self) -> ColorScheme {
        self.active.read().scheme
    }

    /// The active color for a level (empty when color mode is off).
    #[must_use]
    pub fn level_color(&self, lvl: Level) -> &'static str {
        self.active.read().level[lvl as usize]
    }

    /// The color-format level marker, e.g. `[WRN]` with its decorations.
    #[must_use]
    pub fn color_level_to_str(&self, lvl: Level) -> String {
        self.active.read().level_to_str(lvl)
    }

    // --- Log entry points --------------------------------------------------

    /// Logs preformatted arguments at the given level, subject to the
    /// threshold gate. Prefer the `logf!`-family macros, which skip
    /// argument formatting entirely for suppressed calls.
    #[track_caller]
    pub fn logf(&self, lvl: Level, args: fmt::Arguments<'_>) {
        if lvl != Level::NoLevel && !self.log_enabled(lvl) {
            return;
        }
        self.render(lvl, Some(Location::caller()), &fmt::format(args), &[]);
    }

    /// Unconditional raw output: no level gate, no level decorations, no
    /// caller location.
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.render(Level::NoLevel, None, &fmt::format(args), &[]);
    }

    /// Logs a message at the given level with structured attributes.
    ///
    /// Attribute values are rendered only after the call passes the level
    /// gate; suppressed calls never stringify or marshal anything.
    #[track_caller]
    pub fn s(&self, lvl: Level, msg: &str, attrs: &[KeyVal]) {
        if lvl != Level::NoLevel && !self.log_enabled(lvl) {
            return;
        }
        self.render(lvl, Some(Location::caller()), msg, attrs);
    }

    /// Structured logging with caller capture suppressed, for forwarding
    /// paths whose immediate caller is not the interesting location.
    pub(crate) fn s_no_caller(&self, lvl: Level, msg: &str, attrs: &[KeyVal]) {
        if lvl != Level::NoLevel && !self.log_enabled(lvl) {
            return;
        }
        self.render(lvl, None, msg, attrs);
    }

    /// Logs at Fatal level, then panics (`fatal_panics`) or invokes the
    /// configured termination strategy with exit code 1.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        if self.log_enabled(Level::Fatal) {
            self.render(Level::Fatal, Some(Location::caller()), &fmt::format(args), &[]);
        }
        let (panics, exit) = {
            let cfg = self.config.read();
            (cfg.fatal_panics, cfg.fatal_exit.clone())
        };
        if panics {
            panic!("aborting...");
        }
        exit(1);
    }

    /// Logs at Fatal level and returns 1 without terminating. Meant for CLI
    /// mains written as `fn main() { std::process::exit(run()) }` so fatal
    /// paths stay testable.
    #[track_caller]
    pub fn ferrf(&self, args: fmt::Arguments<'_>) -> i32 {
        if self.log_enabled(Level::Fatal) {
            self.render(Level::Fatal, Some(Location::caller()), &fmt::format(args), &[]);
        }
        1
    }

    // --- Environment binding -----------------------------------------------

    /// Applies the `LOGGER_*` environment variables to the configuration
    /// and threshold. Invalid values produce one diagnostic log line each
    /// and never abort startup.
    pub fn config_from_env(&self) {
        let mut invalid: Vec<(&'static str, String)> = Vec::new();
        self.configure(|cfg| {
            if let Ok(prefix) = std::env::var("LOGGER_LOG_PREFIX") {
                cfg.log_prefix = prefix;
            }
            let bool_fields: [(&'static str, &mut bool); 8] = [
                ("LOGGER_LOG_FILE_AND_LINE", &mut cfg.log_file_and_line),
                ("LOGGER_FATAL_PANICS", &mut cfg.fatal_panics),
                ("LOGGER_JSON", &mut cfg.json),
                ("LOGGER_NO_TIMESTAMP", &mut cfg.no_timestamp),
                ("LOGGER_CONSOLE_COLOR", &mut cfg.console_color),
                ("LOGGER_FORCE_COLOR", &mut cfg.force_color),
                ("LOGGER_THREAD_ID", &mut cfg.thread_id),
                (
                    "LOGGER_COMBINE_REQUEST_AND_RESPONSE",
                    &mut cfg.combine_request_and_response,
                ),
            ];
            for (name, field) in bool_fields {
                if let Ok(value) = std::env::var(name) {
                    match parse_bool(&value) {
                        Some(parsed) => *field = parsed,
                        None => invalid.push((name, value)),
                    }
                }
            }
        });
        for (name, value) in invalid {
            self.render(
                Level::Error,
                None,
                &format!("Invalid boolean from environment {name}: {value:?}"),
                &[],
            );
        }
        if let Ok(name) = std::env::var("LOGGER_LEVEL") {
            match validate_level(&name) {
                Ok(lvl) => {
                    self.set_log_level_impl(lvl, false, Location::caller());
                    if self.log_enabled(Level::Info) {
                        self.render(
                            Level::Info,
                            None,
                            &format!("Log level set from environment LOGGER_LEVEL to {lvl}"),
                            &[],
                        );
                    }
                }
                Err(e) => {
                    self.render(
                        Level::Error,
                        None,
                        &format!("Invalid log level from environment LOGGER_LEVEL: {e}"),
                        &[],
                    );
                }
            }
        }
    }

    /// Dumps each recognized environment variable with its current value.
    pub fn env_help<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        let cfg = self.config();
        writeln!(w, "# Logger environment variables:")?;
        writeln!(w, "LOGGER_LOG_PREFIX='{}'", cfg.log_prefix)?;
        writeln!(w, "LOGGER_LOG_FILE_AND_LINE={}", cfg.log_file_and_line)?;
        writeln!(w, "LOGGER_FATAL_PANICS={}", cfg.fatal_panics)?;
        writeln!(w, "LOGGER_JSON={}", cfg.json)?;
        writeln!(w, "LOGGER_NO_TIMESTAMP={}", cfg.no_timestamp)?;
        writeln!(w, "LOGGER_CONSOLE_COLOR={}", cfg.console_color)?;
        writeln!(w, "LOGGER_FORCE_COLOR={}", cfg.force_color)?;
        writeln!(w, "LOGGER_THREAD_ID={}", cfg.thread_id)?;
        writeln!(
            w,
            "LOGGER_COMBINE_REQUEST_AND_RESPONSE={}",
            cfg.combine_request_and_response
        )?;
        writeln!(w, "LOGGER_LEVEL='{}'", self.log_level())?;
        Ok(())
    }

    // --- Rendering ---------------------------------------------------------

    /// Builds one formatted line and writes it to the sink as a single
    /// buffer. Formatting runs on the caller's stack with only a read guard
    /// on the configuration; the sink lock is held just for the write.
    fn render(&self, lvl: Level, loc: Option<&Location<'_>>, msg: &str, attrs: &[KeyVal]) {
        let cfg = self.config.read();
        let location = if cfg.log_file_and_line {
            loc.map(|l| (basename(l.file()), l.line()))
        } else {
            None
        };
        let mut line = String::with_capacity(96 + msg.len());
        if self.color.load(Ordering::Relaxed) {
            let table = *self.active.read();
            render_color(&mut line, &cfg, &table, lvl, location, msg, attrs);
        } else if cfg.json {
            render_json(&mut line, &cfg, lvl, location, msg, attrs);
        } else {
            render_text(&mut line, &cfg, lvl, location, msg, attrs);
        }
        line.push('\n');
        drop(cfg);
        self.sink.lock().write_line(&line);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(LogConfig::server_defaults())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("level", &self.log_level())
            .field("color", &self.color_mode())
            .field("config", &*self.config.read())
            .finish_non_exhaustive()
    }
}

fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

// An empty configured prefix renders as a single space; at NoLevel the
// prefix always collapses to a single space so the line is never ambiguous
// with a blank line.
fn effective_prefix(cfg: &LogConfig, lvl: Level) -> &str {
    if lvl == Level::NoLevel || cfg.log_prefix.is_empty() {
        " "
    } else {
        &cfg.log_prefix
    }
}

fn render_text(
    out: &mut String,
    cfg: &LogConfig,
    lvl: Level,
    location: Option<(&str, u32)>,
    msg: &str,
    attrs: &[KeyVal],
) {
    use fmt::Write as _;
    out.push_str(lvl.letter());
    if let Some((file, line)) = location {
        let _ = write!(out, " {file}:{line}");
    }
    out.push_str(effective_prefix(cfg, lvl));
    out.push_str(msg);
    for kv in attrs {
        out.push_str(", ");
        out.push_str(&kv.key);
        out.push('=');
        kv.value.append_to(out);
    }
}

// Field order is fixed: ts, r, level, file, line, msg, then attributes in
// call order. Consumers pattern-match on it.
fn render_json(
    out: &mut String,
    cfg: &LogConfig,
    lvl: Level,
    location: Option<(&str, u32)>,
    msg: &str,
    attrs: &[KeyVal],
) {
    use fmt::Write as _;
    out.push('{');
    if !cfg.no_timestamp {
        let _ = write!(out, "\"ts\":{:.6},", time_to_ts(chrono::Utc::now()));
    }
    if cfg.thread_id {
        let _ = write!(out, "\"r\":{},", tid::id());
    }
    out.push_str("\"level\":");
    out.push_str(lvl.json_token());
    if let Some((file, line)) = location {
        out.push_str(",\"file\":");
        quote_into(out, file);
        let _ = write!(out, ",\"line\":{line}");
    }
    out.push_str(",\"msg\":");
    quote_into(out, msg);
    for kv in attrs {
        out.push(',');
        quote_into(out, &kv.key);
        out.push(':');
        kv.value.append_to(out);
    }
    out.push('}');
}

fn render_color(
    out: &mut String,
    cfg: &LogConfig,
    table: &ColorTable,
    lvl: Level,
    location: Option<(&str, u32)>,
    msg: &str,
    attrs: &[KeyVal],
) {
    use fmt::Write as _;
    let scheme = &table.scheme;
    let lvl_color = table.level[lvl as usize];
    if !cfg.no_timestamp {
        out.push_str(scheme.dark_gray);
        let _ = write!(out, "{} ", Local::now().format("%H:%M:%S%.3f"));
    }
    if cfg.thread_id {
        out.push_str(scheme.gray);
        let _ = write!(out, "r{} ", tid::id());
    }
    out.push_str(&table.level_to_str(lvl));
    if let Some((file, line)) = location {
        let _ = write!(out, " {file}:{line}");
    }
    out.push_str(effective_prefix(cfg, lvl));
    out.push_str(lvl_color);
    out.push_str(msg);
    for kv in attrs {
        out.push_str(scheme.reset);
        out.push_str(", ");
        out.push_str(scheme.blue);
        out.push_str(&kv.key);
        out.push_str(scheme.reset);
        out.push('=');
        out.push_str(lvl_color);
        kv.value.append_to(out);
    }
    out.push_str(scheme.reset);
}

// --- Ambient global context -------------------------------------------------

static GLOBAL: OnceLock<Context> = OnceLock::new();

/// The ambient process-wide context used by the crate-level functions and
/// macros. Created with server defaults on first use.
pub fn global() -> &'static Context {
    GLOBAL.get_or_init(Context::default)
}

/// True if a call at `lvl` would currently be emitted by the global context.
#[inline]
pub fn log_enabled(lvl: Level) -> bool {
    global().log_enabled(lvl)
}

/// The global threshold.
pub fn get_log_level() -> Level {
    global().log_level()
}

/// Sets the global threshold; see [`Context::set_log_level`].
#[track_caller]
pub fn set_log_level(lvl: Level) -> Option<Level> {
    global().set_log_level(lvl)
}

/// Sets the global threshold without logging the change.
#[track_caller]
pub fn set_log_level_quiet(lvl: Level) -> Option<Level> {
    global().set_log_level_quiet(lvl)
}

/// Validates a level name and applies it to the global threshold.
#[track_caller]
pub fn set_log_level_str(name: &str) -> Result<(), ParseLevelError> {
    global().set_log_level_str(name)
}

/// Redirects global output; see [`Context::set_output`].
pub fn set_output(w: Box<dyn Write + Send>) {
    global().set_output(w)
}

/// Recomputes the global color decision; see [`Context::set_color_mode`].
pub fn set_color_mode() {
    global().set_color_mode()
}

/// Applies a configuration change to the global context.
pub fn configure(f: impl FnOnce(&mut LogConfig)) {
    global().configure(f)
}

/// Switches the global context to CLI-style defaults (no caller info, no
/// prefix, plain text, fatal exits instead of panicking).
pub fn set_defaults_for_client_tools() {
    global().configure(|cfg| *cfg = LogConfig::cli_defaults());
}

/// True if the global sink is an interactive terminal.
pub fn console_logging() -> bool {
    global().console_logging()
}

/// Logs preformatted arguments at `lvl` on the global context.
#[track_caller]
pub fn logf(lvl: Level, args: fmt::Arguments<'_>) {
    global().logf(lvl, args)
}

/// Unconditional raw output on the global context.
pub fn printf(args: fmt::Arguments<'_>) {
    global().printf(args)
}

/// Structured logging on the global context; see [`Context::s`].
#[track_caller]
pub fn s(lvl: Level, msg: &str, attrs: &[KeyVal]) {
    global().s(lvl, msg, attrs)
}

/// Fatal logging on the global context; see [`Context::fatalf`].
#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) {
    global().fatalf(args)
}

/// Logs at Fatal on the global context and returns 1.
#[track_caller]
pub fn ferrf(args: fmt::Arguments<'_>) -> i32 {
    global().ferrf(args)
}

/// Applies `LOGGER_*` environment variables to the global context.
pub fn config_from_env() {
    global().config_from_env()
}

/// Dumps the recognized environment variables for the global context.
pub fn env_help<W: io::Write>(w: &mut W) -> io::Result<()> {
    global().env_help(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::attr;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_context(config: LogConfig) -> (Context, SharedBuf) {
        let ctx = Context::new(config);
        let buf = SharedBuf::default();
        ctx.set_output(Box::new(buf.clone()));
        (ctx, buf)
    }

    #[test]
    fn test_gate() {
        let (ctx, _buf) = capture_context(LogConfig::cli_defaults());
        ctx.set_log_level_quiet(Level::Warning);
        assert!(!ctx.log_enabled(Level::Debug));
        assert!(!ctx.log_enabled(Level::Info));
        assert!(ctx.log_enabled(Level::Warning));
        assert!(ctx.log_enabled(Level::Fatal));
        assert!(ctx.log_enabled(Level::NoLevel));
    }

    #[test]
    fn test_set_level_returns_previous() {
        let (ctx, _buf) = capture_context(LogConfig::cli_defaults());
        ctx.set_log_level_quiet(Level::Info);
        assert_eq!(ctx.set_log_level_quiet(Level::Debug), Some(Level::Info));
        assert_eq!(ctx.log_level(), Level::Debug);
    }

    #[test]
    fn test_set_level_rejects_above_critical() {
        let (ctx, buf) = capture_context(LogConfig::cli_defaults());
        ctx.set_log_level_quiet(Level::Info);
        assert_eq!(ctx.set_log_level(Level::Fatal), None);
        assert_eq!(ctx.set_log_level(Level::NoLevel), None);
        assert_eq!(ctx.log_level(), Level::Info);
        let out = buf.contents();
        assert_eq!(out.lines().count(), 2);
        assert!(out.contains("level 6 higher than Critical!"));
        assert!(out.contains("level 7 higher than Critical!"));
    }

    #[test]
    fn test_level_change_notice_gated_by_old_level() {
        let config = LogConfig::cli_defaults();
        let (ctx, buf) = capture_context(config);
        ctx.set_log_level_quiet(Level::Error);
        // Info notice suppressed: old threshold is Error.
        ctx.set_log_level(Level::Critical);
        assert_eq!(buf.contents(), "");
        // Back down from Critical: still suppressed (old threshold Critical).
        ctx.set_log_level(Level::Debug);
        assert_eq!(buf.contents(), "");
        // Debug threshold lets the notice through.
        ctx.set_log_level(Level::Warning);
        assert!(buf
            .contents()
            .contains("Log level is now 3 Warning (was 0 Debug)"));
    }

    #[test]
    fn test_color_mode_off_for_buffer_sink() {
        let (ctx, _buf) = capture_context(LogConfig::cli_defaults());
        assert!(!ctx.color_mode());
        assert_eq!(ctx.colors().green, "");
        assert_eq!(ctx.level_color(Level::Info), "");
    }

    #[test]
    fn test_force_color_and_palette_override() {
        let (ctx, _buf) = capture_context(LogConfig::cli_defaults());
        ctx.configure(|cfg| cfg.force_color = true);
        assert!(ctx.color_mode());
        assert_eq!(ctx.colors().green, ColorScheme::ANSI.green);
        assert_eq!(ctx.level_color(Level::Info), ColorScheme::ANSI.green);
        assert_eq!(ctx.color_level_to_str(Level::NoLevel), "\x1b[90m");

        let custom = ColorScheme {
            green: "<green>",
            ..ColorScheme::ANSI
        };
        ctx.set_ansi_palette(custom);
        assert_eq!(ctx.colors().green, "<green>");
        assert_eq!(ctx.level_color(Level::Info), "<green>");

        ctx.configure(|cfg| cfg.force_color = false);
        assert!(!ctx.color_mode());
        assert_eq!(ctx.level_color(Level::Info), "");
    }

    #[test]
    fn test_attrs_rendered_after_gate_only() {
        use crate::core::value::{wire, WireValue};
        use std::sync::atomic::{AtomicUsize, Ordering};

        #[derive(Clone)]
        struct Counting(Arc<AtomicUsize>);
        impl WireValue for Counting {
            fn append_wire(&self, out: &mut String) {
                self.0.fetch_add(1, Ordering::Relaxed);
                out.push_str("42");
            }
        }

        let (ctx, buf) = capture_context(LogConfig::cli_defaults());
        ctx.set_log_level_quiet(Level::Error);
        let renders = Arc::new(AtomicUsize::new(0));

        let gated = wire("n", Counting(renders.clone()));
        ctx.s(Level::Debug, "suppressed", std::slice::from_ref(&gated));
        assert_eq!(renders.load(Ordering::Relaxed), 0);
        assert_eq!(buf.contents(), "");

        ctx.s(Level::Error, "emitted", &[wire("n", Counting(renders.clone()))]);
        assert_eq!(renders.load(Ordering::Relaxed), 1);
        assert!(buf.contents().contains("emitted, n=42"));
    }

    #[test]
    fn test_printf_is_unconditional() {
        let (ctx, buf) = capture_context(LogConfig::cli_defaults());
        ctx.set_log_level_quiet(Level::Critical);
        ctx.printf(format_args!("always shows n={}", 8));
        assert_eq!(buf.contents(), " always shows n=8\n");
    }

    #[test]
    fn test_ferrf_logs_and_returns_one() {
        let (ctx, buf) = capture_context(LogConfig::cli_defaults());
        ctx.set_log_level_quiet(Level::Info);
        let code = ctx.ferrf(format_args!("bad input: {}", "x"));
        assert_eq!(code, 1);
        assert_eq!(buf.contents(), "F bad input: x\n");
    }

    #[test]
    fn test_line_writer_forwards_with_src() {
        use crate::core::writer::LineWriter;
        let (ctx, buf) = capture_context(LogConfig::cli_defaults());
        ctx.set_log_level_quiet(Level::Info);
        let mut w = LineWriter::new(&ctx, "proxy", Level::Warning);
        w.write_all(b"upstream unreachable\n").unwrap();
        assert_eq!(
            buf.contents(),
            "W upstream unreachable, src=\"proxy\"\n"
        );
    }

    #[test]
    fn test_structured_attrs_text() {
        let (ctx, buf) = capture_context(LogConfig::cli_defaults());
        ctx.set_log_level_quiet(Level::Warning);
        ctx.s(Level::Verbose, "This won't show", &[]);
        ctx.s(
            Level::Warning,
            "This will show",
            &[attr("key1", "value 1"), attr("key2", 42)],
        );
        assert_eq!(
            buf.contents(),
            "W This will show, key1=\"value 1\", key2=42\n"
        );
    }
}
