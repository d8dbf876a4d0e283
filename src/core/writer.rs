//! Output sink abstraction and the line-forwarding writer adapter.

use std::fs::File;
use std::io::{self, IsTerminal, Write};

use super::context::Context;
use super::level::Level;
use super::value::attr;

/// The configured output destination.
///
/// Known sinks can report whether they are backed by an interactive
/// terminal; an arbitrary boxed writer conservatively reports false.
pub(crate) enum Sink {
    Stderr,
    Stdout,
    File(File),
    Custom(Box<dyn Write + Send>),
}

impl Sink {
    pub(crate) fn is_terminal(&self) -> bool {
        match self {
            Sink::Stderr => io::stderr().is_terminal(),
            Sink::Stdout => io::stdout().is_terminal(),
            Sink::File(f) => f.is_terminal(),
            Sink::Custom(_) => false,
        }
    }

    /// Writes one fully formatted line as a single buffer.
    ///
    /// Write errors are dropped: there is no secondary logger to report
    /// logging failures to, and the write path must never panic.
    pub(crate) fn write_line(&mut self, line: &str) {
        let result = match self {
            Sink::Stderr => io::stderr().write_all(line.as_bytes()),
            Sink::Stdout => io::stdout().write_all(line.as_bytes()),
            Sink::File(f) => f.write_all(line.as_bytes()),
            Sink::Custom(w) => w.write_all(line.as_bytes()),
        };
        let _ = result;
    }
}

/// An [`io::Write`] adapter that logs every line written to it.
///
/// Each write becomes one log call at a fixed level with a `src` attribute
/// naming the origin, with caller capture suppressed so the reported
/// location never points inside this adapter. Useful for handing a `Write`
/// sink to libraries that expect one (e.g. an error log for a proxy).
pub struct LineWriter<'c> {
    ctx: &'c Context,
    source: String,
    level: Level,
}

impl<'c> LineWriter<'c> {
    pub fn new(ctx: &'c Context, source: impl Into<String>, level: Level) -> Self {
        Self {
            ctx,
            source: source.into(),
            level,
        }
    }
}

impl Write for LineWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        self.ctx.s_no_caller(
            self.level,
            text.trim(),
            &[attr("src", self.source.as_str())],
        );
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
