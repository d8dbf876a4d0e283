//! Property-based tests using proptest.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use linelog::{time_to_ts, Context, JsonEntry, Level, LogConfig};
use proptest::prelude::*;

const LEVELS: [Level; 8] = [
    Level::Debug,
    Level::Verbose,
    Level::Info,
    Level::Warning,
    Level::Error,
    Level::Critical,
    Level::Fatal,
    Level::NoLevel,
];

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

proptest! {
    /// The wire timestamp is an exact inverse at microsecond resolution.
    #[test]
    fn prop_timestamp_roundtrip_exact(
        secs in 0i64..2_000_000_000,
        micros in 0i64..1_000_000,
    ) {
        let t = DateTime::from_timestamp(secs, (micros * 1000) as u32).unwrap();
        let entry = JsonEntry { ts: time_to_ts(t), ..JsonEntry::default() };
        prop_assert_eq!(entry.time(), t);
    }

    /// Sub-microsecond precision truncates: the recovered instant never
    /// lands past the original.
    #[test]
    fn prop_timestamp_truncates(
        secs in 0i64..2_000_000_000,
        nanos in 0u32..1_000_000_000,
    ) {
        let t = DateTime::from_timestamp(secs, nanos).unwrap();
        let entry = JsonEntry { ts: time_to_ts(t), ..JsonEntry::default() };
        let recovered = entry.time();
        let truncated = DateTime::from_timestamp_micros(t.timestamp_micros()).unwrap();
        prop_assert_eq!(recovered, truncated);
        prop_assert!(recovered <= t);
    }

    /// Level names roundtrip through validation, in any case mix.
    #[test]
    fn prop_level_name_roundtrip(idx in 0usize..7, upper in any::<bool>()) {
        let lvl = LEVELS[idx];
        let name = if upper {
            lvl.as_str().to_uppercase()
        } else {
            lvl.as_str().to_lowercase()
        };
        prop_assert_eq!(linelog::validate_level(&name).unwrap(), lvl);
    }

    /// A call at level L produces output iff L == NoLevel or L >= T.
    #[test]
    fn prop_gate(lvl_idx in 0usize..8, thr_idx in 0usize..6) {
        let lvl = LEVELS[lvl_idx];
        let threshold = LEVELS[thr_idx];

        let ctx = Context::new(LogConfig::cli_defaults());
        let buf = SharedBuf::default();
        ctx.set_output(Box::new(buf.clone()));
        ctx.set_log_level_quiet(threshold);

        ctx.s(lvl, "probe", &[]);

        let emitted = !buf.0.lock().unwrap().is_empty();
        let expected = lvl == Level::NoLevel || lvl >= threshold;
        prop_assert_eq!(emitted, expected, "level {:?} threshold {:?}", lvl, threshold);
    }

    /// The JSON encoder escapes arbitrary messages into one parseable line.
    #[test]
    fn prop_json_message_escaping(msg in "\\PC{0,60}") {
        let ctx = Context::new(LogConfig::server_defaults());
        let buf = SharedBuf::default();
        ctx.set_output(Box::new(buf.clone()));
        ctx.configure(|cfg| {
            cfg.no_timestamp = true;
            cfg.thread_id = false;
            cfg.log_file_and_line = false;
        });
        ctx.set_log_level_quiet(Level::Info);

        ctx.s(Level::Info, &msg, &[]);

        let bytes = buf.0.lock().unwrap().clone();
        let out = String::from_utf8(bytes).unwrap();
        prop_assert!(out.ends_with('\n'));
        prop_assert_eq!(out.matches('\n').count(), 1, "one line per call");
        let entry: JsonEntry = serde_json::from_str(out.trim_end()).unwrap();
        prop_assert_eq!(entry.msg, msg);
        prop_assert_eq!(entry.level, "info");
    }
}
