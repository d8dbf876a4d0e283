//! Emits one message at every level in the current output format.
//!
//! Try it with different settings:
//!
//! ```sh
//! cargo run --example levels
//! cargo run --example levels 2>&1 | cat     # JSON (no console detected)
//! LOGGER_FORCE_COLOR=true cargo run --example levels
//! ```

use std::sync::Arc;

use linelog::{attr, critf, debugf, errf, fatalf, infof, logvf, printf, warnf, Level};

fn main() {
    // Keep the fatal line from ending the demo.
    linelog::configure(|cfg| {
        cfg.fatal_panics = false;
        cfg.fatal_exit = Arc::new(|_| {});
    });
    linelog::config_from_env();
    linelog::set_log_level_quiet(Level::Debug);

    debugf!("This is a debug message ending with backslash \\");
    logvf!("This is a verbose message");
    printf!("This an always printed, file:line omitted message (and no level in console)");
    infof!("This is an info message with no attributes but with \"quotes\"...");
    linelog::s(
        Level::Info,
        "This is multi line\n\tstructured info message with 3 attributes",
        &[
            attr("attr1", "value1"),
            attr("attr2", 42),
            attr("attr3", "\"quoted\nvalue\""),
        ],
    );
    warnf!("This is a warning message");
    errf!("This is an error message");
    critf!("This is a critical message");
    fatalf!("This is a fatal message");
    println!("This line is plain stdout output, outside the logger");
}
