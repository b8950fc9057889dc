//! Diagnostic logging on stderr.
//!
//! Stdout is reserved for the single result line, so every event goes to
//! stderr. Verbosity comes only from `-v` flags; `RUST_LOG` is not consulted.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Log level for our own crates at a given `-v` count.
#[must_use]
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Filter directives: our crates at the requested level, everything else at `warn`.
#[must_use]
pub fn directives(verbose: u8) -> String {
    let level = level_for(verbose);
    format!("warn,nbvalidate={level},nbvalidate_cli={level}")
}

/// Install the global stderr subscriber.
///
/// A failure to install is reported on stderr and otherwise ignored.
pub fn init(verbose: u8) {
    let filter = EnvFilter::new(directives(verbose));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init()
    {
        eprintln!("Warning: failed to initialize logging: {e}");
    }
}
