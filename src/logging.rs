//! Logger initialization.
//!
//! Diagnostics go through the `log` facade to stderr; analysis results are
//! printed to stdout by the report module.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// `level` comes from the command-line verbosity flags. When it is `None`,
/// `RUST_LOG` is honored, falling back to `warn`.
pub fn init_logging(level: Option<log::LevelFilter>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(level) = level {
            builder.filter_level(level);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        builder.format_timestamp(None);
        builder.init();

        log::debug!("logging initialized");
    });
}

/// Maps `-v` / `-q` counts to a level filter. No flags means "let the environment decide".
pub fn level_from_flags(verbose: u8, quiet: bool) -> Option<log::LevelFilter> {
    if quiet {
        return Some(log::LevelFilter::Error);
    }
    match verbose {
        0 => None,
        1 => Some(log::LevelFilter::Info),
        2 => Some(log::LevelFilter::Debug),
        _ => Some(log::LevelFilter::Trace),
    }
}
