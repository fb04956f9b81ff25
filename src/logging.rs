// Conditional logging macros - only active in debug builds

use env_logger::Env;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Maps the number of `-v` flags to a default filter; `RUST_LOG` still wins.
#[must_use]
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global logger. Safe to call more than once.
pub fn init_logging(verbosity: u8) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter(verbosity)))
        .format_timestamp(None)
        .try_init()
        .unwrap_or(());
}
