//! Leveled logging macros writing colored lines to stderr.
//!
//! The minimum level is read once from `AUTHVM_LOG` (`debug`, `info`, `warn`,
//! `error`; default `info`). Lines are prefixed with the time elapsed since the
//! first log call unless `AUTHVM_LOG_TIMESTAMP=0`.

use std::fmt::Display;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Environment variable selecting the minimum level.
pub const LOG_LEVEL_ENV: &str = "AUTHVM_LOG";
/// Environment variable toggling the elapsed-time prefix.
pub const LOG_TIMESTAMP_ENV: &str = "AUTHVM_LOG_TIMESTAMP";

/// Log level for filtering messages.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Level {
    /// Parses a level name, ignoring case and surrounding whitespace.
    pub fn parse(name: &str) -> Option<Level> {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            _ => None,
        }
    }

    fn from_u8(raw: u8) -> Level {
        match raw {
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warn,
            _ => Level::Error,
        }
    }

    fn color(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            Level::Debug => {
                spec.set_fg(Some(Color::Cyan)).set_dimmed(true);
            }
            Level::Info => {}
            Level::Warn => {
                spec.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Level::Error => {
                spec.set_fg(Some(Color::Red)).set_bold(true);
            }
        }
        spec
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        };
        f.pad(name)
    }
}

const UNSET: u8 = u8::MAX;

static MIN_LEVEL: AtomicU8 = AtomicU8::new(UNSET);
static STARTED: OnceLock<Instant> = OnceLock::new();
static SHOW_ELAPSED: OnceLock<bool> = OnceLock::new();

/// Overrides the level read from the environment.
pub fn set_level(level: Level) {
    MIN_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Returns the active minimum level, reading `AUTHVM_LOG` on first use.
pub fn level() -> Level {
    let raw = MIN_LEVEL.load(Ordering::Relaxed);
    if raw != UNSET {
        return Level::from_u8(raw);
    }
    let level = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|v| Level::parse(&v))
        .unwrap_or(Level::Info);
    MIN_LEVEL.store(level as u8, Ordering::Relaxed);
    level
}

/// Returns true when messages at `level` are written.
pub fn enabled(level: Level) -> bool {
    level >= self::level()
}

fn show_elapsed() -> bool {
    *SHOW_ELAPSED.get_or_init(|| {
        !std::env::var(LOG_TIMESTAMP_ENV).is_ok_and(|v| v.trim() == "0")
    })
}

/// Internal logging function. Use the `debug!`, `info!`, `warn!` or `error!` macros instead.
#[doc(hidden)]
pub fn log(level: Level, message: &str) {
    if !enabled(level) {
        return;
    }
    let elapsed = STARTED.get_or_init(Instant::now).elapsed();

    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(&level.color());
    if show_elapsed() {
        let _ = write!(stderr, "[{:>4}.{:03}s] ", elapsed.as_secs(), elapsed.subsec_millis());
    }
    let _ = writeln!(stderr, "{:<5} {}", level, message);
    let _ = stderr.reset();
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{
        if cfg!(not(test)) && $crate::utils::log::enabled($crate::utils::log::Level::Debug) {
            $crate::utils::log::log($crate::utils::log::Level::Debug, &format!($($arg)*))
        }
    }};
}

/// Logs an info-level message.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        if cfg!(not(test)) {
            $crate::utils::log::log($crate::utils::log::Level::Info, &format!($($arg)*))
        }
    }};
}

/// Logs a warning-level message.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        if cfg!(not(test)) {
            $crate::utils::log::log($crate::utils::log::Level::Warn, &format!($($arg)*))
        }
    }};
}

/// Logs an error-level message.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        if cfg!(not(test)) {
            $crate::utils::log::log($crate::utils::log::Level::Error, &format!($($arg)*))
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn level_display_pads() {
        assert_eq!(format!("{}", Level::Info), "INFO");
        assert_eq!(format!("{:<5}|", Level::Warn), "WARN |");
        assert_eq!(format!("{}", Level::Error), "ERROR");
    }

    #[test]
    fn level_parse_accepts_aliases() {
        assert_eq!(Level::parse("DEBUG"), Some(Level::Debug));
        assert_eq!(Level::parse(" trace "), Some(Level::Debug));
        assert_eq!(Level::parse("warning"), Some(Level::Warn));
        assert_eq!(Level::parse("error"), Some(Level::Error));
        assert_eq!(Level::parse("verbose"), None);
    }

    #[test]
    fn level_round_trips_through_u8() {
        for level in [Level::Debug, Level::Info, Level::Warn, Level::Error] {
            assert_eq!(Level::from_u8(level as u8), level);
        }
    }

    #[test]
    fn set_level_filters_lower_levels() {
        set_level(Level::Warn);
        assert!(!enabled(Level::Info));
        assert!(enabled(Level::Warn));
        assert!(enabled(Level::Error));
    }
}
