#![deny(missing_docs)]
//! Shared logging utilities for the rewards workspace.
//!
//! This crate provides the `rewards_*` logging macros used by the engine and
//! the application shell, the [`LogLevel`] setting both share, and a test
//! initializer for the global logger.
//! The macros expand to the `log` facade, so callers must depend on `log` too.

use std::fmt;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the level used by [`initialize_for_tests`].
pub const TEST_LOG_ENV: &str = "REWARDS_TEST_LOG";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! rewards_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! rewards_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! rewards_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! rewards_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! rewards_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Verbosity as written in configuration files and environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogLevel {
    /// Logging disabled.
    Off,
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Session, claim and review milestones.
    #[default]
    Info,
    /// Parsed reviews and request details.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// The `log` filter for this level.
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Error for a level name that is not one of the [`LogLevel`] variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogLevel(String);

impl fmt::Display for UnknownLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level {:?}", self.0)
    }
}

impl std::error::Error for UnknownLogLevel {}

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(UnknownLogLevel(s.to_string())),
        }
    }
}

/// Level for test runs: `REWARDS_TEST_LOG` if set and valid, otherwise debug
/// in debug builds and info in release builds.
fn test_level(env_value: Option<&str>) -> LevelFilter {
    if let Some(level) = env_value.and_then(|value| value.parse::<LogLevel>().ok()) {
        return level.filter();
    }
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let env_value = std::env::var(TEST_LOG_ENV).ok();
    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        test_level(env_value.as_deref()),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
