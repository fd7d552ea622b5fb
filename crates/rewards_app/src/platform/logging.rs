//! Platform logging initialization for rewards_app.
//!
//! Logs go to `./rewards.log` by default so the terminal stays free for the
//! shell. HTTP and TLS internals are filtered out; the engine logs its own
//! request and failure lines.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use rewards_logging::LogLevel;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Module prefixes whose records never reach the log.
const QUIET_TARGETS: [&str; 3] = ["hyper", "reqwest", "rustls"];

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    /// Write to the log file only.
    #[default]
    File,
    /// Write to terminal (stderr for warnings and errors).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// The `logging` section of `rewards.ron`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub destination: LogDestination,
    pub level: LogLevel,
    pub file: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            destination: LogDestination::default(),
            level: LogLevel::default(),
            file: PathBuf::from("./rewards.log"),
        }
    }
}

/// Initialize the global logger from `settings`.
pub fn initialize(settings: &LogSettings) {
    let level = settings.level.filter();
    if level == LevelFilter::Off {
        return;
    }

    let (to_terminal, to_file) = match settings.destination {
        LogDestination::File => (false, true),
        LogDestination::Terminal => (true, false),
        LogDestination::Both => (true, true),
    };

    let config = build_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if to_terminal {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if to_file {
        if let Some(file_logger) = create_file_logger(settings, level, config) {
            loggers.push(file_logger);
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    let mut builder = ConfigBuilder::new();
    builder
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error);
    for target in QUIET_TARGETS {
        builder.add_filter_ignore_str(target);
    }
    builder.build()
}

fn create_file_logger(
    settings: &LogSettings,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(&settings.file) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!(
                "Warning: Could not create log file at {:?}: {}",
                settings.file, err
            );
            None
        }
    }
}
