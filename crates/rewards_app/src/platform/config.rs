use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rewards_engine::ClassifierSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogSettings;

pub const CONFIG_FILENAME: &str = "rewards.ron";

/// Environment variables checked, in order, for the classification API key.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub watch_delay_ms: u64,
    pub classifier: ClassifierConfig,
    pub logging: LogSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            watch_delay_ms: rewards_core::WATCH_DURATION.as_millis() as u64,
            classifier: ClassifierConfig::default(),
            logging: LogSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub model: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let defaults = ClassifierSettings::default();
        Self {
            base_url: defaults.base_url,
            model: defaults.model,
            connect_timeout_ms: defaults.connect_timeout.as_millis() as u64,
            request_timeout_ms: defaults.request_timeout.as_millis() as u64,
        }
    }
}

impl AppConfig {
    pub fn watch_delay(&self) -> Duration {
        Duration::from_millis(self.watch_delay_ms)
    }

    /// The key never lives in the config file; callers pass it in.
    pub fn classifier_settings(&self, api_key: Option<String>) -> ClassifierSettings {
        ClassifierSettings {
            base_url: self.classifier.base_url.clone(),
            model: self.classifier.model.clone(),
            api_key,
            connect_timeout: Duration::from_millis(self.classifier.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.classifier.request_timeout_ms),
        }
    }
}

/// Where the active configuration came from. Reported once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    Defaults,
    File(PathBuf),
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::Defaults => write!(f, "built-in defaults"),
            ConfigOrigin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads `rewards.ron` from `dir`, falling back to defaults when it is absent.
pub fn load_config(dir: &Path) -> Result<(AppConfig, ConfigOrigin), ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok((AppConfig::default(), ConfigOrigin::Defaults));
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.clone(),
        message: err.to_string(),
    })?;
    Ok((config, ConfigOrigin::File(path)))
}

pub fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::logging::LogDestination;
    use rewards_logging::LogLevel;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let (config, origin) = load_config(temp.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(origin, ConfigOrigin::Defaults);
        assert_eq!(config.watch_delay(), Duration::from_millis(3_000));
        assert_eq!(config.classifier.request_timeout_ms, 30_000);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            "(watch_delay_ms: 10, classifier: (model: \"other-model\"), \
             logging: (destination: Both, level: Debug))",
        )
        .unwrap();

        let (config, origin) = load_config(temp.path()).unwrap();
        assert_eq!(origin, ConfigOrigin::File(temp.path().join(CONFIG_FILENAME)));
        assert_eq!(config.watch_delay_ms, 10);
        assert_eq!(config.classifier.model, "other-model");
        assert_eq!(config.classifier.base_url, ClassifierConfig::default().base_url);
        assert_eq!(config.logging.destination, LogDestination::Both);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.file, LogSettings::default().file);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "(watch_delay_ms: \"soon\")").unwrap();

        let err = load_config(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn settings_carry_key_and_timeouts() {
        let config = AppConfig::default();
        let settings = config.classifier_settings(Some("k".to_string()));
        assert_eq!(settings.api_key.as_deref(), Some("k"));
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
    }
}
