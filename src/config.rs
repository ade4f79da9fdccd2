use std::path::PathBuf;

use chrono_tz::Tz;
use thiserror::Error;

use crate::constants::{DEFAULT_TIMEZONE, DEFAULT_WINDOW_DAYS};
use crate::i18n::Language;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Archive data
    pub data_dir: PathBuf,

    // Timeline
    pub timezone: Tz,
    pub window_days: usize,
    pub default_language: Language,

    // Web Server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Archive data
            data_dir: PathBuf::from(env_or_default("DATA_DIR", "./data")),

            // Timeline
            timezone: parse_timezone(&env_or_default("ARCHIVE_TIMEZONE", DEFAULT_TIMEZONE))?,
            window_days: parse_env_usize("PAGE_WINDOW_DAYS", DEFAULT_WINDOW_DAYS)?,
            default_language: parse_language(&env_or_default(
                "DEFAULT_LANGUAGE",
                Language::default().code(),
            ))?,

            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8080)?,
        })
    }

    /// Build a configuration for an archive rooted at `data_dir` with all other
    /// settings at their defaults.
    #[must_use]
    pub fn for_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            timezone: chrono_tz::Asia::Tokyo,
            window_days: DEFAULT_WINDOW_DAYS,
            default_language: Language::default(),
            web_host: "127.0.0.1".to_string(),
            web_port: 8080,
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_days == 0 {
            return Err(ConfigError::InvalidValue {
                name: "PAGE_WINDOW_DAYS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.web_host.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "WEB_HOST".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_timezone(value: &str) -> Result<Tz, ConfigError> {
    value
        .trim()
        .parse::<Tz>()
        .map_err(|e| ConfigError::InvalidValue {
            name: "ARCHIVE_TIMEZONE".to_string(),
            message: format!("unknown time zone '{value}': {e}"),
        })
}

fn parse_language(value: &str) -> Result<Language, ConfigError> {
    Language::from_code(value).ok_or_else(|| ConfigError::InvalidValue {
        name: "DEFAULT_LANGUAGE".to_string(),
        message: format!("unsupported language '{value}'"),
    })
}
