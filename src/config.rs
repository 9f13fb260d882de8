use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LOG_FILE: &str = "quizgen_debug.log";

pub const BASE_URL_VAR: &str = "QUIZGEN_BASE_URL";
pub const TIMEOUT_VAR: &str = "QUIZGEN_TIMEOUT_SECS";
pub const LOG_FILE_VAR: &str = "QUIZGEN_LOG_FILE";
pub const EMAIL_VAR: &str = "QUIZGEN_EMAIL";
pub const PASSWORD_VAR: &str = "QUIZGEN_PASSWORD";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid QUIZGEN_BASE_URL '{0}': URL must start with http:// or https://")]
    InvalidBaseUrl(String),
    #[error("invalid QUIZGEN_TIMEOUT_SECS '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub request_timeout: Duration,
    pub log_file: PathBuf,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            email: None,
            password: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        if let Some(url) = get(BASE_URL_VAR) {
            config.base_url = normalize_base_url(&url)?;
        }

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(path) = get(LOG_FILE_VAR) {
            config.log_file = PathBuf::from(path.trim());
        }

        config.email = get(EMAIL_VAR).map(|email| email.trim().to_string());
        config.password = get(PASSWORD_VAR);

        Ok(config)
    }

    /// Login credentials, when both halves are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.email.as_deref()?, self.password.as_deref()?))
    }
}

fn normalize_base_url(url: &str) -> Result<String, ConfigError> {
    let url = url.trim().trim_end_matches('/');
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::InvalidBaseUrl(url.to_string()));
    }
    Ok(url.to_string())
}
