use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

pub const DEFAULT_HEADHUNTER_BASE_URL: &str = "https://api.hh.ru";
pub const DEFAULT_SUPERJOB_BASE_URL: &str = "https://api.superjob.ru/2.0";

const CONFIG_FILE_NAME: &str = "vacancy-stats.toml";

fn default_languages() -> Vec<String> {
    [
        "Python",
        "Java",
        "JavaScript",
        "C#",
        "C++",
        "PHP",
        "Ruby",
        "Go",
        "Swift",
        "Kotlin",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub headhunter: HeadHunterConfig,
    #[serde(default)]
    pub superjob: SuperJobConfig,
    #[serde(default)]
    pub search: SearchConfig,
    pub logging: Option<LoggingConfig>,
}

/// Credentials are never checked up front; an empty token shows up later
/// as an authorization error from the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeadHunterConfig {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub contact_email: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuperJobConfig {
    #[serde(default)]
    pub app_key: String,
    #[serde(default)]
    pub access_token: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            max_attempts: default_max_attempts(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
        }
    }
}

impl HeadHunterConfig {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_HEADHUNTER_BASE_URL)
    }
}

impl SuperJobConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_SUPERJOB_BASE_URL)
    }
}

impl Config {
    /// Load configuration from an optional TOML file, then apply environment variable overrides
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // An explicit path wins over discovery
        let config_file = match config_path {
            Some(path) => Some(path),
            None => Self::find_config_file(),
        };

        let mut config = match config_file {
            Some(path) if path.exists() => {
                tracing::debug!("Loading config from: {}", path.display());
                let content = std::fs::read_to_string(&path)?;
                toml::from_str::<Config>(&content)?
            }
            // Explicit path that does not exist
            Some(path) => {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file not found: {}", path.display()),
                )));
            }
            None => {
                tracing::debug!("No config file found, using defaults and environment variables");
                Config::default()
            }
        };

        // Apply environment variable overrides
        config.apply_env_overrides()?;

        // Apply defaults for optional sections
        if config.logging.is_none() {
            config.logging = Some(LoggingConfig::default());
        }

        // Validate structural values
        config.validate()?;

        Ok(config)
    }

    /// Look in the current directory first, then in the per-user config directory
    fn find_config_file() -> Option<PathBuf> {
        // First check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Some(current_dir_config);
        }

        // Then ~/.config/vacancy-stats/vacancy-stats.toml or the platform equivalent
        dirs::config_dir()
            .map(|dir| dir.join("vacancy-stats").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        // HeadHunter
        if let Ok(token) = env::var("VACANCY_STATS_HH_ACCESS_TOKEN") {
            self.headhunter.access_token = token;
        }
        if let Ok(email) = env::var("VACANCY_STATS_HH_CONTACT_EMAIL") {
            self.headhunter.contact_email = email;
        }
        if let Ok(base_url) = env::var("VACANCY_STATS_HH_BASE_URL") {
            self.headhunter.base_url = Some(base_url);
        }

        // SuperJob
        if let Ok(app_key) = env::var("VACANCY_STATS_SJ_APP_KEY") {
            self.superjob.app_key = app_key;
        }
        if let Ok(token) = env::var("VACANCY_STATS_SJ_ACCESS_TOKEN") {
            self.superjob.access_token = token;
        }
        if let Ok(base_url) = env::var("VACANCY_STATS_SJ_BASE_URL") {
            self.superjob.base_url = Some(base_url);
        }

        // Search
        if let Ok(languages) = env::var("VACANCY_STATS_LANGUAGES") {
            self.search.languages = languages
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Ok(max_attempts) = env::var("VACANCY_STATS_MAX_ATTEMPTS") {
            self.search.max_attempts = max_attempts.parse().map_err(|_| {
                ConfigError::InvalidValue(
                    "VACANCY_STATS_MAX_ATTEMPTS must be a valid number".to_string(),
                )
            })?;
        }
        if let Ok(timeout) = env::var("VACANCY_STATS_TIMEOUT_SECS") {
            self.search.timeout_secs = timeout.parse().map_err(|_| {
                ConfigError::InvalidValue(
                    "VACANCY_STATS_TIMEOUT_SECS must be a valid number".to_string(),
                )
            })?;
        }

        // Logging
        if let Ok(level) = env::var("VACANCY_STATS_LOG_LEVEL") {
            let logging = self.logging.get_or_insert_with(LoggingConfig::default);
            logging.level = Some(level);
        }

        Ok(())
    }

    /// Structural checks only, credentials are left to the APIs
    fn validate(&self) -> Result<(), ConfigError> {
        if self.search.languages.is_empty() {
            return Err(ConfigError::InvalidValue(
                "search.languages must contain at least one language".to_string(),
            ));
        }

        if self.search.max_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "search.max_attempts must be at least 1".to_string(),
            ));
        }

        if self.search.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "search.timeout_secs must be at least 1".to_string(),
            ));
        }

        // Base URLs must parse even when left at their defaults
        for (field, value) in [
            ("headhunter.base_url", self.headhunter.base_url()),
            ("superjob.base_url", self.superjob.base_url()),
        ] {
            Url::parse(value)
                .map_err(|e| ConfigError::InvalidValue(format!("{field} '{value}': {e}")))?;
        }

        Ok(())
    }

    /// Configured log level, "info" when unset
    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|logging| logging.level.as_deref())
            .unwrap_or("info")
    }
}
