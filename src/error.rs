use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Job board API error: {0}")]
    Fetch(#[from] FetchError),

    #[error("City '{city}' not found in {board} catalogue")]
    CityNotFound { board: String, city: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Failure of a single HTTP request against a job board
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response format: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Transport failures and error statuses are worth another attempt,
    /// a response we cannot decode is not
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            FetchError::Status { .. } => true,
            FetchError::MalformedResponse(_) => false,
        }
    }

    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_decode() {
            FetchError::MalformedResponse(error.to_string())
        } else if let Some(status) = error.status() {
            FetchError::Status {
                status: status.as_u16(),
                body: error.to_string(),
            }
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

impl AppError {
    /// City lookups that come back empty are a notice, not a failure
    pub fn is_city_not_found(&self) -> bool {
        matches!(self, AppError::CityNotFound { .. })
    }

    /// Only configuration problems stop the whole run
    pub fn should_shutdown(&self) -> bool {
        matches!(self, AppError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let config_error = ConfigError::InvalidValue("search.languages".to_string());
        let error = AppError::Config(config_error);
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("search.languages"));

        let not_found = AppError::CityNotFound {
            board: "SuperJob".to_string(),
            city: "Atlantis".to_string(),
        };
        assert_eq!(
            not_found.to_string(),
            "City 'Atlantis' not found in SuperJob catalogue"
        );
    }

    #[test]
    fn test_fetch_error_variants() {
        let status = FetchError::Status {
            status: 503,
            body: "Service Unavailable".to_string(),
        };
        assert!(status.to_string().contains("HTTP 503"));
        assert!(status.to_string().contains("Service Unavailable"));

        let malformed = FetchError::MalformedResponse("missing field `found`".to_string());
        assert!(malformed.to_string().contains("Invalid response format"));
        assert!(malformed.to_string().contains("found"));
    }

    #[test]
    fn test_fetch_error_retry_classification() {
        assert!(FetchError::Transport("timeout".to_string()).is_retryable());
        assert!(FetchError::Status {
            status: 429,
            body: String::new(),
        }
        .is_retryable());
        assert!(FetchError::Status {
            status: 403,
            body: "forbidden".to_string(),
        }
        .is_retryable());
        assert!(!FetchError::MalformedResponse("bad json".to_string()).is_retryable());
    }

    #[test]
    fn test_should_shutdown() {
        let config_error = AppError::Config(ConfigError::InvalidValue("x".to_string()));
        assert!(config_error.should_shutdown());

        let fetch_error = AppError::Fetch(FetchError::Transport("reset".to_string()));
        assert!(!fetch_error.should_shutdown());

        let not_found = AppError::CityNotFound {
            board: "HeadHunter".to_string(),
            city: "Nowhere".to_string(),
        };
        assert!(!not_found.should_shutdown());
        assert!(not_found.is_city_not_found());
    }

    #[test]
    fn test_error_conversion() {
        let config_error = ConfigError::InvalidValue("search.per_page".to_string());
        assert!(matches!(AppError::from(config_error), AppError::Config(_)));

        let fetch_error = FetchError::Transport("connection refused".to_string());
        let app_error = AppError::from(fetch_error);
        match app_error {
            AppError::Fetch(inner) => assert!(inner.to_string().contains("connection refused")),
            _ => panic!("Expected Fetch error variant"),
        }
    }
}
