//! Error types and handling for the Skycast dashboard

use thiserror::Error;

/// Main error type for the Skycast application
#[derive(Error, Debug)]
pub enum SkycastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SkycastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkycastError::Config { .. } => {
                "Configuration error. Please check your config file and OpenWeather API key."
                    .to_string()
            }
            SkycastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            SkycastError::Io { .. } => {
                "Network operation failed. Check that the port is not already in use.".to_string()
            }
        }
    }
}

/// Why a single call to an external provider produced no usable payload.
///
/// Network clients return these instead of substituting fallback data, so
/// the caller owns the fallback policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Connection, DNS or TLS failure
    #[error("transport failure: {0}")]
    Transport(String),

    /// The per-call timeout elapsed
    #[error("request timed out")]
    Timeout,

    /// Non-2xx HTTP status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Well-formed response without any result (e.g. zero geocode matches)
    #[error("empty result")]
    Empty,

    /// Response body did not have the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchFailure {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            FetchFailure::Timeout
        } else if let Some(status) = err.status() {
            FetchFailure::Status(status.as_u16())
        } else if err.is_decode() {
            FetchFailure::Malformed(err.to_string())
        } else {
            FetchFailure::Transport(err.to_string())
        }
    }
}

/// Outcome of one call to an external provider
pub type FetchResult<T> = std::result::Result<T, FetchFailure>;
