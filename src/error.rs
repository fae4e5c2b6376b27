//! Error types and handling for the distance lookup

use thiserror::Error;

/// Classified failure of a single distance lookup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The query was empty or whitespace only
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The geocoding service failed or answered with something unusable
    #[error("Geocoding service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// The geocoding service answered but had no match for the query
    #[error("Location not found: {query}")]
    NotFound { query: String },
}

impl LookupError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new service unavailable error
    pub fn service_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Create a new not found error
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Short machine-readable kind, used in API payloads
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::Validation { .. } => ErrorKind::Validation,
            LookupError::ServiceUnavailable { .. } => ErrorKind::ServiceUnavailable,
            LookupError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LookupError::Validation { .. } => "Please enter a place".to_string(),
            LookupError::ServiceUnavailable { .. } => {
                "The geolocation service is not responding".to_string()
            }
            LookupError::NotFound { .. } => "I couldn't find the place you entered".to_string(),
        }
    }
}

/// Kind of lookup failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    ServiceUnavailable,
    NotFound,
}

/// Process-level errors: configuration and server startup
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors, such as binding the listener
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// HTTP server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new server error
    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server {
            message: message.into(),
        }
    }
}
