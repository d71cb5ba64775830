//! Error handling for the bot config console
//!
//! This module defines the main error types used throughout the console
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the console
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Bot config service error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bot config not found: {id}")]
    NotFound { id: i64 },

    #[error("Validation failed: {}", first_message(.0))]
    Validation(Vec<FieldError>),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Bot config service specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("service unavailable")]
    ServiceUnavailable,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("server returned code {code}: {message}")]
    Server { code: i64, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("operation was rejected by the server")]
    Rejected,
}

/// A required form field that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the field, e.g. `botKey`
    pub field: &'static str,
    /// Translation key of the message shown to the user
    pub message_key: &'static str,
}

fn first_message(errors: &[FieldError]) -> String {
    errors
        .first()
        .map(|e| format!("{} is required", e.field))
        .unwrap_or_else(|| "no fields".to_string())
}

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Result type alias for raw service operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Coarse classification of a failure, so callers can branch on cause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced an HTTP response
    Transport,
    /// The service answered with a failure (status, envelope code or `false`)
    Server,
    /// The service answered with something that could not be decoded
    Protocol,
    /// The record does not exist
    NotFound,
    /// Local input was rejected before any request was made
    Validation,
    /// Local environment problem (config, clipboard, I/O)
    Local,
}

impl ConsoleError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConsoleError::Api(api) => match api {
                ApiError::Transport(_) | ApiError::Timeout | ApiError::ServiceUnavailable => {
                    ErrorKind::Transport
                }
                ApiError::Status { .. } | ApiError::Server { .. } | ApiError::Rejected => {
                    ErrorKind::Server
                }
                ApiError::InvalidResponse(_) => ErrorKind::Protocol,
            },
            ConsoleError::NotFound { .. } => ErrorKind::NotFound,
            ConsoleError::Validation(_) => ErrorKind::Validation,
            ConsoleError::Serialization(_) => ErrorKind::Protocol,
            ConsoleError::Config(_)
            | ConsoleError::InvalidStateTransition { .. }
            | ConsoleError::Clipboard(_)
            | ConsoleError::Io(_)
            | ConsoleError::UrlParse(_)
            | ConsoleError::InvalidInput(_) => ErrorKind::Local,
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            ConsoleError::Api(ApiError::Transport(_)) => true,
            ConsoleError::Api(ApiError::Timeout) => true,
            ConsoleError::Api(ApiError::ServiceUnavailable) => true,
            ConsoleError::Api(ApiError::Status { status, .. }) => *status >= 500,
            ConsoleError::Api(_) => false,
            ConsoleError::Config(_) => false,
            ConsoleError::NotFound { .. } => false,
            ConsoleError::Validation(_) => true,
            ConsoleError::InvalidStateTransition { .. } => false,
            ConsoleError::Clipboard(_) => true,
            ConsoleError::Serialization(_) => false,
            ConsoleError::Io(_) => true,
            ConsoleError::UrlParse(_) => false,
            ConsoleError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ConsoleError::Config(_) => ErrorSeverity::Critical,
            ConsoleError::UrlParse(_) => ErrorSeverity::Critical,
            ConsoleError::Validation(_) => ErrorSeverity::Info,
            ConsoleError::InvalidInput(_) => ErrorSeverity::Info,
            ConsoleError::NotFound { .. } => ErrorSeverity::Warning,
            ConsoleError::Clipboard(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::ServiceUnavailable
        } else if e.is_decode() {
            ApiError::InvalidResponse(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
