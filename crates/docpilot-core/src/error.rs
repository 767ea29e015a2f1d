//! Error types for docpilot

use crate::capability::CapabilityKind;
use thiserror::Error;

/// Result type alias using DocpilotError
pub type Result<T> = std::result::Result<T, DocpilotError>;

/// Error type alias for convenience
pub type Error = DocpilotError;

/// Result of a single provider call
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_INPUT: i32 = 3;
    pub const PROVIDERS_EXHAUSTED: i32 = 4;
}

/// Main error type for docpilot
#[derive(Debug, Error)]
pub enum DocpilotError {
    #[error("All AI providers failed to {capability} the document ({attempts} attempted)")]
    AllProvidersExhausted {
        capability: CapabilityKind,
        attempts: usize,
    },

    #[error("The document contains no readable text content")]
    EmptyContent,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DocpilotError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AllProvidersExhausted { .. } => exit_codes::PROVIDERS_EXHAUSTED,
            Self::EmptyContent | Self::Config(_) | Self::InvalidInput(_) => {
                exit_codes::INVALID_INPUT
            }
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}

/// Failure of one provider for one request.
///
/// These never reach the caller directly: the orchestrator records them,
/// logs them and moves on to the next provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Credentials or configuration missing. A skip signal, not a failure.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("{0} is not supported by this provider")]
    Unsupported(CapabilityKind),

    #[error("input text is empty")]
    EmptyInput,
}

impl ProviderError {
    /// Stable short label used in structured logs
    pub fn class(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "unavailable",
            Self::Timeout => "timeout",
            Self::HttpStatus { .. } => "http-status",
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::Unsupported(_) => "unsupported",
            Self::EmptyInput => "empty-input",
        }
    }

    /// Whether the orchestrator should treat this as a skip rather than a failure
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Classify a transport-level reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::HttpStatus {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}
