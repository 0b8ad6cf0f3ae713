/*!
 * Error types for the etlcheck application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The provider answered but the completion carried no text
    #[error("Provider returned an empty response")]
    EmptyResponse,
}

impl ProviderError {
    /// Classify a non-success HTTP status returned by a provider
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }

    /// Classify a transport level failure from reqwest
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while validating a converted script
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A caller supplied an argument outside its domain (e.g. a zero chunk size)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required input file was not supplied or does not exist
    #[error("Missing input: {0}")]
    InputMissing(String),

    /// The model service failed; the whole run is aborted.
    /// The cause is reached through the error chain, not the message
    #[error("Error during validation")]
    ExternalServiceFailure {
        /// Which call failed, e.g. "validation part 2" or "correction"
        stage: String,
        /// Underlying provider failure
        #[source]
        source: ProviderError,
    },
}

/// Errors that can occur while rendering report documents
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to produce the fixed-layout document
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    /// Failed to produce the flow document
    #[error("DOCX rendering failed: {0}")]
    Docx(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the validation run
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error from rendering
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
