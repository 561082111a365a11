//! Error types for generative service operations
//!
//! HTTP status codes from the service map onto the variants below; see the
//! provider for the exact mapping.

use thiserror::Error;

/// Result type for generative service operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur while talking to the generative service
#[derive(Error, Debug)]
pub enum LLMError {
    /// Any other non-success status, with the status and body
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// 401 or 403: the key is missing, invalid or lacks access
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// 429: quota or rate limit hit
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// 400, or a request the client refuses to send
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 404: unknown model identifier
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Malformed body, no candidates, blocked prompt, or empty answer
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Provider could not be constructed
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
