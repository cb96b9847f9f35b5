//! Generation error types

use thiserror::Error;

/// Failures surfaced by the generative backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Rate limit or quota exhausted. Retried with backoff, then surfaced
    /// so the user can switch engines.
    #[error("Quota exceeded")]
    QuotaExceeded,

    /// The backend no longer recognises the session credential. Never
    /// retried; the host must re-authenticate.
    #[error("Session is no longer valid")]
    SessionInvalid,

    /// The response did not contain what was asked for.
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    /// Anything else, message kept verbatim.
    #[error("{0}")]
    Unknown(String),
}

impl GenerationError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerationError::QuotaExceeded)
    }
}

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Map a raw backend failure message onto the taxonomy.
pub fn classify(message: &str) -> GenerationError {
    if message.contains("429")
        || message.contains("RESOURCE_EXHAUSTED")
        || message.to_ascii_lowercase().contains("quota")
    {
        GenerationError::QuotaExceeded
    } else if message.contains("Requested entity was not found") {
        GenerationError::SessionInvalid
    } else {
        GenerationError::Unknown(message.to_string())
    }
}
