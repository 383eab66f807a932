//! Error types for Gemini API integration

use thiserror::Error;

/// Errors that can occur when interacting with the Gemini API
#[derive(Debug, Error)]
pub enum GeminiError {
    /// API key is not configured
    #[error("API key not configured. Run `tense-trainer key set <KEY>` or set GEMINI_API_KEY")]
    ApiKeyNotFound,

    /// Failed to access system keyring
    #[error("Failed to access keyring: {0}")]
    KeyringError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Rate limited by the API (HTTP 429)
    #[error("API error (429): {message} (retry after {retry_after_seconds} seconds)")]
    RateLimited {
        /// Error message from API
        message: String,
        /// Seconds to wait before retrying
        retry_after_seconds: u64,
    },

    /// Response body did not have the candidates/content/parts/text shape
    #[error("Unexpected response structure from the API: {0}")]
    UnexpectedResponse(String),

    /// Invalid API key format
    #[error("Invalid API key format. Key should start with 'AIza'")]
    InvalidApiKey,
}

impl GeminiError {
    /// Check if this error is recoverable (user can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GeminiError::RateLimited { .. }
                | GeminiError::RequestError(_)
                | GeminiError::UnexpectedResponse(_)
                | GeminiError::ApiError { status: 500..=599, .. }
        )
    }

    /// Check if this error requires a new API key
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            GeminiError::ApiKeyNotFound
                | GeminiError::InvalidApiKey
                | GeminiError::ApiError { status: 401 | 403, .. }
        )
    }
}
