//! Gemini API integration module
//!
//! Provides API key management and the HTTP client used as the
//! language model behind sentence generation and translation review.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use auth::ApiKeyManager;
pub use client::GeminiClient;
pub use error::GeminiError;
pub use models::{GeminiModel, GenerateContentRequest, GenerateContentResponse};
