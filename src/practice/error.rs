//! Error types for practice setup and the practice clients

use thiserror::Error;

use crate::gemini::GeminiError;
use crate::session::SessionConfig;

/// Invalid session setup, rejected before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("Please select at least one tense.")]
    NoTenseSelected,

    #[error(
        "Sentence count must be between {min} and {max}, got {0}.",
        min = SessionConfig::MIN_SENTENCES,
        max = SessionConfig::MAX_SENTENCES
    )]
    InvalidSentenceCount(u32),

    #[error("Please enter your translation before asking for a review.")]
    EmptyAnswer,
}

/// Failures of the generation client
#[derive(Debug, Error)]
pub enum PracticeError {
    /// The language model call failed (transport, status or response shape)
    #[error(transparent)]
    Model(#[from] GeminiError),

    /// The response parsed, but no usable sentence survived
    #[error("Could not generate sentences. Please try again.")]
    NoSentences,
}

impl PracticeError {
    /// Trying again later might succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            PracticeError::Model(e) => e.is_recoverable(),
            PracticeError::NoSentences => true,
        }
    }

    /// The API key is missing or was rejected
    pub fn requires_reauth(&self) -> bool {
        matches!(self, PracticeError::Model(e) if e.requires_reauth())
    }
}
