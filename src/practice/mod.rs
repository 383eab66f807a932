//! Sentence generation and translation review clients

pub mod error;
pub mod generator;
pub mod reviewer;
pub mod service;

pub use error::{PracticeError, SetupError};
pub use generator::{GeneratedSentence, GenerationRequest, SeenSentences};
pub use reviewer::{REVIEW_FALLBACK, ReviewOutcome};
pub use service::{LanguageModel, PracticeService, Tutor};
