//! Data models for Gemini `generateContent` requests and responses

use serde::{Deserialize, Serialize};

use super::error::GeminiError;

/// Available Gemini models
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum GeminiModel {
    /// Gemini 2.0 Flash - fast general-purpose model
    #[default]
    Flash20,
    /// Gemini 2.0 Flash-Lite - cheapest option
    FlashLite20,
    /// Gemini 1.5 Flash - previous generation fast model
    Flash15,
    /// Gemini 1.5 Pro - previous generation large model
    Pro15,
}

impl GeminiModel {
    /// Get the API model identifier
    pub fn model_id(&self) -> &'static str {
        match self {
            Self::Flash20 => "gemini-2.0-flash",
            Self::FlashLite20 => "gemini-2.0-flash-lite",
            Self::Flash15 => "gemini-1.5-flash",
            Self::Pro15 => "gemini-1.5-pro",
        }
    }

    /// Parse model from a short name or a model ID
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flash" | "flash2" | "gemini-2.0-flash" => Some(Self::Flash20),
            "lite" | "flash-lite" | "gemini-2.0-flash-lite" => Some(Self::FlashLite20),
            "flash15" | "gemini-1.5-flash" => Some(Self::Flash15),
            "pro" | "pro15" | "gemini-1.5-pro" => Some(Self::Pro15),
            _ => None,
        }
    }
}

impl std::str::FromStr for GeminiModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown model: {}. Options: flash, lite, flash15, pro", s))
    }
}

/// Role of a content turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A text part of a content turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// One conversation turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one user prompt
    pub fn user_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some(Role::User),
                parts: vec![Part { text: Some(prompt.into()) }],
            }],
        }
    }
}

/// A generated candidate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: Option<u32>,
    #[serde(default)]
    pub candidates_token_count: Option<u32>,
    #[serde(default)]
    pub total_token_count: Option<u32>,
}

/// Response body of `generateContent`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate
    pub fn first_text(&self) -> Result<&str, GeminiError> {
        let candidate = self
            .candidates
            .first()
            .ok_or_else(|| GeminiError::UnexpectedResponse("no candidates".to_string()))?;
        let content = candidate.content.as_ref().ok_or_else(|| {
            GeminiError::UnexpectedResponse(format!(
                "candidate has no content (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ))
        })?;
        content
            .parts
            .first()
            .and_then(|part| part.text.as_deref())
            .ok_or_else(|| GeminiError::UnexpectedResponse("candidate has no text part".to_string()))
    }
}

/// Error envelope returned with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
}

/// Pull the service-provided message out of an error body, falling back to the raw text
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.message,
        _ => body.trim().to_string(),
    }
}
