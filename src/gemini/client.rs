//! HTTP client for the Gemini API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::GeminiError;
use super::models::{self, GeminiModel, GenerateContentRequest, GenerateContentResponse};
use crate::practice::LanguageModel;

/// Gemini API client
pub struct GeminiClient {
    /// HTTP client
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Model used for every request
    model: GeminiModel,
    /// API base URL, without trailing slash
    base_url: String,
}

impl GeminiClient {
    /// Gemini API base URL
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    /// Create a new Gemini client with the given API key
    pub fn new(api_key: String, model: GeminiModel, timeout: Duration) -> Result<Self, GeminiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, api_key, model, base_url: Self::DEFAULT_BASE_URL.to_string() })
    }

    /// Point the client at a different API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Model this client talks to
    pub fn model(&self) -> GeminiModel {
        self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model.model_id())
    }

    /// Send a single-turn prompt and return the raw response
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        tracing::debug!("POST {}", self.endpoint());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            let body = response.text().await.unwrap_or_default();
            let message = models::error_message(&body);
            tracing::error!("Gemini API error: {} - {}", status, message);

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(GeminiError::RateLimited { message, retry_after_seconds: retry_after });
            }
            return Err(GeminiError::ApiError { status: status.as_u16(), message });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GeminiError::UnexpectedResponse(e.to_string()))?;

        if let Some(usage) = &parsed.usage_metadata {
            tracing::info!(
                "Gemini usage - prompt: {:?}, response: {:?}, total: {:?} tokens",
                usage.prompt_token_count,
                usage.candidates_token_count,
                usage.total_token_count
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::user_prompt(prompt);
        let response = self.generate_content(&request).await?;
        response.first_text().map(str::to_string)
    }
}
