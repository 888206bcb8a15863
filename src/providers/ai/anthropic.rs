//! Anthropic Claude API provider implementation.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::traits::{
    CompletionRequest, CompletionResponse, FinishReason, LlmError, LlmProvider, LlmResult,
    Message, TokenUsage,
};
use crate::config::AssistantSettings;

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Used when a request does not set its own budget.
const DEFAULT_MAX_TOKENS: usize = 4096;

/// Anthropic API request format.
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: usize,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

impl From<&Message> for AnthropicMessage {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        }
    }
}

/// Anthropic API response format.
///
/// Only `content` is required; everything else is read when present.
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type", default)]
    content_type: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AnthropicUsage {
    #[serde(default)]
    input_tokens: usize,
    #[serde(default)]
    output_tokens: usize,
}

/// Anthropic API error response.
#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorDetail,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

/// Provider for Anthropic's Claude API.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
    api_version: String,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider against the public endpoint.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
            endpoint: ANTHROPIC_API_URL.to_string(),
            api_version: ANTHROPIC_VERSION.to_string(),
        }
    }

    /// Creates a provider from assistant settings.
    pub fn from_settings(settings: &AssistantSettings) -> Self {
        Self::new(settings.api_key.clone(), settings.model.clone())
            .with_endpoint(settings.endpoint.clone())
            .with_api_version(settings.api_version.clone())
    }

    /// Overrides the HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Overrides the messages endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the `anthropic-version` header value.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    fn build_headers(&self, api_key: &str) -> LlmResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(api_key).map_err(|_| {
            LlmError::AuthenticationError("API key is not a valid header value".to_string())
        })?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(&self.api_version).map_err(|_| {
                LlmError::InvalidResponse(format!("invalid API version: {}", self.api_version))
            })?,
        );
        Ok(headers)
    }

    fn build_request(&self, request: &CompletionRequest) -> AnthropicRequest {
        AnthropicRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages: request.messages.iter().map(AnthropicMessage::from).collect(),
        }
    }

    fn parse_finish_reason(reason: Option<&str>) -> FinishReason {
        match reason {
            Some("end_turn") => FinishReason::Stop,
            Some("max_tokens") => FinishReason::Length,
            Some("stop_sequence") => FinishReason::Stop,
            _ => FinishReason::Other,
        }
    }

    fn into_completion(api_response: AnthropicResponse) -> LlmResult<CompletionResponse> {
        let first = api_response
            .content
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("response has no content".to_string()))?;

        let text = first.text.ok_or_else(|| {
            LlmError::InvalidResponse(format!(
                "first content segment has no text (type {:?})",
                first.content_type
            ))
        })?;

        let usage = api_response.usage.unwrap_or_default();
        let tokens_used = TokenUsage {
            prompt_tokens: usage.input_tokens,
            completion_tokens: usage.output_tokens,
            total_tokens: usage.input_tokens + usage.output_tokens,
        };

        Ok(CompletionResponse {
            text,
            tokens_used,
            finish_reason: Self::parse_finish_reason(api_response.stop_reason.as_deref()),
        })
    }

    async fn handle_error_response(&self, response: reqwest::Response) -> LlmError {
        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());

            return LlmError::RateLimited {
                retry_after_secs: retry_after,
            };
        }

        if let Ok(error) = response.json::<AnthropicError>().await {
            if status == 401 || error.error.error_type == "authentication_error" {
                return LlmError::AuthenticationError(error.error.message);
            }
            return LlmError::ApiError {
                status,
                message: error.error.message,
            };
        }

        LlmError::ApiError {
            status,
            message: format!("HTTP {}", status),
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> LlmResult<CompletionResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            LlmError::AuthenticationError("no API key configured".to_string())
        })?;
        let body = self.build_request(request);

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.build_headers(api_key)?)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.handle_error_response(response).await);
        }

        let api_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let completion = Self::into_completion(api_response)?;
        tracing::debug!(
            model = %self.model,
            input_tokens = completion.tokens_used.prompt_tokens,
            output_tokens = completion.tokens_used.completion_tokens,
            finish_reason = ?completion.finish_reason,
            "Anthropic completion received"
        );
        Ok(completion)
    }
}
