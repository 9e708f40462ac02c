//! OpenRouter generator adapter
//!
//! Implements the [`Generator`] port against OpenRouter's OpenAI-compatible
//! chat completions API. One stateless client is shared by every worker;
//! the worker identity travels with each call as the system message, so no
//! per-worker session state exists.

use async_trait::async_trait;
use consilium_application::ports::generator::{GenerationError, Generator};
use consilium_domain::Worker;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "meta-llama/codellama-34b-instruct";

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Generation adapter backed by the OpenRouter chat completions API
pub struct OpenRouterGenerator {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl OpenRouterGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_base: OPENROUTER_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Transport-level timeout for the HTTP request itself. The scheduler
    /// applies its own per-task deadline on top of this.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Result<Self, GenerationError> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;
        Ok(self)
    }

    fn map_transport_error(error: reqwest::Error) -> GenerationError {
        if error.is_timeout() {
            GenerationError::Timeout
        } else if error.is_decode() {
            GenerationError::InvalidResponse(error.to_string())
        } else {
            GenerationError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl Generator for OpenRouterGenerator {
    #[instrument(skip(self, system_prompt, prompt), fields(role = %identity.role(), model = %self.model))]
    async fn generate(
        &self,
        identity: &Worker,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        debug!("Sending chat completion request");

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited,
                StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                    GenerationError::Timeout
                }
                _ => GenerationError::Network(format!("HTTP {}: {}", status.as_u16(), body)),
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(Self::map_transport_error)?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(GenerationError::InvalidResponse(
                "empty completion content".to_string(),
            ));
        }

        Ok(content)
    }
}
