// src/provider/openai_compat.rs — OpenAI-compatible chat-completions provider
//
// Used for Groq by default; any endpoint speaking POST {base_url}/chat/completions works.
// The bearer token and timeouts live on the reqwest client, not on each request.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ChatRequest, ChatResponse, Message, ModelProvider, StopReason, TokenUsage};
use crate::infra::config::ProviderConfig;
use crate::infra::errors::CoachError;

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    #[allow(dead_code)]
    index: u32,
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Provider for any OpenAI-compatible API endpoint (Groq, Together, vLLM, ...).
pub struct OpenAICompatProvider {
    id_str: String,
    name_str: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAICompatProvider {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        api_key: &str,
        base_url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, CoachError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| CoachError::Config(format!("API key is not a valid header value: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(format!("interview-coach/{}", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| CoachError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            id_str: id.into(),
            name_str: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, CoachError> {
        let api_key = config.resolve_api_key()?;
        Self::new(
            config.id.clone(),
            config.name.clone(),
            &api_key,
            config.base_url.clone(),
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn transport_error(&self, e: reqwest::Error) -> CoachError {
        // No URL in the message: port digits can read as an HTTP status.
        let e = e.without_url();
        let timed_out = e.is_timeout();
        let message = if timed_out {
            format!("timeout: {e}")
        } else {
            format!("network error: {e}")
        };
        CoachError::Transport {
            provider: self.id_str.clone(),
            message,
            timed_out,
        }
    }
}

#[async_trait]
impl ModelProvider for OpenAICompatProvider {
    fn id(&self) -> &str {
        &self.id_str
    }

    fn name(&self) -> &str {
        &self.name_str
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, CoachError> {
        let body = CompletionRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(CoachError::Http {
                provider: self.id_str.clone(),
                status: status.as_u16(),
                body: error_body,
            });
        }

        let resp: CompletionResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                CoachError::Transport {
                    provider: self.id_str.clone(),
                    message: format!("Failed to parse response: {}", e.without_url()),
                    timed_out: false,
                }
            } else {
                self.transport_error(e)
            }
        })?;

        tracing::debug!(
            provider = %self.id_str,
            id = %resp.id,
            choices = resp.choices.len(),
            "chat completion received"
        );

        let Some(choice) = resp.choices.into_iter().next() else {
            return Err(CoachError::EmptyResponse {
                provider: self.id_str.clone(),
            });
        };
        let Some(content) = choice.message.content else {
            return Err(CoachError::EmptyResponse {
                provider: self.id_str.clone(),
            });
        };

        let usage = resp
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(ChatResponse {
            content,
            usage,
            stop_reason: StopReason::from_finish_reason(choice.finish_reason.as_deref()),
        })
    }
}
