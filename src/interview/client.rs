// src/interview/client.rs — Thin chat-completion wrapper for interview prompts

use std::sync::Arc;

use crate::infra::errors::CoachError;
use crate::provider::{ChatRequest, Message, ModelProvider};

/// Sends one system+user exchange and returns the model's text.
#[derive(Clone)]
pub struct InterviewClient {
    provider: Arc<dyn ModelProvider>,
    temperature: Option<f32>,
}

impl InterviewClient {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Single attempt; errors from the provider propagate unchanged.
    pub async fn send(
        &self,
        system: &str,
        user: &str,
        model: &str,
        max_tokens: u32,
    ) -> Result<String, CoachError> {
        self.send_messages(
            vec![Message::system(system), Message::user(user)],
            model,
            max_tokens,
        )
        .await
    }

    pub async fn send_messages(
        &self,
        messages: Vec<Message>,
        model: &str,
        max_tokens: u32,
    ) -> Result<String, CoachError> {
        let response = self
            .provider
            .chat(ChatRequest {
                model: model.to_string(),
                messages,
                max_tokens: Some(max_tokens),
                temperature: self.temperature,
            })
            .await?;

        tracing::debug!(
            provider = self.provider.id(),
            tokens = response.usage.total(),
            stop_reason = ?response.stop_reason,
            "model reply: {}",
            response.content
        );

        Ok(response.content)
    }
}
