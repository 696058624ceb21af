use crate::prompt::{GenerationParams, PromptMessage, Role};
use anyhow::{Context, Result, anyhow};
use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    },
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;
use tracing::debug;

/// The remote generative-model capability: messages in, text out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Makes a single, non-streaming completion call.
    ///
    /// Errors carry the provider's message as their top-level `Display`.
    async fn generate_text(
        &self,
        messages: Vec<PromptMessage>,
        params: GenerationParams,
    ) -> Result<String>;
}

/// Builds an SDK client that makes exactly one attempt per call.
///
/// A zero elapsed-time budget disables the SDK's retry on 5xx and rate-limit replies.
pub(crate) fn single_attempt_client(config: OpenAIConfig) -> Client<OpenAIConfig> {
    let no_retry = ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build();
    Client::with_config(config).with_backoff(no_retry)
}

/// Reduces an SDK error to the provider's own message when it sent one.
pub(crate) fn provider_error(err: OpenAIError) -> anyhow::Error {
    match err {
        OpenAIError::ApiError(api) => anyhow!(api.message),
        other => other.into(),
    }
}

/// An implementation of `TextGenerator` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The model identifier to use for chat completions (e.g., "gpt-4").
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: single_attempt_client(config),
            model,
        }
    }
}

fn to_request_message(message: PromptMessage) -> Result<ChatCompletionRequestMessage> {
    let converted = match message.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.text)
            .build()?
            .into(),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.text)
            .build()?
            .into(),
    };
    Ok(converted)
}

#[async_trait]
impl TextGenerator for OpenAICompatibleClient {
    async fn generate_text(
        &self,
        messages: Vec<PromptMessage>,
        params: GenerationParams,
    ) -> Result<String> {
        let messages = messages
            .into_iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_completion_tokens(params.max_output_tokens)
            .temperature(params.temperature)
            .build()?;

        let response: CreateChatCompletionResponse = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(provider_error)?;
        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion finished"
            );
        }

        let content = response
            .choices
            .into_iter()
            .next()
            .context("No response choice from LLM")?
            .message
            .content
            .context("No content in LLM response")?;
        Ok(content)
    }
}
