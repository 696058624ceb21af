//! Text-to-speech capability and its OpenAI adapter.

use anyhow::{Context, Result};
use crate::llm_client::{provider_error, single_attempt_client};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{CreateSpeechRequestArgs, SpeechModel, SpeechResponseFormat, Voice},
};
use async_trait::async_trait;

/// The remote speech-synthesis capability: text in, encoded audio bytes out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: String) -> Result<Vec<u8>>;
}

/// Calls the `audio/speech` endpoint of an OpenAI-compatible API, producing MP3.
pub struct OpenAISpeechClient {
    client: Client<OpenAIConfig>,
    model: SpeechModel,
    voice: Voice,
}

impl OpenAISpeechClient {
    /// Creates a speech client.
    ///
    /// `model` and `voice` use the API's own names (e.g. `"tts-1"`, `"nova"`).
    /// Model names are passed through as given; a voice outside the SDK's
    /// known set is rejected here.
    pub fn new(config: OpenAIConfig, model: &str, voice: &str) -> Result<Self> {
        let model: SpeechModel = serde_json::from_value(serde_json::Value::from(model))
            .with_context(|| format!("Unknown speech model '{}'", model))?;
        let voice: Voice = serde_json::from_value(serde_json::Value::from(voice))
            .with_context(|| format!("Unknown speech voice '{}'", voice))?;
        Ok(Self {
            client: single_attempt_client(config),
            model,
            voice,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAISpeechClient {
    async fn synthesize(&self, text: String) -> Result<Vec<u8>> {
        let request = CreateSpeechRequestArgs::default()
            .input(text)
            .model(self.model.clone())
            .voice(self.voice.clone())
            .response_format(SpeechResponseFormat::Mp3)
            .build()?;

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(provider_error)?;
        Ok(response.bytes.to_vec())
    }
}
