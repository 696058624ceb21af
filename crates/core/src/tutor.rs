//! Tutor Service
//!
//! Wires the profile, composer, shaper and remote capabilities into the
//! operations exposed to callers. Each operation is independent: the only
//! state shared between calls is the read-only profile.

use crate::{
    error::TutorError,
    llm_client::TextGenerator,
    profile::ProfileStore,
    prompt::{Prompt, PromptComposer, PromptRequest},
    shaper::{ModelReply, ResponseShaper, TutorReply},
    speech::SpeechSynthesizer,
};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct Tutor {
    profiles: ProfileStore,
    composer: PromptComposer,
    shaper: ResponseShaper,
    generator: Arc<dyn TextGenerator>,
    speech: Arc<dyn SpeechSynthesizer>,
}

impl Tutor {
    pub fn new(
        profiles: ProfileStore,
        composer: PromptComposer,
        generator: Arc<dyn TextGenerator>,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            profiles,
            composer,
            shaper: ResponseShaper,
            generator,
            speech,
        }
    }

    pub fn get_profile(&self) -> TutorReply {
        TutorReply::Profile {
            profile: (*self.profiles.get_profile()).clone(),
        }
    }

    pub async fn explanation(&self, topic: Option<String>) -> Result<TutorReply, TutorError> {
        self.handle(PromptRequest::Explanation { topic }).await
    }

    pub async fn question(&self, topic: Option<String>) -> Result<TutorReply, TutorError> {
        self.handle(PromptRequest::Question { topic }).await
    }

    pub async fn feedback(
        &self,
        question: String,
        answer: String,
    ) -> Result<TutorReply, TutorError> {
        self.handle(PromptRequest::Feedback { question, answer }).await
    }

    /// Explanation and question, generated as two concurrent model calls.
    pub async fn combined_flow(&self, topic: Option<String>) -> Result<TutorReply, TutorError> {
        self.handle(PromptRequest::Combined { topic }).await
    }

    /// Builds, sends and shapes every model call for `request`.
    ///
    /// All calls must succeed; the first failure fails the whole request.
    #[instrument(name = "tutor_request", skip_all, fields(kind = %request.kind()))]
    pub async fn handle(&self, request: PromptRequest) -> Result<TutorReply, TutorError> {
        let profile = self.profiles.get_profile();
        let prompts = self.composer.build(&profile, &request).inspect_err(|e| {
            warn!(error = %e, "Rejected tutor request");
        })?;

        info!(calls = prompts.len(), "Sending prompts to the model");
        let replies = try_join_all(prompts.into_iter().map(|prompt| self.generate(prompt))).await?;

        self.shaper.shape(request.kind(), replies, request.answer())
    }

    async fn generate(&self, prompt: Prompt) -> Result<ModelReply, TutorError> {
        let kind = prompt.kind;
        self.generator
            .generate_text(prompt.messages, prompt.params)
            .await
            .map(ModelReply::new)
            .map_err(|e| {
                warn!(%kind, error = %e, "Model call failed");
                TutorError::upstream(e)
            })
    }

    /// Synthesizes `text` and returns it base64-encoded.
    #[instrument(name = "text_to_speech", skip_all, fields(chars = text.chars().count()))]
    pub async fn text_to_speech(&self, text: String) -> Result<TutorReply, TutorError> {
        if text.trim().is_empty() {
            return Err(TutorError::Validation("Missing parameter: text".to_string()));
        }
        let audio = self.speech.synthesize(text).await.map_err(|e| {
            warn!(error = %e, "Speech synthesis failed");
            TutorError::upstream(e)
        })?;
        info!(bytes = audio.len(), "Speech synthesized");
        Ok(self.shaper.shape_audio(&audio))
    }
}
