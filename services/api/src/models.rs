//! API Request and Response Models
//!
//! Request bodies accepted by the handlers, plus the few response bodies that
//! are not tutor replies. Every field is optional at the serde level so that
//! missing input reaches the tutor and is reported as a validation failure.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct TopicPayload {
    /// Concept to teach. Defaults to fraction multiplication.
    #[schema(example = "fraction multiplication")]
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct FeedbackPayload {
    #[schema(example = "If you eat 1/2 of 2/3 of a pizza, how much pizza did you eat?")]
    #[serde(default, alias = "pregunta")]
    pub question: String,
    #[schema(example = "I ate 1/3 of the pizza")]
    #[serde(default, alias = "respuesta")]
    pub answer: String,
}

#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct SpeechPayload {
    #[schema(example = "Bismillah! You can do this!")]
    #[serde(default, alias = "texto")]
    pub text: String,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
