//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and OpenAPI documentation.

use crate::{
    handlers,
    models::{FeedbackPayload, HealthResponse, SpeechPayload, TopicPayload},
    state::AppState,
};
use kai_core::{
    ErrorKind, TutorReply, TutorResponse,
    profile::StudentProfile,
    shaper::AudioFormat,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check,
        handlers::get_profile,
        handlers::get_explanation,
        handlers::get_question,
        handlers::get_feedback,
        handlers::get_combined_flow,
        handlers::text_to_speech,
    ),
    components(
        schemas(
            TutorResponse, TutorReply, StudentProfile, ErrorKind, AudioFormat,
            TopicPayload, FeedbackPayload, SpeechPayload, HealthResponse
        )
    ),
    tags(
        (name = "Mentor Kai API", description = "Personalized tutoring content for one student")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/api/profile", get(handlers::get_profile))
        .route("/api/explanation", post(handlers::get_explanation))
        .route("/api/question", post(handlers::get_question))
        .route("/api/feedback", post(handlers::get_feedback))
        .route("/api/flow", post(handlers::get_combined_flow))
        .route("/api/audio", post(handlers::text_to_speech))
        // Paths used by the existing Spanish-language client.
        .route("/api/perfil", get(handlers::get_profile))
        .route("/api/explicacion", post(handlers::get_explanation))
        .route("/api/pregunta", post(handlers::get_question))
        .route("/api/retroalimentacion", post(handlers::get_feedback))
        .route("/api/flujo-completo", post(handlers::get_combined_flow))
        .with_state(app_state);

    // Merge the stateful routes with the stateless ones (health, Swagger UI).
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
