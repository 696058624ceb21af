//! Axum Handlers for the REST API
//!
//! Each handler parses its body, calls one tutor operation and wraps the
//! outcome in a `TutorResponse`. It uses `utoipa` doc comments to generate
//! OpenAPI documentation.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use kai_core::{ErrorKind, TutorError, TutorReply, TutorResponse};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{error, warn};

use crate::{
    models::{FeedbackPayload, HealthResponse, SpeechPayload, TopicPayload},
    state::AppState,
};

/// A failed tutor operation, rendered as a `TutorResponse::Failure`.
#[derive(Debug)]
pub struct ApiError(pub TutorError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::UpstreamFailure => StatusCode::BAD_GATEWAY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.0.kind() {
            ErrorKind::Validation => warn!(error = %self.0, "Request rejected"),
            ErrorKind::UpstreamFailure => error!(error = %self.0, "Upstream provider failed"),
            ErrorKind::Internal => error!("Internal Server Error: {:?}", self.0),
        }
        (status, Json(TutorResponse::failure(&self.0))).into_response()
    }
}

impl From<TutorError> for ApiError {
    fn from(err: TutorError) -> Self {
        Self(err)
    }
}

type ApiResult = Result<Json<TutorResponse>, ApiError>;

fn ok(reply: TutorReply) -> ApiResult {
    Ok(Json(TutorResponse::success(reply)))
}

/// Parses an optional JSON body. An empty body yields `T::default()`.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError(TutorError::Validation(format!("Invalid JSON body: {}", e))))
}

/// Check that the service is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Get the student profile the tutor is personalized for.
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "The student profile", body = TutorResponse)
    )
)]
pub async fn get_profile(State(state): State<Arc<AppState>>) -> Json<TutorResponse> {
    Json(TutorResponse::success(state.tutor.get_profile()))
}

/// Generate a personalized explanation of a concept.
#[utoipa::path(
    post,
    path = "/api/explanation",
    request_body(content = TopicPayload, description = "Optional topic; the body may be empty"),
    responses(
        (status = 200, description = "Explanation generated", body = TutorResponse),
        (status = 400, description = "Invalid request body", body = TutorResponse),
        (status = 502, description = "Model provider failed", body = TutorResponse)
    )
)]
pub async fn get_explanation(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult {
    let payload: TopicPayload = parse_body(&body)?;
    ok(state.tutor.explanation(payload.topic).await?)
}

/// Generate one practice question.
#[utoipa::path(
    post,
    path = "/api/question",
    request_body(content = TopicPayload, description = "Optional topic; the body may be empty"),
    responses(
        (status = 200, description = "Question generated", body = TutorResponse),
        (status = 400, description = "Invalid request body", body = TutorResponse),
        (status = 502, description = "Model provider failed", body = TutorResponse)
    )
)]
pub async fn get_question(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult {
    let payload: TopicPayload = parse_body(&body)?;
    ok(state.tutor.question(payload.topic).await?)
}

/// Give feedback on the student's answer to a question.
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = FeedbackPayload,
    responses(
        (status = 200, description = "Feedback generated", body = TutorResponse),
        (status = 400, description = "Question or answer missing", body = TutorResponse),
        (status = 502, description = "Model provider failed", body = TutorResponse)
    )
)]
pub async fn get_feedback(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult {
    let payload: FeedbackPayload = parse_body(&body)?;
    ok(state.tutor.feedback(payload.question, payload.answer).await?)
}

/// Generate an explanation and a question together.
#[utoipa::path(
    post,
    path = "/api/flow",
    request_body(content = TopicPayload, description = "Optional topic; the body may be empty"),
    responses(
        (status = 200, description = "Explanation and question generated", body = TutorResponse),
        (status = 400, description = "Invalid request body", body = TutorResponse),
        (status = 502, description = "Model provider failed", body = TutorResponse)
    )
)]
pub async fn get_combined_flow(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult {
    let payload: TopicPayload = parse_body(&body)?;
    ok(state.tutor.combined_flow(payload.topic).await?)
}

/// Convert text to MP3 speech, returned base64-encoded.
#[utoipa::path(
    post,
    path = "/api/audio",
    request_body = SpeechPayload,
    responses(
        (status = 200, description = "Audio generated", body = TutorResponse),
        (status = 400, description = "Text missing", body = TutorResponse),
        (status = 502, description = "Speech provider failed", body = TutorResponse)
    )
)]
pub async fn text_to_speech(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult {
    let payload: SpeechPayload = parse_body(&body)?;
    ok(state.tutor.text_to_speech(payload.text).await?)
}
