//! Axum Handlers for the Tutor Protocol
//!
//! One handler per protocol request type: tutor metadata, course content,
//! step answer, and the free-form chat variant. Uses `utoipa` doc comments
//! to generate OpenAPI documentation.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use std::sync::Arc;
use studysnaps_core::StepError;
use tracing::error;
use uuid::Uuid;

use crate::{
    course,
    models::{
        AnswerStepRequest, AnswerStepResponse, ChatRequest, ChatResponse, ErrorResponse,
        GetCourseResponse, TutorInfoResponse,
    },
    state::AppState,
};

pub enum ApiError {
    BadRequest(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::InternalServerError(err.into())
    }
}

/// Identify this tutor.
#[utoipa::path(
    get,
    path = "/tutor",
    responses(
        (status = 200, description = "Tutor metadata", body = TutorInfoResponse)
    )
)]
pub async fn tutor_info() -> Json<TutorInfoResponse> {
    Json(TutorInfoResponse {
        tutor_id: course::TUTOR_ID.to_string(),
    })
}

/// Fetch the static demo course slides.
#[utoipa::path(
    get,
    path = "/course",
    responses(
        (status = 200, description = "Ordered course slides", body = GetCourseResponse)
    )
)]
pub async fn get_course() -> Json<GetCourseResponse> {
    Json(GetCourseResponse {
        slides: course::demo_course(),
    })
}

/// Run one tutoring step for a session.
#[utoipa::path(
    post,
    path = "/answer",
    request_body = AnswerStepRequest,
    responses(
        (status = 200, description = "The tutor's next nudge or completion", body = AnswerStepResponse),
        (status = 400, description = "Empty step input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn answer_step(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnswerStepRequest>,
) -> Result<Json<AnswerStepResponse>, ApiError> {
    let verdict = state
        .engine
        .run_step(
            &payload.session_id,
            &payload.request,
            payload.image_url.as_deref(),
        )
        .await
        .map_err(|err| match err {
            StepError::EmptyInput => ApiError::BadRequest(err.to_string()),
        })?;

    Ok(Json(verdict.into()))
}

/// Free-form chat with the tutor. Always replies, never fails outward.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "The tutor's reply", body = ChatResponse)
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let text = state.engine.run_chat(&payload.text).await;
    Json(ChatResponse {
        msg_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        text,
    })
}
