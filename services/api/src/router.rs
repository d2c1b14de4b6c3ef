//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the tutor protocol endpoints and OpenAPI documentation.

use crate::{
    handlers,
    models::{
        AnswerStepRequest, AnswerStepResponse, ChatRequest, ChatResponse, ErrorResponse,
        GetCourseResponse, Slide, TutorInfoResponse,
    },
    state::AppState,
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
        handlers::tutor_info,
        handlers::get_course,
        handlers::answer_step,
        handlers::chat,
    ),
    components(
        schemas(
            TutorInfoResponse,
            GetCourseResponse,
            Slide,
            AnswerStepRequest,
            AnswerStepResponse,
            ChatRequest,
            ChatResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "StudySnaps Tutor API", description = "Step-wise tutoring over bounded session histories")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/tutor", get(handlers::tutor_info))
        .route("/course", get(handlers::get_course))
        .route("/answer", post(handlers::answer_step))
        .route("/chat", post(handlers::chat))
        .with_state(app_state);

    // Merge the stateful routes with the stateless Swagger UI.
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
