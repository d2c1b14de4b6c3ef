//! Wire Models for the Tutor API
//!
//! Request and response payloads for the tutor protocol endpoints, with
//! `utoipa` schemas for the generated OpenAPI documentation. Field names
//! match the tutor protocol wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studysnaps_core::TutorVerdict;
use utoipa::ToSchema;
use uuid::Uuid;

/// One tutoring step from the student.
#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct AnswerStepRequest {
    /// Opaque key scoping the dialogue history for this problem.
    #[schema(example = "s1")]
    pub session_id: String,
    /// The student's message for this step.
    #[schema(example = "x = 40")]
    pub request: String,
    /// Optional image of the student's work or the problem statement.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// The tutor's decision for one step.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct AnswerStepResponse {
    pub answer_value: String,
    pub solving_completed: bool,
}

impl From<TutorVerdict> for AnswerStepResponse {
    fn from(verdict: TutorVerdict) -> Self {
        Self {
            answer_value: verdict.answer_value,
            solving_completed: verdict.solving_completed,
        }
    }
}

/// Static metadata identifying this tutor.
#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct TutorInfoResponse {
    #[schema(example = "GEOMETRY")]
    pub tutor_id: String,
}

/// One slide of the demo course content.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct Slide {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// The full ordered course.
#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct GetCourseResponse {
    pub slides: Vec<Slide>,
}

/// A free-form chat message to the tutor.
#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct ChatRequest {
    pub text: String,
}

/// The tutor's free-form chat reply.
#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct ChatResponse {
    #[schema(value_type = String, format = Uuid)]
    pub msg_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}
