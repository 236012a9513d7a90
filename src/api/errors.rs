use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::lessons::LessonError;

/// Structured API error that serializes to JSON.
#[derive(Debug)]
pub enum ApiError {
    BoardNotFound(String),
    BoardExists(String),
    MoveNotFound(String),
    InvalidRequest(String),
    TooManyBoards(usize),
    LessonsUnavailable(LessonError),
    InternalError(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    code: String,
    message: String,
}

impl ApiError {
    /// Machine-readable code sent in the error body.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BoardNotFound(_) => "BOARD_NOT_FOUND",
            ApiError::BoardExists(_) => "BOARD_EXISTS",
            ApiError::MoveNotFound(_) => "MOVE_NOT_FOUND",
            ApiError::InvalidRequest(_) => "INVALID_REQUEST",
            ApiError::TooManyBoards(_) => "TOO_MANY_BOARDS",
            ApiError::LessonsUnavailable(_) => "LESSONS_UNAVAILABLE",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BoardNotFound(_) | ApiError::MoveNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BoardExists(_) => StatusCode::CONFLICT,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::TooManyBoards(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::LessonsUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::BoardNotFound(id) => format!("Board not found: {id}"),
            ApiError::BoardExists(id) => format!("Board already exists: {id}"),
            ApiError::MoveNotFound(text) => format!("No move matches '{text}'"),
            ApiError::InvalidRequest(msg) => msg.clone(),
            ApiError::TooManyBoards(max) => format!("Board limit reached ({max})"),
            ApiError::LessonsUnavailable(err) => format!("Lessons unavailable: {err}"),
            ApiError::InternalError(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.message(),
            },
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Malformed or mistyped JSON bodies share the API error shape.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<LessonError> for ApiError {
    fn from(err: LessonError) -> Self {
        ApiError::LessonsUnavailable(err)
    }
}
