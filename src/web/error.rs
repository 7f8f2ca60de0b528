use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::roster_service::RosterError;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub code: StatusCode,
    pub message: String,
}

/// Wire shape of every error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub detail: String,
}

impl ApiError {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn missing_query_param(name: &str) -> Self {
        ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Missing required query parameter: {}", name),
        )
    }
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        let code = match err {
            RosterError::NotFound => StatusCode::NOT_FOUND,
            RosterError::AlreadyRegistered
            | RosterError::AtCapacity
            | RosterError::NotRegistered => StatusCode::BAD_REQUEST,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.code,
            Json(ApiErrorResponse {
                detail: self.message,
            }),
        )
            .into_response()
    }
}
