use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::ActivityMap;
use crate::web::error::ApiError;
use crate::web::state::AppState;

/// Raw query pairs, kept as a list so a repeated `email` is not a
/// deserialization error.
pub type QueryPairs = Vec<(String, String)>;

/// The last `email` value wins; it must not be blank.
fn require_email(pairs: QueryPairs) -> Result<String, ApiError> {
    pairs
        .into_iter()
        .filter(|(key, _)| key == "email")
        .map(|(_, value)| value)
        .last()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::missing_query_param("email"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn list_activities_handler(State(state): State<AppState>) -> Json<ActivityMap> {
    Json(state.roster.list_activities())
}

pub async fn signup_handler(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<QueryPairs>, QueryRejection>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(activity_name) = path?;
    let Query(pairs) = query?;
    let email = require_email(pairs)?;
    let change = state.roster.signup(&activity_name, &email)?;
    Ok(Json(MessageResponse {
        message: format!("Signed up {} for {}", change.email, change.activity),
    }))
}

pub async fn unregister_handler(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<QueryPairs>, QueryRejection>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(activity_name) = path?;
    let Query(pairs) = query?;
    let email = require_email(pairs)?;
    let change = state.roster.unregister(&activity_name, &email)?;
    Ok(Json(MessageResponse {
        message: format!("Unregistered {} from {}", change.email, change.activity),
    }))
}
