use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::web::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub activities: usize,
    pub build: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        activities: state.roster.activity_count(),
        build: env!("MERGINGTON_BUILD_ID").to_string(),
    })
}
