use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use mergington_activities::{
    models::{ActivityMap, ActivityRecord},
    services::roster_service::RosterManager,
    web::{self, state::AppState},
};
use tower::ServiceExt;

pub struct Fixture {
    pub app: Router,
    #[allow(dead_code)]
    pub state: AppState,
    // Keeps the static directory alive for the fixture's lifetime.
    _static_dir: tempfile::TempDir,
}

pub struct APIResponse {
    response: Response,
}

impl APIResponse {
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn header(&self, name: &str) -> Option<String> {
        self.response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    }

    pub async fn bytes(self) -> Vec<u8> {
        self.response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    pub async fn json<T: serde::de::DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.bytes().await).unwrap()
    }

    pub async fn text(self) -> String {
        String::from_utf8(self.bytes().await).unwrap()
    }
}

impl Fixture {
    /// Router over the built-in Mergington activities.
    pub fn new() -> Self {
        Self::with_roster(RosterManager::with_defaults())
    }

    pub fn with_activities(activities: ActivityMap) -> Self {
        Self::with_roster(RosterManager::new(activities).unwrap())
    }

    fn with_roster(roster: RosterManager) -> Self {
        let static_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            static_dir.path().join("index.html"),
            "<html><body>Mergington High School</body></html>",
        )
        .unwrap();

        let state = AppState::new(roster);
        Self {
            app: web::app(state.clone(), static_dir.path()),
            state,
            _static_dir: static_dir,
        }
    }

    pub async fn request(&self, method: &str, path: &str) -> APIResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        APIResponse {
            response: self.app.clone().oneshot(request).await.unwrap(),
        }
    }

    pub async fn get(&self, path: &str) -> APIResponse {
        self.request("GET", path).await
    }

    pub async fn post(&self, path: &str) -> APIResponse {
        self.request("POST", path).await
    }

    pub async fn delete(&self, path: &str) -> APIResponse {
        self.request("DELETE", path).await
    }

    pub async fn activities(&self) -> ActivityMap {
        let response = self.get("/activities").await;
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await
    }

    pub async fn participants(&self, activity: &str) -> Vec<String> {
        self.activities().await[activity].participants.clone()
    }
}

pub fn activity(max_participants: usize, participants: &[&str]) -> ActivityRecord {
    ActivityRecord {
        description: "Test activity for unit tests".to_string(),
        schedule: "Test schedule".to_string(),
        max_participants,
        participants: participants.iter().map(|p| p.to_string()).collect(),
    }
}
