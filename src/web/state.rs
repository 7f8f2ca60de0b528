use std::sync::Arc;

use crate::services::roster_service::RosterManager;

#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<RosterManager>,
}

impl AppState {
    pub fn new(roster: RosterManager) -> Self {
        Self {
            roster: Arc::new(roster),
        }
    }
}
