use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One extracurricular activity. The activity name is the key it is stored
/// under, not a field of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub description: String,
    pub schedule: String,
    pub max_participants: usize,
    /// Signup order; emails are unique within one roster.
    #[serde(default)]
    pub participants: Vec<String>,
}

impl ActivityRecord {
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants
    }

    pub fn is_registered(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    pub fn spots_left(&self) -> usize {
        self.max_participants.saturating_sub(self.participants.len())
    }
}

/// Activity name -> record, iterated in seed order.
pub type ActivityMap = IndexMap<String, ActivityRecord>;
