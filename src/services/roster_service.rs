use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{info, warn};

use crate::database::activities_repo::{self, SeedError};
use crate::models::ActivityMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("Activity not found")]
    NotFound,
    #[error("Student is already signed up for this activity")]
    AlreadyRegistered,
    #[error("Activity is at maximum capacity")]
    AtCapacity,
    #[error("Student is not signed up for this activity")]
    NotRegistered,
}

/// Result of a successful signup or unregister.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterChange {
    pub activity: String,
    pub email: String,
    pub participants: usize,
}

/// Owns the activity mapping. Every check-then-mutate sequence runs under the
/// write lock so capacity and uniqueness hold with concurrent callers.
#[derive(Debug)]
pub struct RosterManager {
    activities: RwLock<ActivityMap>,
}

impl RosterManager {
    pub fn new(activities: ActivityMap) -> Result<Self, SeedError> {
        activities_repo::validate_activities(&activities)?;
        Ok(Self {
            activities: RwLock::new(activities),
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            activities: RwLock::new(activities_repo::default_activities()),
        }
    }

    /// Snapshot of every activity in seed order.
    pub fn list_activities(&self) -> ActivityMap {
        self.read().clone()
    }

    pub fn activity_count(&self) -> usize {
        self.read().len()
    }

    pub fn signup(&self, activity_name: &str, email: &str) -> Result<RosterChange, RosterError> {
        let mut activities = self.write();
        let Some(activity) = activities.get_mut(activity_name) else {
            warn!(activity = %activity_name, email = %email, "signup: unknown activity");
            return Err(RosterError::NotFound);
        };

        // Duplicate before capacity: a registered student re-signing a full
        // activity must hear "already signed up".
        if activity.is_registered(email) {
            warn!(activity = %activity_name, email = %email, "signup: already registered");
            return Err(RosterError::AlreadyRegistered);
        }
        if activity.is_full() {
            warn!(
                activity = %activity_name,
                email = %email,
                max = activity.max_participants,
                "signup: activity full"
            );
            return Err(RosterError::AtCapacity);
        }

        activity.participants.push(email.to_string());
        info!(
            activity = %activity_name,
            email = %email,
            participants = activity.participants.len(),
            "signup: registered"
        );
        Ok(RosterChange {
            activity: activity_name.to_string(),
            email: email.to_string(),
            participants: activity.participants.len(),
        })
    }

    pub fn unregister(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<RosterChange, RosterError> {
        let mut activities = self.write();
        let Some(activity) = activities.get_mut(activity_name) else {
            warn!(activity = %activity_name, email = %email, "unregister: unknown activity");
            return Err(RosterError::NotFound);
        };

        let Some(pos) = activity.participants.iter().position(|p| p == email) else {
            warn!(activity = %activity_name, email = %email, "unregister: not registered");
            return Err(RosterError::NotRegistered);
        };

        activity.participants.remove(pos);
        info!(
            activity = %activity_name,
            email = %email,
            participants = activity.participants.len(),
            "unregister: removed"
        );
        Ok(RosterChange {
            activity: activity_name.to_string(),
            email: email.to_string(),
            participants: activity.participants.len(),
        })
    }

    // Mutations are a single push/remove after validation, so a poisoned
    // lock still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, ActivityMap> {
        self.activities.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ActivityMap> {
        self.activities.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RosterManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}
