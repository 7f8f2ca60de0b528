use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::models::{ActivityMap, ActivityRecord};

// name, description, schedule, max_participants, participants
type SeedRow = (&'static str, &'static str, &'static str, usize, &'static [&'static str]);

const DEFAULT_ACTIVITIES: &[SeedRow] = &[
    (
        "Chess Club",
        "Learn strategies and compete in chess tournaments",
        "Fridays, 3:30 PM - 5:00 PM",
        12,
        &["michael@mergington.edu", "daniel@mergington.edu"],
    ),
    (
        "Programming Class",
        "Learn programming fundamentals and build software projects",
        "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        20,
        &["emma@mergington.edu", "sophia@mergington.edu"],
    ),
    (
        "Gym Class",
        "Physical education and sports activities",
        "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        30,
        &["john@mergington.edu", "olivia@mergington.edu"],
    ),
    (
        "Basketball Team",
        "Competitive basketball team training and games",
        "Mondays and Wednesdays, 4:00 PM - 6:00 PM",
        15,
        &["alex@mergington.edu", "jordan@mergington.edu"],
    ),
    (
        "Soccer Club",
        "Soccer skills development and friendly matches",
        "Tuesdays and Thursdays, 3:30 PM - 5:00 PM",
        25,
        &["mia@mergington.edu", "carlos@mergington.edu"],
    ),
    (
        "Drama Club",
        "Acting, script writing, and theatrical productions",
        "Wednesdays, 3:30 PM - 5:30 PM",
        18,
        &["isabella@mergington.edu", "ethan@mergington.edu"],
    ),
    (
        "Art Studio",
        "Painting, drawing, and mixed media art projects",
        "Fridays, 2:30 PM - 4:30 PM",
        16,
        &["ava@mergington.edu", "noah@mergington.edu"],
    ),
    (
        "Debate Team",
        "Competitive debate and public speaking skills",
        "Tuesdays, 4:00 PM - 5:30 PM",
        14,
        &["lucas@mergington.edu", "zoe@mergington.edu"],
    ),
    (
        "Science Olympiad",
        "STEM competitions and advanced science projects",
        "Thursdays, 3:30 PM - 5:00 PM",
        20,
        &["mason@mergington.edu", "lily@mergington.edu"],
    ),
];

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("could not read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse seed file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("activity '{0}' is defined more than once")]
    DuplicateActivity(String),
    #[error("activity name must not be empty")]
    EmptyName,
    #[error("activity '{0}' must allow at least one participant")]
    ZeroCapacity(String),
    #[error("activity '{activity}' has {participants} participants but room for {max}")]
    OverCapacity {
        activity: String,
        participants: usize,
        max: usize,
    },
    #[error("activity '{activity}' lists {email} more than once")]
    DuplicateParticipant { activity: String, email: String },
}

/// The built-in Mergington activity set.
pub fn default_activities() -> ActivityMap {
    DEFAULT_ACTIVITIES
        .iter()
        .map(|(name, description, schedule, max, participants)| {
            (
                name.to_string(),
                ActivityRecord {
                    description: description.to_string(),
                    schedule: schedule.to_string(),
                    max_participants: *max,
                    participants: participants.iter().map(|p| p.to_string()).collect(),
                },
            )
        })
        .collect()
}

// Every `name -> record` entry of the seed object, in file order and with
// repeated names kept, so they can be reported instead of overwritten.
struct SeedEntries(Vec<(String, ActivityRecord)>);

impl<'de> Deserialize<'de> for SeedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SeedEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of activity name to activity record")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SeedEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, ActivityRecord>()? {
                    entries.push(entry);
                }
                Ok(SeedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Reads a JSON object of `name -> record`, keeping the file's key order.
/// A name that appears twice is an error.
pub fn load_activities_file(path: impl AsRef<Path>) -> Result<ActivityMap, SeedError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let SeedEntries(entries) =
        serde_json::from_str::<SeedEntries>(&raw).map_err(|source| SeedError::Parse {
            path: path.display().to_string(),
            source,
        })?;

    let mut activities = ActivityMap::with_capacity(entries.len());
    for (name, record) in entries {
        if activities.contains_key(&name) {
            return Err(SeedError::DuplicateActivity(name));
        }
        activities.insert(name, record);
    }
    Ok(activities)
}

/// Loads `path` when given, otherwise the defaults. The result is validated.
pub fn load_seed(path: Option<&Path>) -> Result<ActivityMap, SeedError> {
    let activities = match path {
        Some(p) => load_activities_file(p)?,
        None => default_activities(),
    };
    validate_activities(&activities)?;
    Ok(activities)
}

pub fn validate_activities(activities: &ActivityMap) -> Result<(), SeedError> {
    for (name, record) in activities {
        if name.trim().is_empty() {
            return Err(SeedError::EmptyName);
        }
        if record.max_participants == 0 {
            return Err(SeedError::ZeroCapacity(name.clone()));
        }
        if record.participants.len() > record.max_participants {
            return Err(SeedError::OverCapacity {
                activity: name.clone(),
                participants: record.participants.len(),
                max: record.max_participants,
            });
        }
        let mut seen = HashSet::new();
        for email in &record.participants {
            if !seen.insert(email.as_str()) {
                return Err(SeedError::DuplicateParticipant {
                    activity: name.clone(),
                    email: email.clone(),
                });
            }
        }
    }
    Ok(())
}
