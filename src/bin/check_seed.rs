use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mergington_activities::database::activities_repo;

fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // First argument wins over ACTIVITIES_FILE; neither means the built-in set.
    let path: Option<PathBuf> = env::args()
        .nth(1)
        .or_else(|| env::var("ACTIVITIES_FILE").ok())
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    match activities_repo::load_seed(path.as_deref()) {
        Ok(activities) => {
            for (name, activity) in &activities {
                info!(
                    activity = %name,
                    signed_up = activity.participants.len(),
                    max = activity.max_participants,
                    spots_left = activity.spots_left(),
                    schedule = %activity.schedule,
                    "seed activity"
                );
            }
            info!(activities = activities.len(), seed = ?path, "seed ok");
        }
        Err(e) => {
            error!(seed = ?path, "seed check failed: {}", e);
            std::process::exit(1);
        }
    }
}
