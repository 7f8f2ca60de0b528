use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use mergington_activities::config::Config;
use mergington_activities::database::activities_repo;
use mergington_activities::services::roster_service::RosterManager;
use mergington_activities::web::{self, state::AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let roster = match activities_repo::load_seed(config.activities_file.as_deref())
        .and_then(RosterManager::new)
    {
        Ok(roster) => roster,
        Err(e) => {
            error!("Cannot load activities: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        activities = roster.activity_count(),
        seed = ?config.activities_file,
        "roster loaded"
    );

    let app = web::app(AppState::new(roster), &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr()).await {
        Ok(l) => l,
        Err(e) => {
            let Some(fallback) = config.fallback_bind_addr() else {
                error!("Cannot bind {}: {}", config.bind_addr(), e);
                std::process::exit(1);
            };
            warn!(
                "Cannot bind {}: {}. Trying fallback {}",
                config.bind_addr(),
                e,
                fallback
            );
            match tokio::net::TcpListener::bind(&fallback).await {
                Ok(l) => l,
                Err(e) => {
                    error!("Cannot bind fallback {}: {}", fallback, e);
                    std::process::exit(1);
                }
            }
        }
    };

    match listener.local_addr() {
        Ok(addr) => info!("Serving on http://{}{}", addr, web::INDEX_PATH),
        Err(e) => warn!("Listener has no local address: {}", e),
    }

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}
