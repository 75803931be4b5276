use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spinwheel::{
    api, auth,
    config::ServerConfig,
    state::{load_teams_file, AppState},
};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spinwheel=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting spinwheel...");

    let config = ServerConfig::from_env();
    let auth_config = auth::AuthConfig::from_env();

    let state = Arc::new(AppState::from_config(&config, auth_config));

    // Seed the roster from the teams file
    match load_teams_file(&config.teams_file).await {
        Ok(names) => {
            let added = state.seed_teams(names).await;
            tracing::info!(
                "Loaded {} teams from {}",
                added,
                config.teams_file.display()
            );
        }
        Err(e) => {
            tracing::error!("Failed to load teams: {}", e);
            std::process::exit(1);
        }
    }

    let app = api::router(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Listening on http://{}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
