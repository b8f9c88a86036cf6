use std::sync::Arc;
use tastemap_web::config::ServerConfig;
use tastemap_web::create_router;
use tastemap_web::state::AppState;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = Arc::new(AppState::new(&config));
    let app = create_router(app_state);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };

    info!(
        "Server running on http://{} (spotify api: {})",
        config.bind_addr, config.spotify_api_base
    );

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
