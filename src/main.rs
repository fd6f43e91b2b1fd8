use sparrow_svc::app::{create_app, init_tracing};
use sparrow_svc::config::{Config, DEFAULT_LOG_FILTER};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Load configuration, then initialize tracing/logging from it
    let config = Config::from_env();
    init_tracing(
        config
            .as_ref()
            .map(|config| config.log_level.as_str())
            .unwrap_or(DEFAULT_LOG_FILTER),
    );

    info!("Starting Sparrow service...");

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    info!("Configuration loaded: {:?}", config);

    // Create the application
    let app = match create_app(&config).await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to create app: {}", e);
            std::process::exit(1);
        }
    };

    // Create TCP listener
    let listener = match tokio::net::TcpListener::bind(&config.bind_address()).await {
        Ok(listener) => {
            info!("Server running on {}", config.server_url());
            info!("Health check: GET /health");
            info!("Companion endpoint: POST /api/sparrow");
            info!("Content endpoint: POST /api/content/generate");
            info!("Membership endpoint: POST /api/membership/validate");
            info!("Forum endpoints: GET /api/forums[/{{slug}}[/threads/{{id}}]]");
            listener
        }
        Err(e) => {
            error!("Failed to bind to {}: {}", config.bind_address(), e);
            std::process::exit(1);
        }
    };

    // Start the server
    info!("Server starting...");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    } else {
        info!("Server shutdown gracefully");
    }
}
