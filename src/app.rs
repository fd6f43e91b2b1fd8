use axum::{Extension, Router};
use chrono::Utc;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::companion::content::ContentGenerator;
use crate::companion::{OpenRouterGenerator, SparrowCompanion, TextGenerator};
use crate::config::{Config, DEFAULT_LOG_FILTER};
use crate::forum::ForumStore;
use crate::routes::create_routes;

/// Parse filter directives, falling back to the service defaults when invalid
pub fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Initialize tracing and logging for the application
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub companion: SparrowCompanion,
    pub content: ContentGenerator,
    pub forum: Arc<ForumStore>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, forum: ForumStore) -> Self {
        Self {
            companion: SparrowCompanion::new(generator.clone()),
            content: ContentGenerator::new(generator),
            forum: Arc::new(forum),
        }
    }
}

/// Build the router around an already assembled state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Create and configure the Axum application with all routes and middleware
pub async fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    info!("Initializing application router");

    if config.openrouter_api_key.is_none() {
        warn!("OPENROUTER_API_KEY not set; Sparrow will answer with failure messages");
    }
    let generator = Arc::new(OpenRouterGenerator::new(
        config.openrouter_api_key.clone(),
        config.model.clone(),
    ));
    info!("Using model {}", generator.model());

    let forum = ForumStore::seeded(Utc::now());
    info!("Forum seeded with {} categories", forum.categories().len());

    Ok(create_router(AppState::new(generator, forum)))
}
