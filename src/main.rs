//! Skeramos Backend
//!
//! REST backend for the Skeramos art studio & boutique hotel site: JSON
//! file-backed content collections, a cookie-authenticated admin surface,
//! translation trees, and image uploads.

mod api;
mod auth;
mod config;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::SessionCodec;
use config::Config;
use models::Collection;
use store::{ContentRepository, FileStore, TranslationStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentRepository>,
    pub translations: Arc<TranslationStore>,
    pub sessions: Arc<SessionCodec>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Skeramos backend");
    tracing::info!("Content dir: {:?}", config.data_dir);
    tracing::info!("Translations dir: {:?}", config.translations_dir);
    tracing::info!("Upload dir: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!(
        "Collections: {}",
        Collection::ALL.map(|c| c.as_str()).join(", ")
    );

    // Warn if auth is left on the built-in defaults
    if config.admin_password == config::DEFAULT_ADMIN_PASSWORD {
        tracing::warn!(
            "SKERAMOS_ADMIN_PASSWORD is not set. The admin panel accepts the default password!"
        );
    }
    if config.session_secret == config::DEFAULT_SESSION_SECRET {
        tracing::warn!(
            "SKERAMOS_SESSION_SECRET is not set. Session tokens are signed with the fallback secret!"
        );
    }

    // Initialize the file-backed stores
    let store: Arc<dyn ContentRepository> = Arc::new(FileStore::new(&config.data_dir)?);
    let translations = Arc::new(TranslationStore::new(&config.translations_dir)?);
    std::fs::create_dir_all(&config.upload_dir)?;

    let sessions = Arc::new(SessionCodec::new(config.session_secret.clone()));

    // Create application state
    let state = AppState {
        store,
        translations,
        sessions,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Content collections (GET is public, mutations check the session)
        .route("/collections/{name}", get(api::get_collection))
        .route("/collections/{name}", post(api::create_record))
        .route("/collections/{name}", put(api::update_record))
        .route("/collections/{name}", delete(api::delete_record))
        // Admin session
        .route("/auth/login", post(api::login))
        .route("/auth/logout", post(api::logout))
        .route("/auth/session", get(api::session_status))
        // Translations
        .route("/translations", get(api::get_translations))
        .route("/translations", put(api::save_translations))
        // Uploads
        .route("/upload", post(api::upload_image));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
