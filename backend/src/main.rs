//! Hydroponic Nutrient Management Platform - Backend Server
//!
//! A nutrient-dosing service for hydroponic growers: per-brand dosage
//! calculation, mixing protocols, strain lookup, and saved feeding recipes.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shared::NutrientCatalog;

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use services::recipe::{new_recipe_store, SharedRecipeStore};
use services::strain::StrainService;

/// Application state shared across handlers
///
/// Created once at server start and dropped at shutdown; the recipe store
/// and strain cache live exactly as long as the session.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<NutrientCatalog>,
    pub recipes: SharedRecipeStore,
    pub strains: StrainService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hnm_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Hydroponic Nutrient Management Server");
    tracing::info!("Environment: {}", config.environment);

    let catalog = Arc::new(NutrientCatalog::builtin());
    tracing::info!("Loaded {} nutrient brands", catalog.brands().len());

    let strains = StrainService::from_config(&config.strain_api);
    if strains.is_remote_configured() {
        tracing::info!("Strain service: {}", config.strain_api.base_url);
    } else {
        tracing::info!("Strain service not configured, using built-in strain table");
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog,
        recipes: new_recipe_store(),
        strains,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Hydroponic Nutrient Management Platform API v1.0"
}
