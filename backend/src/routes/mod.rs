//! Route definitions for the Hydroponic Nutrient Management Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Nutrient catalog
        .nest("/catalog", catalog_routes())
        // Dosage calculation
        .route("/calculate", post(handlers::calculate))
        .route("/instructions", post(handlers::build_instructions))
        // Recipe management
        .nest("/recipes", recipe_routes())
        // Strain lookup
        .nest("/strains", strain_routes())
}

/// Nutrient catalog routes
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_brands))
        .route("/:brand", get(handlers::get_brand))
}

/// Recipe management routes
fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_recipes).post(handlers::save_recipe))
        .route("/import", post(handlers::import_recipe))
        .route(
            "/:name",
            get(handlers::get_recipe).delete(handlers::delete_recipe),
        )
        .route("/:name/duplicate", post(handlers::duplicate_recipe))
        .route("/:name/export", get(handlers::export_recipe))
        .route("/:name/results", post(handlers::record_recipe_result))
        .route("/:name/instructions", get(handlers::get_recipe_instructions))
}

/// Strain lookup routes
fn strain_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(handlers::search_strains))
        .route("/categories", get(handlers::list_categories))
        .route("/generate", post(handlers::generate_strain))
}
