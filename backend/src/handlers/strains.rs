//! HTTP handlers for strain lookup endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::AppState;
use shared::{Sourced, StrainRecord};

/// Query parameters for strain search
#[derive(Debug, Deserialize)]
pub struct StrainSearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search strains by name substring; empty query lists everything
pub async fn search_strains(
    State(state): State<AppState>,
    Query(query): Query<StrainSearchQuery>,
) -> Json<Sourced<Vec<StrainRecord>>> {
    Json(state.strains.search(&query.q).await)
}

/// List strain categories
pub async fn list_categories(State(state): State<AppState>) -> Json<Sourced<Vec<String>>> {
    Json(state.strains.categories().await)
}

/// Input for random strain generation
#[derive(Debug, Deserialize)]
pub struct GenerateStrainInput {
    pub category: String,
}

/// Pick a random strain from a category
pub async fn generate_strain(
    State(state): State<AppState>,
    Json(input): Json<GenerateStrainInput>,
) -> Json<Sourced<Option<StrainRecord>>> {
    Json(state.strains.random_by_category(&input.category).await)
}
