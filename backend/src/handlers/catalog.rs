//! HTTP handlers for the nutrient catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::AppState;
use shared::Brand;

#[derive(Serialize)]
pub struct CatalogResponse {
    pub brands: Vec<String>,
}

/// List available nutrient brand names
pub async fn list_brands(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        brands: state
            .catalog
            .brand_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect(),
    })
}

/// Get a brand's full product catalog
pub async fn get_brand(
    State(state): State<AppState>,
    Path(brand): Path<String>,
) -> AppResult<Json<Brand>> {
    let brand = state
        .catalog
        .get(&brand)
        .ok_or_else(|| AppError::NotFound(format!("Nutrient brand '{}'", brand)))?;
    Ok(Json(brand.clone()))
}
