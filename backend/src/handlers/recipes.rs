//! HTTP handlers for recipe management endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::dosing::DosingService;
use crate::services::recipe::{
    ImportRecipeInput, RecipeService, RecipeSummary, RecordResultInput, SaveRecipeInput,
};
use crate::AppState;
use shared::{MixStep, Recipe, RecipeExport};

fn recipe_service(state: &AppState) -> RecipeService {
    let dosing = DosingService::new(state.catalog.clone());
    RecipeService::new(state.recipes.clone(), dosing)
}

/// List saved recipes
pub async fn list_recipes(State(state): State<AppState>) -> AppResult<Json<Vec<RecipeSummary>>> {
    let recipes = recipe_service(&state).list()?;
    Ok(Json(recipes))
}

/// Save a recipe (overwrites and bumps version on name collision)
pub async fn save_recipe(
    State(state): State<AppState>,
    Json(input): Json<SaveRecipeInput>,
) -> AppResult<Json<Recipe>> {
    let recipe = recipe_service(&state).save(input)?;
    Ok(Json(recipe))
}

/// Get a recipe by name
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Recipe>> {
    let recipe = recipe_service(&state).get(&name)?;
    Ok(Json(recipe))
}

/// Delete a recipe by name
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<()>> {
    recipe_service(&state).delete(&name)?;
    Ok(Json(()))
}

/// Input for duplicating a recipe
#[derive(Debug, Deserialize)]
pub struct DuplicateRecipeInput {
    pub new_name: String,
}

/// Duplicate a recipe under a new name
pub async fn duplicate_recipe(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<DuplicateRecipeInput>,
) -> AppResult<Json<Recipe>> {
    let recipe = recipe_service(&state).duplicate(&name, &input.new_name)?;
    Ok(Json(recipe))
}

/// Export a recipe as JSON with an export timestamp
pub async fn export_recipe(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<RecipeExport>> {
    let export = recipe_service(&state).export(&name)?;
    Ok(Json(export))
}

/// Import a previously exported recipe under a new name
pub async fn import_recipe(
    State(state): State<AppState>,
    Json(input): Json<ImportRecipeInput>,
) -> AppResult<Json<Recipe>> {
    let recipe = recipe_service(&state).import(input)?;
    Ok(Json(recipe))
}

/// Record a grow observation against a recipe
pub async fn record_recipe_result(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<RecordResultInput>,
) -> AppResult<Json<Recipe>> {
    let recipe = recipe_service(&state).add_result(&name, input)?;
    Ok(Json(recipe))
}

/// Get the stored mixing protocol for a recipe
pub async fn get_recipe_instructions(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<MixStep>>> {
    let recipe = recipe_service(&state).get(&name)?;
    Ok(Json(recipe.mixing_instructions))
}
