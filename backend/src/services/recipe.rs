//! Recipe store service
//!
//! Recipes live in a session-scoped in-memory map owned by the application
//! state. There are no persistence guarantees: the store is created at
//! server start and discarded at shutdown.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::dosing::{CalculationInput, DosingService};
use crate::services::mixing::build_mixing_steps;
use shared::{
    validate_ec_range, validate_ph_range, validate_recipe_name, DecimalRange, GrowResult, Recipe,
    RecipeExport,
};

/// Shared in-memory recipe map keyed by unique recipe name
pub type SharedRecipeStore = Arc<RwLock<HashMap<String, Recipe>>>;

pub fn new_recipe_store() -> SharedRecipeStore {
    Arc::new(RwLock::new(HashMap::new()))
}

/// Recipe service for saving, loading, and duplicating feeding recipes
#[derive(Clone)]
pub struct RecipeService {
    store: SharedRecipeStore,
    dosing: DosingService,
}

/// Input for saving a recipe
#[derive(Debug, Deserialize)]
pub struct SaveRecipeInput {
    pub name: String,
    #[serde(flatten)]
    pub calculation: CalculationInput,
    pub strain: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub target_ph: Option<DecimalRange>,
    pub target_ec: Option<DecimalRange>,
}

/// Input for importing a previously exported recipe
#[derive(Debug, Deserialize)]
pub struct ImportRecipeInput {
    pub name: String,
    pub recipe: Recipe,
}

/// Input for recording a grow observation against a recipe
#[derive(Debug, Deserialize)]
pub struct RecordResultInput {
    pub measured_ec: Option<Decimal>,
    pub measured_ph: Option<Decimal>,
    #[serde(default)]
    pub notes: String,
}

/// Recipe list entry
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub name: String,
    pub brand: String,
    pub growth_stage: String,
    pub version: u32,
    pub last_modified: chrono::DateTime<Utc>,
}

impl RecipeService {
    /// Create a new RecipeService instance
    pub fn new(store: SharedRecipeStore, dosing: DosingService) -> Self {
        Self { store, dosing }
    }

    /// Save a recipe, computing doses and mixing instructions
    ///
    /// Saving under an existing name overwrites the stored recipe and bumps
    /// its version; it never creates a second entry.
    pub fn save(&self, input: SaveRecipeInput) -> AppResult<Recipe> {
        let name = input.name.trim().to_string();
        if let Err(message) = validate_recipe_name(&name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: message.to_string(),
            });
        }

        let calculation = self.dosing.calculate(&input.calculation)?;

        let target_ph = match input.target_ph {
            Some(range) => {
                validate_ph_range(&range).map_err(|m| AppError::Validation {
                    field: "target_ph".to_string(),
                    message: m.to_string(),
                })?;
                range
            }
            None => calculation.target_ph,
        };
        let target_ec = match input.target_ec {
            Some(range) => {
                validate_ec_range(&range).map_err(|m| AppError::Validation {
                    field: "target_ec".to_string(),
                    message: m.to_string(),
                })?;
                range
            }
            None => calculation.target_ec,
        };

        let mixing_instructions =
            build_mixing_steps(&calculation.doses, Some(calculation.gallons));
        let now = Utc::now();

        let mut store = self
            .store
            .write()
            .map_err(|_| AppError::Internal("Recipe store lock poisoned".to_string()))?;

        let previous = store.get(&name);
        let recipe = Recipe {
            id: previous.map(|p| p.id).unwrap_or_else(Uuid::new_v4),
            name: name.clone(),
            brand: calculation.brand,
            volume: input.calculation.volume,
            unit_system: input.calculation.unit_system,
            strength_percent: input.calculation.strength_percent,
            growth_stage: input.calculation.growth_stage,
            feeding_type: input.calculation.feeding_type,
            strain: input.strain,
            tags: input.tags,
            target_ph,
            target_ec,
            nutrients: calculation.doses,
            mixing_instructions,
            created_at: previous.map(|p| p.created_at).unwrap_or(now),
            last_modified: now,
            version: previous.map(|p| p.version + 1).unwrap_or(1),
            duplicated_from: previous.and_then(|p| p.duplicated_from.clone()),
            results: previous.map(|p| p.results.clone()).unwrap_or_default(),
        };

        store.insert(name.clone(), recipe.clone());
        tracing::info!(recipe = %name, version = recipe.version, "recipe saved");

        Ok(recipe)
    }

    /// Get a recipe by name
    pub fn get(&self, name: &str) -> AppResult<Recipe> {
        let store = self
            .store
            .read()
            .map_err(|_| AppError::Internal("Recipe store lock poisoned".to_string()))?;
        store
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Recipe '{}'", name)))
    }

    /// List saved recipes, newest first
    pub fn list(&self) -> AppResult<Vec<RecipeSummary>> {
        let store = self
            .store
            .read()
            .map_err(|_| AppError::Internal("Recipe store lock poisoned".to_string()))?;

        let mut summaries: Vec<RecipeSummary> = store
            .values()
            .map(|r| RecipeSummary {
                name: r.name.clone(),
                brand: r.brand.clone(),
                growth_stage: r.growth_stage.to_string(),
                version: r.version,
                last_modified: r.last_modified,
            })
            .collect();
        summaries.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

        Ok(summaries)
    }

    /// Delete a recipe by name
    pub fn delete(&self, name: &str) -> AppResult<()> {
        let mut store = self
            .store
            .write()
            .map_err(|_| AppError::Internal("Recipe store lock poisoned".to_string()))?;
        store
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Recipe '{}'", name)))
    }

    /// Duplicate a recipe under a new name
    ///
    /// The copy starts fresh: version 1, empty results history.
    pub fn duplicate(&self, name: &str, new_name: &str) -> AppResult<Recipe> {
        let new_name = new_name.trim().to_string();
        if let Err(message) = validate_recipe_name(&new_name) {
            return Err(AppError::Validation {
                field: "new_name".to_string(),
                message: message.to_string(),
            });
        }

        let mut store = self
            .store
            .write()
            .map_err(|_| AppError::Internal("Recipe store lock poisoned".to_string()))?;

        if store.contains_key(&new_name) {
            return Err(AppError::DuplicateEntry(new_name));
        }

        let source = store
            .get(name)
            .ok_or_else(|| AppError::NotFound(format!("Recipe '{}'", name)))?;

        let now = Utc::now();
        let mut copy = source.clone();
        copy.id = Uuid::new_v4();
        copy.name = new_name.clone();
        copy.duplicated_from = Some(name.to_string());
        copy.created_at = now;
        copy.last_modified = now;
        copy.version = 1;
        copy.results = Vec::new();

        store.insert(new_name.clone(), copy.clone());
        tracing::info!(source = %name, copy = %new_name, "recipe duplicated");

        Ok(copy)
    }

    /// Export a recipe with an export timestamp
    pub fn export(&self, name: &str) -> AppResult<RecipeExport> {
        let recipe = self.get(name)?;
        Ok(RecipeExport {
            exported_at: Utc::now(),
            recipe,
        })
    }

    /// Import a recipe from its exported form under the given name
    pub fn import(&self, input: ImportRecipeInput) -> AppResult<Recipe> {
        let name = input.name.trim().to_string();
        if let Err(message) = validate_recipe_name(&name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: message.to_string(),
            });
        }

        let now = Utc::now();
        let mut store = self
            .store
            .write()
            .map_err(|_| AppError::Internal("Recipe store lock poisoned".to_string()))?;

        let previous = store.get(&name);
        let mut recipe = input.recipe;
        recipe.name = name.clone();
        recipe.last_modified = now;
        recipe.version = match previous {
            Some(p) => p.version + 1,
            None => recipe.version.max(1),
        };
        if let Some(p) = previous {
            recipe.id = p.id;
            recipe.created_at = p.created_at;
        }

        store.insert(name.clone(), recipe.clone());
        tracing::info!(recipe = %name, "recipe imported");

        Ok(recipe)
    }

    /// Append a grow observation to a recipe's results history
    pub fn add_result(&self, name: &str, input: RecordResultInput) -> AppResult<Recipe> {
        let mut store = self
            .store
            .write()
            .map_err(|_| AppError::Internal("Recipe store lock poisoned".to_string()))?;

        let recipe = store
            .get_mut(name)
            .ok_or_else(|| AppError::NotFound(format!("Recipe '{}'", name)))?;

        recipe.results.push(GrowResult {
            recorded_at: Utc::now(),
            measured_ec: input.measured_ec,
            measured_ph: input.measured_ph,
            notes: input.notes,
        });
        recipe.last_modified = Utc::now();

        Ok(recipe.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{GrowthStage, NutrientCatalog, UnitSystem};
    use std::sync::Arc;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn service() -> RecipeService {
        let dosing = DosingService::new(Arc::new(NutrientCatalog::builtin()));
        RecipeService::new(new_recipe_store(), dosing)
    }

    fn save_input(name: &str) -> SaveRecipeInput {
        SaveRecipeInput {
            name: name.to_string(),
            calculation: CalculationInput {
                brand: "General Hydroponics".to_string(),
                volume: dec("50"),
                unit_system: UnitSystem::UsGallons,
                strength_percent: dec("100"),
                growth_stage: GrowthStage::EarlyFlower,
                feeding_type: None,
                products: None,
            },
            strain: Some("Blue Dream".to_string()),
            tags: vec!["flower".to_string()],
            target_ph: None,
            target_ec: None,
        }
    }

    #[test]
    fn save_then_get_returns_equivalent_recipe() {
        let service = service();
        let saved = service.save(save_input("Week 5")).unwrap();
        let loaded = service.get("Week 5").unwrap();

        assert_eq!(loaded.id, saved.id);
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.nutrients.len(), saved.nutrients.len());
        assert!(!loaded.mixing_instructions.is_empty());
    }

    #[test]
    fn resaving_overwrites_and_bumps_version() {
        let service = service();
        let first = service.save(save_input("Week 5")).unwrap();
        let second = service.save(save_input("Week 5")).unwrap();

        assert_eq!(second.version, 2);
        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn get_missing_recipe_is_not_found() {
        assert!(matches!(
            service().get("nope"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn duplicate_resets_version_and_results() {
        let service = service();
        service.save(save_input("Original")).unwrap();
        service.save(save_input("Original")).unwrap();
        service
            .add_result(
                "Original",
                RecordResultInput {
                    measured_ec: Some(dec("1.5")),
                    measured_ph: Some(dec("5.9")),
                    notes: "healthy".to_string(),
                },
            )
            .unwrap();

        let copy = service.duplicate("Original", "Copy").unwrap();
        assert_eq!(copy.version, 1);
        assert!(copy.results.is_empty());
        assert_eq!(copy.duplicated_from.as_deref(), Some("Original"));

        let original = service.get("Original").unwrap();
        assert_eq!(original.version, 2);
        assert_eq!(original.results.len(), 1);
    }

    #[test]
    fn duplicate_onto_existing_name_conflicts() {
        let service = service();
        service.save(save_input("A")).unwrap();
        service.save(save_input("B")).unwrap();
        assert!(matches!(
            service.duplicate("A", "B"),
            Err(AppError::DuplicateEntry(_))
        ));
    }

    #[test]
    fn export_then_import_round_trips() {
        let service = service();
        service.save(save_input("Export Me")).unwrap();
        let export = service.export("Export Me").unwrap();

        let imported = service
            .import(ImportRecipeInput {
                name: "Imported".to_string(),
                recipe: export.recipe,
            })
            .unwrap();

        assert_eq!(imported.name, "Imported");
        assert_eq!(imported.version, 1);
        let loaded = service.get("Imported").unwrap();
        assert_eq!(loaded.nutrients.len(), imported.nutrients.len());
    }

    #[test]
    fn delete_removes_the_entry() {
        let service = service();
        service.save(save_input("Gone Soon")).unwrap();
        service.delete("Gone Soon").unwrap();
        assert!(matches!(
            service.get("Gone Soon"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete("Gone Soon"),
            Err(AppError::NotFound(_))
        ));
    }
}
