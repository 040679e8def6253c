//! Saved recipe models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::dosing::{DoseResult, FeedingType, GrowthStage};
use crate::models::mixing::MixStep;
use crate::types::{DecimalRange, UnitSystem};

/// A saved feeding recipe
///
/// `nutrients` keeps the doses in catalog order; names are unique within
/// the list, so it behaves as an ordered map keyed by product name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub volume: Decimal,
    pub unit_system: UnitSystem,
    pub strength_percent: Decimal,
    pub growth_stage: GrowthStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feeding_type: Option<FeedingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strain: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub target_ph: DecimalRange,
    pub target_ec: DecimalRange,
    pub nutrients: Vec<DoseResult>,
    pub mixing_instructions: Vec<MixStep>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicated_from: Option<String>,
    #[serde(default)]
    pub results: Vec<GrowResult>,
}

impl Recipe {
    pub fn dose(&self, product_name: &str) -> Option<&DoseResult> {
        self.nutrients.iter().find(|d| d.product_name == product_name)
    }
}

/// A grow observation recorded against a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowResult {
    pub recorded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured_ec: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured_ph: Option<Decimal>,
    pub notes: String,
}

/// Recipe export envelope, a recipe plus the export timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeExport {
    pub exported_at: DateTime<Utc>,
    #[serde(flatten)]
    pub recipe: Recipe,
}
