//! WebAssembly module for the Hydroponic Nutrient Management Platform
//!
//! Provides client-side computation for:
//! - Dose amounts per product
//! - Mixing order and warnings
//! - Offline input validation

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_stage(stage: &str) -> Result<GrowthStage, JsValue> {
    serde_json::from_value(serde_json::Value::String(stage.to_string()))
        .map_err(|_| JsValue::from_str(&format!("Unknown growth stage: {}", stage)))
}

fn parse_feeding(feeding: &str) -> Result<FeedingType, JsValue> {
    serde_json::from_value(serde_json::Value::String(feeding.to_string()))
        .map_err(|_| JsValue::from_str(&format!("Unknown feeding type: {}", feeding)))
}

/// Compute a dose amount in the catalog's reference unit
///
/// `stage` and `feeding` take the API's snake_case names, e.g.
/// "early_flower" and "medium".
#[wasm_bindgen]
pub fn calculate_dose(
    max_strength: f64,
    strength_percent: f64,
    stage: &str,
    feeding: &str,
    gallons: f64,
) -> Result<f64, JsValue> {
    let stage = parse_stage(stage)?;
    let feeding = parse_feeding(feeding)?;

    let amount = raw_dose(
        Decimal::from_f64_retain(max_strength).unwrap_or_default(),
        Decimal::from_f64_retain(strength_percent).unwrap_or_default(),
        stage,
        feeding,
        Decimal::from_f64_retain(gallons).unwrap_or_default(),
    );

    Ok(amount.round_dp(1).to_string().parse().unwrap_or(0.0))
}

/// Convert a volume to US gallons
#[wasm_bindgen]
pub fn volume_to_gallons(volume: f64, metric: bool) -> f64 {
    let unit = if metric {
        UnitSystem::Liters
    } else {
        UnitSystem::UsGallons
    };
    let gallons = to_gallons(
        Decimal::from_f64_retain(volume).unwrap_or_default(),
        unit,
    );
    gallons.to_string().parse().unwrap_or(0.0)
}

/// Mixing priority for a product type (lower mixes first)
#[wasm_bindgen]
pub fn product_mixing_priority(product_type: &str) -> Result<u8, JsValue> {
    let parsed: ProductType =
        serde_json::from_value(serde_json::Value::String(product_type.to_string()))
            .map_err(|_| JsValue::from_str(&format!("Unknown product type: {}", product_type)))?;
    Ok(mixing_priority(parsed))
}

/// Warning text for a product type's mixing step
#[wasm_bindgen]
pub fn product_mixing_warning(product_type: &str) -> Result<String, JsValue> {
    let parsed: ProductType =
        serde_json::from_value(serde_json::Value::String(product_type.to_string()))
            .map_err(|_| JsValue::from_str(&format!("Unknown product type: {}", product_type)))?;
    Ok(mixing_warning(parsed).to_string())
}

/// Validate a reservoir volume, returning an error message or null
#[wasm_bindgen]
pub fn check_volume(volume: f64) -> Option<String> {
    validate_volume(Decimal::from_f64_retain(volume).unwrap_or_default())
        .err()
        .map(|e| e.to_string())
}

/// Validate a strength percentage, returning an error message or null
#[wasm_bindgen]
pub fn check_strength_percent(strength: f64) -> Option<String> {
    validate_strength_percent(Decimal::from_f64_retain(strength).unwrap_or_default())
        .err()
        .map(|e| e.to_string())
}
