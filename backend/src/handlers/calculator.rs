//! HTTP handlers for dosage calculation and mixing instructions

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::dosing::{CalculationInput, CalculationResult, DosingService};
use crate::services::mixing::build_mixing_steps;
use crate::AppState;
use shared::{DoseResult, MixStep};

/// Compute a dosage recipe for the given reservoir and growth stage
pub async fn calculate(
    State(state): State<AppState>,
    Json(input): Json<CalculationInput>,
) -> AppResult<Json<CalculationResult>> {
    let service = DosingService::new(state.catalog.clone());
    let result = service.calculate(&input)?;
    Ok(Json(result))
}

/// Input for building a mixing protocol from precomputed doses
#[derive(Debug, Deserialize)]
pub struct InstructionsRequest {
    pub doses: Vec<DoseResult>,
    pub gallons: Option<Decimal>,
}

/// Build the ordered mixing protocol for a dose list
pub async fn build_instructions(
    Json(input): Json<InstructionsRequest>,
) -> Json<Vec<MixStep>> {
    Json(build_mixing_steps(&input.doses, input.gallons))
}
