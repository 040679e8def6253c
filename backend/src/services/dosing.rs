//! Dosage calculation service

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use shared::{
    default_ph_range, dose_for_product, target_ec_range, to_gallons, validate_strength_percent,
    validate_volume, DecimalRange, DoseResult, FeedingType, GrowthStage, NutrientCatalog,
    UnitSystem,
};

/// Dosing service computing per-product amounts for a reservoir
#[derive(Clone)]
pub struct DosingService {
    catalog: Arc<NutrientCatalog>,
}

/// Input for a dosage calculation
#[derive(Debug, Clone, Deserialize)]
pub struct CalculationInput {
    pub brand: String,
    pub volume: Decimal,
    #[serde(default)]
    pub unit_system: UnitSystem,
    pub strength_percent: Decimal,
    pub growth_stage: GrowthStage,
    pub feeding_type: Option<FeedingType>,
    /// Explicit product selection; omitted means the brand's default mix
    /// (base nutrients plus calmag/silica/pk-boost supplements)
    pub products: Option<Vec<String>>,
}

/// Computed dosage recipe
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResult {
    pub brand: String,
    /// Reservoir volume converted to the catalog's reference unit
    pub gallons: Decimal,
    pub growth_stage: GrowthStage,
    pub feeding_type: FeedingType,
    pub doses: Vec<DoseResult>,
    pub target_ec: DecimalRange,
    pub target_ph: DecimalRange,
}

impl DosingService {
    /// Create a new DosingService instance
    pub fn new(catalog: Arc<NutrientCatalog>) -> Self {
        Self { catalog }
    }

    /// Compute doses for every selected product in the brand catalog
    ///
    /// Selected names missing from the catalog are skipped. The result is
    /// a pure function of the input and the static catalog.
    pub fn calculate(&self, input: &CalculationInput) -> AppResult<CalculationResult> {
        self.validate_input(input)?;

        let brand = self
            .catalog
            .get(&input.brand)
            .ok_or_else(|| AppError::NotFound(format!("Nutrient brand '{}'", input.brand)))?;

        let feeding_type = input.feeding_type.unwrap_or_default();
        let gallons = to_gallons(input.volume, input.unit_system);

        let selection: Vec<_> = match &input.products {
            Some(names) => names
                .iter()
                .filter_map(|name| brand.product(name))
                .collect(),
            None => brand.default_selection(),
        };

        let doses: Vec<DoseResult> = selection
            .into_iter()
            .map(|product| {
                dose_for_product(
                    product,
                    input.strength_percent,
                    input.growth_stage,
                    feeding_type,
                    gallons,
                )
            })
            .collect();

        let base_count = doses
            .iter()
            .filter(|d| d.product_type.is_base_npk())
            .count();

        tracing::debug!(
            brand = %input.brand,
            stage = %input.growth_stage,
            doses = doses.len(),
            "calculated dosage recipe"
        );

        Ok(CalculationResult {
            brand: brand.name.clone(),
            gallons,
            growth_stage: input.growth_stage,
            feeding_type,
            doses,
            target_ec: target_ec_range(base_count),
            target_ph: default_ph_range(),
        })
    }

    /// Validate calculation input fields
    fn validate_input(&self, input: &CalculationInput) -> AppResult<()> {
        if let Err(message) = validate_volume(input.volume) {
            return Err(AppError::Validation {
                field: "volume".to_string(),
                message: message.to_string(),
            });
        }

        if let Err(message) = validate_strength_percent(input.strength_percent) {
            return Err(AppError::Validation {
                field: "strength_percent".to_string(),
                message: message.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn service() -> DosingService {
        DosingService::new(Arc::new(NutrientCatalog::builtin()))
    }

    fn gh_input() -> CalculationInput {
        CalculationInput {
            brand: "General Hydroponics".to_string(),
            volume: dec("50"),
            unit_system: UnitSystem::UsGallons,
            strength_percent: dec("100"),
            growth_stage: GrowthStage::EarlyFlower,
            feeding_type: None,
            products: None,
        }
    }

    #[test]
    fn full_strength_early_flower_matches_label_rates() {
        let result = service().calculate(&gh_input()).unwrap();

        // 4.0 ml/gal x 1.0 x 1.0 x 50 gal = 200.0 ml
        let micro = result
            .doses
            .iter()
            .find(|d| d.product_name == "Flora Micro")
            .unwrap();
        assert_eq!(micro.amount, dec("200.0"));
        assert_eq!(micro.per_unit_rate, dec("4.00"));
    }

    #[test]
    fn unknown_products_are_skipped_not_errors() {
        let mut input = gh_input();
        input.products = Some(vec![
            "Flora Micro".to_string(),
            "Does Not Exist".to_string(),
        ]);

        let result = service().calculate(&input).unwrap();
        assert_eq!(result.doses.len(), 1);
        assert_eq!(result.doses[0].product_name, "Flora Micro");
    }

    #[test]
    fn unknown_brand_is_not_found() {
        let mut input = gh_input();
        input.brand = "Mystery Brand".to_string();
        assert!(matches!(
            service().calculate(&input),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn invalid_volume_is_rejected() {
        let mut input = gh_input();
        input.volume = dec("0");
        assert!(matches!(
            service().calculate(&input),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn flush_produces_all_zero_amounts() {
        let mut input = gh_input();
        input.growth_stage = GrowthStage::Flush;

        let result = service().calculate(&input).unwrap();
        assert!(!result.doses.is_empty());
        assert!(result.doses.iter().all(|d| d.amount == Decimal::ZERO));
    }

    #[test]
    fn liters_are_converted_before_dosing() {
        let mut input = gh_input();
        input.unit_system = UnitSystem::Liters;
        input.volume = dec("100");

        let result = service().calculate(&input).unwrap();
        assert_eq!(result.gallons, dec("26.4172"));
    }

    #[test]
    fn default_mix_yields_three_part_ec_target() {
        let result = service().calculate(&gh_input()).unwrap();
        assert_eq!(result.target_ec.to_string(), "1.2-1.8");
        assert_eq!(result.target_ph.to_string(), "5.8-6.2");
    }
}
