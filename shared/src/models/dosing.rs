//! Dosage calculation: stage/feeding multipliers and the dose formula

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::catalog::{DoseUnit, Npk, Product, ProductType};
use crate::types::DecimalRange;

/// Plant lifecycle phase used to scale nutrient strength
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Seedling,
    EarlyVeg,
    LateVeg,
    PreFlower,
    EarlyFlower,
    MidFlower,
    LateFlower,
    Flush,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 8] = [
        GrowthStage::Seedling,
        GrowthStage::EarlyVeg,
        GrowthStage::LateVeg,
        GrowthStage::PreFlower,
        GrowthStage::EarlyFlower,
        GrowthStage::MidFlower,
        GrowthStage::LateFlower,
        GrowthStage::Flush,
    ];

    /// Strength multiplier applied to every dose in this stage
    pub fn multiplier(&self) -> Decimal {
        match self {
            GrowthStage::Seedling => Decimal::new(25, 2),    // 0.25
            GrowthStage::EarlyVeg => Decimal::new(50, 2),    // 0.50
            GrowthStage::LateVeg => Decimal::new(75, 2),     // 0.75
            GrowthStage::PreFlower => Decimal::new(80, 2),   // 0.80
            GrowthStage::EarlyFlower => Decimal::ONE,
            GrowthStage::MidFlower => Decimal::ONE,
            GrowthStage::LateFlower => Decimal::new(75, 2),  // 0.75
            GrowthStage::Flush => Decimal::ZERO,
        }
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GrowthStage::Seedling => "Seedling",
            GrowthStage::EarlyVeg => "Early Veg",
            GrowthStage::LateVeg => "Late Veg",
            GrowthStage::PreFlower => "Pre-Flower",
            GrowthStage::EarlyFlower => "Early Flower",
            GrowthStage::MidFlower => "Mid Flower",
            GrowthStage::LateFlower => "Late Flower",
            GrowthStage::Flush => "Flush",
        };
        write!(f, "{}", label)
    }
}

/// How aggressively a strain feeds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeedingType {
    Light,
    #[default]
    Medium,
    Heavy,
}

impl FeedingType {
    pub fn multiplier(&self) -> Decimal {
        match self {
            FeedingType::Light => Decimal::new(8, 1),  // 0.8
            FeedingType::Medium => Decimal::ONE,
            FeedingType::Heavy => Decimal::new(12, 1), // 1.2
        }
    }
}

impl std::fmt::Display for FeedingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FeedingType::Light => "Light",
            FeedingType::Medium => "Medium",
            FeedingType::Heavy => "Heavy",
        };
        write!(f, "{}", label)
    }
}

/// Computed dose for one product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseResult {
    pub product_name: String,
    /// Total amount for the reservoir, rounded to one decimal
    pub amount: Decimal,
    pub unit: DoseUnit,
    pub product_type: ProductType,
    /// Effective rate per gallon at the requested strength, rounded to two
    /// decimals
    pub per_unit_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npk: Option<Npk>,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when_to_use: Option<String>,
}

/// Unrounded dose amount:
/// max_strength x (strength/100) x stage multiplier x feeding multiplier x gallons
pub fn raw_dose(
    max_strength: Decimal,
    strength_percent: Decimal,
    stage: GrowthStage,
    feeding: FeedingType,
    gallons: Decimal,
) -> Decimal {
    let strength_fraction = strength_percent / Decimal::ONE_HUNDRED;
    max_strength * strength_fraction * stage.multiplier() * feeding.multiplier() * gallons
}

/// Compute the dose for a catalog product
pub fn dose_for_product(
    product: &Product,
    strength_percent: Decimal,
    stage: GrowthStage,
    feeding: FeedingType,
    gallons: Decimal,
) -> DoseResult {
    let amount = raw_dose(
        product.max_strength,
        strength_percent,
        stage,
        feeding,
        gallons,
    );
    let rate = raw_dose(
        product.max_strength,
        strength_percent,
        stage,
        feeding,
        Decimal::ONE,
    );

    DoseResult {
        product_name: product.name.clone(),
        amount: amount.round_dp(1),
        unit: product.unit,
        product_type: product.product_type,
        per_unit_rate: rate.round_dp(2),
        npk: product.npk,
        notes: product.description.clone(),
        when_to_use: product.when_to_use.clone(),
    }
}

/// Target EC band derived from how many base NPK nutrients are in the mix
pub fn target_ec_range(base_nutrient_count: usize) -> DecimalRange {
    if base_nutrient_count <= 2 {
        DecimalRange::new(Decimal::new(10, 1), Decimal::new(14, 1)) // 1.0-1.4
    } else if base_nutrient_count == 3 {
        DecimalRange::new(Decimal::new(12, 1), Decimal::new(18, 1)) // 1.2-1.8
    } else {
        DecimalRange::new(Decimal::new(14, 1), Decimal::new(20, 1)) // 1.4-2.0
    }
}

/// Default solution pH band for hydroponic feeding
pub fn default_ph_range() -> DecimalRange {
    DecimalRange::new(Decimal::new(58, 1), Decimal::new(62, 1)) // 5.8-6.2
}
