//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit system for reservoir volume input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    UsGallons,
    Liters,
}

impl UnitSystem {
    pub fn code(&self) -> &'static str {
        match self {
            UnitSystem::UsGallons => "gal",
            UnitSystem::Liters => "L",
        }
    }
}

/// Litres in one US gallon
pub fn liters_per_gallon() -> Decimal {
    Decimal::new(378541, 5) // 3.78541
}

/// US gallons in one litre
pub fn gallons_per_liter() -> Decimal {
    Decimal::new(264172, 6) // 0.264172
}

/// Convert a reservoir volume to US gallons, the catalog's reference unit
pub fn to_gallons(volume: Decimal, unit_system: UnitSystem) -> Decimal {
    match unit_system {
        UnitSystem::UsGallons => volume,
        UnitSystem::Liters => volume * gallons_per_liter(),
    }
}

/// Closed numeric band, used for EC/pH targets and strain potency ranges
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DecimalRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl DecimalRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

impl std::fmt::Display for DecimalRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Where a lookup answer came from: the remote strain service or the
/// built-in offline table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Remote,
    Fallback,
}

/// A value tagged with its data provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sourced<T> {
    pub source: DataSource,
    pub data: T,
}

impl<T> Sourced<T> {
    pub fn remote(data: T) -> Self {
        Self {
            source: DataSource::Remote,
            data,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            source: DataSource::Fallback,
            data,
        }
    }
}
