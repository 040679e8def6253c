//! Strain reference data

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::dosing::FeedingType;
use crate::types::DecimalRange;

/// Read-only strain metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrainRecord {
    pub name: String,
    pub category: String,
    /// THC content band, percent by weight
    pub thc_range: DecimalRange,
    /// CBD content band, percent by weight
    pub cbd_range: DecimalRange,
    pub flowering_time_weeks: u8,
    pub feeding_type: FeedingType,
    pub optimal_ec_veg: DecimalRange,
    pub optimal_ec_flower: DecimalRange,
    pub optimal_ph: DecimalRange,
}

/// Categories served when the strain service is unreachable
pub const FALLBACK_CATEGORIES: &[&str] = &[
    "Flavor Focused",
    "High THC",
    "Medical",
    "Balanced Hybrid",
    "Autoflower",
    "High Yield",
];

fn range(min_tenths: i64, max_tenths: i64) -> DecimalRange {
    DecimalRange::new(Decimal::new(min_tenths, 1), Decimal::new(max_tenths, 1))
}

fn record(
    name: &str,
    category: &str,
    thc: (i64, i64),
    cbd: (i64, i64),
    weeks: u8,
    feeding: FeedingType,
    ec_veg: (i64, i64),
    ec_flower: (i64, i64),
) -> StrainRecord {
    StrainRecord {
        name: name.to_string(),
        category: category.to_string(),
        thc_range: range(thc.0, thc.1),
        cbd_range: range(cbd.0, cbd.1),
        flowering_time_weeks: weeks,
        feeding_type: feeding,
        optimal_ec_veg: range(ec_veg.0, ec_veg.1),
        optimal_ec_flower: range(ec_flower.0, ec_flower.1),
        optimal_ph: range(58, 62),
    }
}

/// Built-in strain table used whenever the remote service is unavailable
pub fn builtin_strains() -> Vec<StrainRecord> {
    vec![
        record(
            "Northern Lights",
            "High Yield",
            (160, 210),
            (0, 10),
            7,
            FeedingType::Medium,
            (12, 16),
            (14, 18),
        ),
        record(
            "Blue Dream",
            "Balanced Hybrid",
            (170, 240),
            (0, 20),
            9,
            FeedingType::Heavy,
            (14, 18),
            (16, 20),
        ),
        record(
            "Charlotte's Web",
            "Medical",
            (0, 10),
            (120, 170),
            9,
            FeedingType::Light,
            (10, 14),
            (12, 16),
        ),
        record(
            "Gorilla Glue #4",
            "High THC",
            (240, 280),
            (0, 10),
            8,
            FeedingType::Heavy,
            (14, 18),
            (16, 20),
        ),
        record(
            "Zkittlez",
            "Flavor Focused",
            (150, 200),
            (0, 10),
            8,
            FeedingType::Medium,
            (12, 16),
            (14, 18),
        ),
    ]
}
