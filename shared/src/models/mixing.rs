//! Mixing order rules and per-type warning text

use serde::{Deserialize, Serialize};

use crate::models::catalog::ProductType;

/// One step of the mixing protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixStep {
    pub order: u32,
    pub title: String,
    pub action: String,
    pub detail: String,
    pub tips: Vec<String>,
    pub warning: String,
}

/// Mixing priority per product type; lower numbers go into the reservoir
/// first. Silica must never contact concentrated nutrients, so it leads.
pub fn mixing_priority(product_type: ProductType) -> u8 {
    match product_type {
        ProductType::Silica => 1,
        ProductType::CalMag => 2,
        ProductType::Micro => 3,
        ProductType::Grow => 4,
        ProductType::Bloom => 5,
        ProductType::PkBoost => 6,
        _ => 7,
    }
}

/// Warning attached to the mixing step for a product type
pub fn mixing_warning(product_type: ProductType) -> &'static str {
    match product_type {
        ProductType::CalMag => "Monitor pH, can increase significantly",
        ProductType::Micro => "Add first of base nutrients",
        ProductType::Grow => "Add second, after micro",
        ProductType::Bloom => "Add last of base nutrients",
        ProductType::Silica => "Must be added first, raises pH significantly",
        ProductType::Enzyme => "Temperature sensitive, verify water temp",
        ProductType::PkBoost => "Monitor EC closely, can build up salts",
        ProductType::Base | ProductType::BaseA | ProductType::BaseB => {
            "Check for precipitation, ensure proper mixing"
        }
        _ => "Monitor solution for any reactions",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silica_always_leads() {
        for t in [
            ProductType::CalMag,
            ProductType::Micro,
            ProductType::Grow,
            ProductType::Bloom,
            ProductType::PkBoost,
            ProductType::Enzyme,
        ] {
            assert!(mixing_priority(ProductType::Silica) < mixing_priority(t));
        }
    }

    #[test]
    fn base_nutrients_keep_micro_grow_bloom_order() {
        assert!(mixing_priority(ProductType::Micro) < mixing_priority(ProductType::Grow));
        assert!(mixing_priority(ProductType::Grow) < mixing_priority(ProductType::Bloom));
    }

    #[test]
    fn unmatched_types_get_generic_warning() {
        assert_eq!(
            mixing_warning(ProductType::Biostimulant),
            "Monitor solution for any reactions"
        );
        assert_eq!(
            mixing_warning(ProductType::Ripening),
            "Monitor solution for any reactions"
        );
    }
}
