//! Validation utilities for the Hydroponic Nutrient Management Platform

use rust_decimal::Decimal;

use crate::types::DecimalRange;

// ============================================================================
// Dosage Input Validations
// ============================================================================

/// Validate reservoir volume; the UI caps reservoirs at 1000 units
pub fn validate_volume(volume: Decimal) -> Result<(), &'static str> {
    if volume <= Decimal::ZERO {
        return Err("Reservoir volume must be positive");
    }
    if volume > Decimal::from(1000) {
        return Err("Reservoir volume must be at most 1000");
    }
    Ok(())
}

/// Validate nutrient strength percentage (0-150%)
pub fn validate_strength_percent(strength: Decimal) -> Result<(), &'static str> {
    if strength < Decimal::ZERO {
        return Err("Strength percentage cannot be negative");
    }
    if strength > Decimal::from(150) {
        return Err("Strength percentage must be at most 150");
    }
    Ok(())
}

// ============================================================================
// Recipe Validations
// ============================================================================

/// Validate a recipe name (non-empty, at most 100 characters)
pub fn validate_recipe_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Recipe name is required");
    }
    if trimmed.len() > 100 {
        return Err("Recipe name must be at most 100 characters");
    }
    Ok(())
}

/// Validate a target pH band
pub fn validate_ph_range(range: &DecimalRange) -> Result<(), &'static str> {
    if range.min > range.max {
        return Err("pH range minimum exceeds maximum");
    }
    if range.min < Decimal::ZERO || range.max > Decimal::from(14) {
        return Err("pH range must be between 0 and 14");
    }
    Ok(())
}

/// Validate a target EC band; hydroponic solutions stay well under 5.0 mS/cm
pub fn validate_ec_range(range: &DecimalRange) -> Result<(), &'static str> {
    if range.min > range.max {
        return Err("EC range minimum exceeds maximum");
    }
    if range.min < Decimal::ZERO || range.max > Decimal::from(5) {
        return Err("EC range must be between 0 and 5");
    }
    Ok(())
}

/// Check whether a measured EC sits in the ideal band for the mix
pub fn is_ec_on_target(measured: Decimal, target: &DecimalRange) -> bool {
    target.contains(measured)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    // ========================================================================
    // Dosage Input Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_volume_valid() {
        assert!(validate_volume(dec("1")).is_ok());
        assert!(validate_volume(dec("50")).is_ok());
        assert!(validate_volume(dec("1000")).is_ok());
    }

    #[test]
    fn test_validate_volume_invalid() {
        assert!(validate_volume(dec("0")).is_err());
        assert!(validate_volume(dec("-5")).is_err());
        assert!(validate_volume(dec("1001")).is_err());
    }

    #[test]
    fn test_validate_strength_valid() {
        assert!(validate_strength_percent(dec("0")).is_ok());
        assert!(validate_strength_percent(dec("100")).is_ok());
        assert!(validate_strength_percent(dec("150")).is_ok());
    }

    #[test]
    fn test_validate_strength_invalid() {
        assert!(validate_strength_percent(dec("-1")).is_err());
        assert!(validate_strength_percent(dec("151")).is_err());
    }

    // ========================================================================
    // Recipe Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_recipe_name() {
        assert!(validate_recipe_name("Veg Week 3").is_ok());
        assert!(validate_recipe_name("").is_err());
        assert!(validate_recipe_name("   ").is_err());
        assert!(validate_recipe_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_ph_range() {
        assert!(validate_ph_range(&DecimalRange::new(dec("5.8"), dec("6.2"))).is_ok());
        assert!(validate_ph_range(&DecimalRange::new(dec("6.2"), dec("5.8"))).is_err());
        assert!(validate_ph_range(&DecimalRange::new(dec("-1"), dec("6"))).is_err());
        assert!(validate_ph_range(&DecimalRange::new(dec("7"), dec("15"))).is_err());
    }

    #[test]
    fn test_validate_ec_range() {
        assert!(validate_ec_range(&DecimalRange::new(dec("1.2"), dec("1.8"))).is_ok());
        assert!(validate_ec_range(&DecimalRange::new(dec("1.8"), dec("1.2"))).is_err());
        assert!(validate_ec_range(&DecimalRange::new(dec("0"), dec("6"))).is_err());
    }

    #[test]
    fn test_ec_on_target() {
        let target = DecimalRange::new(dec("1.2"), dec("1.8"));
        assert!(is_ec_on_target(dec("1.5"), &target));
        assert!(is_ec_on_target(dec("1.2"), &target));
        assert!(!is_ec_on_target(dec("1.9"), &target));
    }
}
