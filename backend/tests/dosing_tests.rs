//! Tests for dosage calculation
//!
//! Verifies the dose formula: scaling, stage multipliers, and unit
//! conversion behavior.

use proptest::prelude::*;
use rust_decimal::Decimal;

use shared::{
    dose_for_product, raw_dose, target_ec_range, to_gallons, FeedingType, GrowthStage,
    NutrientCatalog, UnitSystem,
};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

mod unit_tests {
    use super::*;

    /// Feeding chart worked example: 50 gal, 100%, Early Flower, 4.0 ml/gal
    #[test]
    fn test_worked_example() {
        let amount = raw_dose(
            dec("4.0"),
            dec("100"),
            GrowthStage::EarlyFlower,
            FeedingType::Medium,
            dec("50"),
        );
        assert_eq!(amount, dec("200.0"));
    }

    #[test]
    fn test_stage_multiplier_table() {
        let expected = [
            (GrowthStage::Seedling, "0.25"),
            (GrowthStage::EarlyVeg, "0.50"),
            (GrowthStage::LateVeg, "0.75"),
            (GrowthStage::PreFlower, "0.80"),
            (GrowthStage::EarlyFlower, "1"),
            (GrowthStage::MidFlower, "1"),
            (GrowthStage::LateFlower, "0.75"),
            (GrowthStage::Flush, "0"),
        ];
        for (stage, multiplier) in expected {
            assert_eq!(stage.multiplier(), dec(multiplier), "{}", stage);
        }
    }

    #[test]
    fn test_feeding_multiplier_table() {
        assert_eq!(FeedingType::Light.multiplier(), dec("0.8"));
        assert_eq!(FeedingType::Medium.multiplier(), dec("1"));
        assert_eq!(FeedingType::Heavy.multiplier(), dec("1.2"));
    }

    #[test]
    fn test_gallon_conversion_constant() {
        // 1 gal = 3.78541 L
        assert_eq!(to_gallons(dec("3.78541"), UnitSystem::Liters).round_dp(4), dec("1.0000"));
        assert_eq!(to_gallons(dec("25"), UnitSystem::UsGallons), dec("25"));
    }

    #[test]
    fn test_dose_result_rounding() {
        let catalog = NutrientCatalog::builtin();
        let product = catalog
            .get("General Hydroponics")
            .unwrap()
            .product("Flora Micro")
            .unwrap()
            .clone();

        // 4.0 ml/gal x 75% x 0.8 (light feeder) x 13 gal = 31.2 ml
        let dose = dose_for_product(
            &product,
            dec("75"),
            GrowthStage::EarlyFlower,
            FeedingType::Light,
            dec("13"),
        );
        assert_eq!(dose.amount, dec("31.2"));
        assert_eq!(dose.per_unit_rate, dec("2.40"));
    }

    #[test]
    fn test_ec_target_bands() {
        assert_eq!(target_ec_range(0).to_string(), "1.0-1.4");
        assert_eq!(target_ec_range(1).to_string(), "1.0-1.4");
        assert_eq!(target_ec_range(2).to_string(), "1.0-1.4");
        assert_eq!(target_ec_range(3).to_string(), "1.2-1.8");
        assert_eq!(target_ec_range(5).to_string(), "1.4-2.0");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use super::*;

    /// Strategy for reservoir volumes (0.1 to 1000.0)
    fn volume_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10_000i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Strategy for strength percentages (0.0 to 150.0)
    fn strength_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=1500i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Strategy for label rates (0.5 to 6.0 ml/gal)
    fn max_strength_strategy() -> impl Strategy<Value = Decimal> {
        (5i64..=60i64).prop_map(|n| Decimal::new(n, 1))
    }

    fn stage_strategy() -> impl Strategy<Value = GrowthStage> {
        prop::sample::select(GrowthStage::ALL.to_vec())
    }

    fn feeding_strategy() -> impl Strategy<Value = FeedingType> {
        prop::sample::select(vec![
            FeedingType::Light,
            FeedingType::Medium,
            FeedingType::Heavy,
        ])
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Doses are never negative for valid inputs
        #[test]
        fn prop_doses_non_negative(
            max_strength in max_strength_strategy(),
            strength in strength_strategy(),
            stage in stage_strategy(),
            feeding in feeding_strategy(),
            volume in volume_strategy()
        ) {
            let amount = raw_dose(max_strength, strength, stage, feeding, volume);
            prop_assert!(amount >= Decimal::ZERO);
        }

        /// Doubling the volume exactly doubles every amount
        #[test]
        fn prop_linear_in_volume(
            max_strength in max_strength_strategy(),
            strength in strength_strategy(),
            stage in stage_strategy(),
            feeding in feeding_strategy(),
            volume in volume_strategy()
        ) {
            let single = raw_dose(max_strength, strength, stage, feeding, volume);
            let double = raw_dose(max_strength, strength, stage, feeding, volume * dec("2"));
            prop_assert_eq!(double, single * dec("2"));
        }

        /// Doubling the strength exactly doubles every amount
        #[test]
        fn prop_linear_in_strength(
            max_strength in max_strength_strategy(),
            strength in (0i64..=750i64).prop_map(|n| Decimal::new(n, 1)),
            stage in stage_strategy(),
            feeding in feeding_strategy(),
            volume in volume_strategy()
        ) {
            let single = raw_dose(max_strength, strength, stage, feeding, volume);
            let double = raw_dose(max_strength, strength * dec("2"), stage, feeding, volume);
            prop_assert_eq!(double, single * dec("2"));
        }

        /// Flush zeroes the dose regardless of every other input
        #[test]
        fn prop_flush_always_zero(
            max_strength in max_strength_strategy(),
            strength in strength_strategy(),
            feeding in feeding_strategy(),
            volume in volume_strategy()
        ) {
            let amount = raw_dose(max_strength, strength, GrowthStage::Flush, feeding, volume);
            prop_assert_eq!(amount, Decimal::ZERO);
        }

        /// A heavier feeding type never lowers the dose
        #[test]
        fn prop_feeding_type_monotone(
            max_strength in max_strength_strategy(),
            strength in strength_strategy(),
            stage in stage_strategy(),
            volume in volume_strategy()
        ) {
            let light = raw_dose(max_strength, strength, stage, FeedingType::Light, volume);
            let medium = raw_dose(max_strength, strength, stage, FeedingType::Medium, volume);
            let heavy = raw_dose(max_strength, strength, stage, FeedingType::Heavy, volume);
            prop_assert!(light <= medium);
            prop_assert!(medium <= heavy);
        }

        /// Converting litres to gallons shrinks the number
        #[test]
        fn prop_liters_convert_down(volume in volume_strategy()) {
            let gallons = to_gallons(volume, UnitSystem::Liters);
            prop_assert!(gallons < volume);
            prop_assert!(gallons > Decimal::ZERO);
        }
    }
}
