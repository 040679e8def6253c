//! Nutrient catalog: per-brand product definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Nutrient product category
///
/// The category decides mixing order and the warning text attached to each
/// mixing step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Micro,
    Grow,
    Bloom,
    #[serde(rename = "calmag")]
    CalMag,
    Silica,
    PkBoost,
    Root,
    Humic,
    Enzyme,
    Biostimulant,
    Ripening,
    Base,
    BaseA,
    BaseB,
}

impl ProductType {
    /// Base NPK nutrients are dosed in micro -> grow -> bloom order and
    /// drive the target EC estimate
    pub fn is_base_npk(&self) -> bool {
        matches!(self, ProductType::Micro | ProductType::Grow | ProductType::Bloom)
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ProductType::Micro => "Micro",
            ProductType::Grow => "Grow",
            ProductType::Bloom => "Bloom",
            ProductType::CalMag => "Cal-Mag",
            ProductType::Silica => "Silica",
            ProductType::PkBoost => "P-K Booster",
            ProductType::Root => "Root Enhancer",
            ProductType::Humic => "Humic Acid",
            ProductType::Enzyme => "Enzyme",
            ProductType::Biostimulant => "Biostimulant",
            ProductType::Ripening => "Ripening Agent",
            ProductType::Base => "Base",
            ProductType::BaseA => "Base A",
            ProductType::BaseB => "Base B",
        };
        write!(f, "{}", label)
    }
}

/// N-P-K macro-nutrient ratio
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Npk {
    pub n: u8,
    pub p: u8,
    pub k: u8,
}

impl Npk {
    pub fn new(n: u8, p: u8, k: u8) -> Self {
        Self { n, p, k }
    }
}

impl std::fmt::Display for Npk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.n, self.p, self.k)
    }
}

/// Unit a product is measured in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DoseUnit {
    #[default]
    Milliliters,
    Grams,
}

impl DoseUnit {
    pub fn code(&self) -> &'static str {
        match self {
            DoseUnit::Milliliters => "ml",
            DoseUnit::Grams => "g",
        }
    }
}

/// Single nutrient product as defined by its manufacturer
///
/// `max_strength` is the label rate per US gallon at 100% strength.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub product_type: ProductType,
    pub max_strength: Decimal,
    pub unit: DoseUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npk: Option<Npk>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when_to_use: Option<String>,
}

impl Product {
    fn new(
        name: &str,
        product_type: ProductType,
        max_strength: Decimal,
        npk: Option<Npk>,
        description: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            product_type,
            max_strength,
            unit: DoseUnit::Milliliters,
            npk,
            description: description.to_string(),
            when_to_use: None,
        }
    }

    fn with_usage(mut self, when_to_use: &str) -> Self {
        self.when_to_use = Some(when_to_use.to_string());
        self
    }

    fn in_grams(mut self) -> Self {
        self.unit = DoseUnit::Grams;
        self
    }
}

/// Named collection of products from one manufacturer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    pub description: String,
    pub base_nutrients: Vec<Product>,
    pub supplements: Vec<Product>,
}

impl Brand {
    /// Look up a product by name, searching base nutrients then supplements
    pub fn product(&self, name: &str) -> Option<&Product> {
        self.base_nutrients
            .iter()
            .chain(self.supplements.iter())
            .find(|p| p.name == name)
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.base_nutrients.iter().chain(self.supplements.iter())
    }

    /// Products dosed when the caller does not pick an explicit selection:
    /// all base nutrients plus the calmag/silica/pk-boost supplements
    pub fn default_selection(&self) -> Vec<&Product> {
        self.base_nutrients
            .iter()
            .chain(self.supplements.iter().filter(|p| {
                matches!(
                    p.product_type,
                    ProductType::CalMag | ProductType::Silica | ProductType::PkBoost
                )
            }))
            .collect()
    }
}

/// Static catalog of supported nutrient brands
#[derive(Debug, Clone)]
pub struct NutrientCatalog {
    brands: Vec<Brand>,
}

impl NutrientCatalog {
    pub fn builtin() -> Self {
        Self {
            brands: builtin_brands(),
        }
    }

    pub fn brand_names(&self) -> Vec<&str> {
        self.brands.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Brand> {
        self.brands.iter().find(|b| b.name == name)
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }
}

fn ml_per_gal(tenths: i64) -> Decimal {
    Decimal::new(tenths, 1)
}

fn builtin_brands() -> Vec<Brand> {
    vec![
        Brand {
            name: "Generic".to_string(),
            description: "Standard nutrient components for any brand".to_string(),
            base_nutrients: vec![
                Product::new(
                    "Micro",
                    ProductType::Micro,
                    ml_per_gal(30),
                    Some(Npk::new(5, 0, 1)),
                    "Micronutrient blend",
                ),
                Product::new(
                    "Grow",
                    ProductType::Grow,
                    ml_per_gal(30),
                    Some(Npk::new(3, 1, 3)),
                    "Vegetative growth nutrient",
                ),
                Product::new(
                    "Bloom",
                    ProductType::Bloom,
                    ml_per_gal(30),
                    Some(Npk::new(0, 5, 4)),
                    "Flowering nutrient",
                ),
            ],
            supplements: vec![
                Product::new(
                    "CalMag",
                    ProductType::CalMag,
                    ml_per_gal(50),
                    None,
                    "Calcium-Magnesium supplement",
                )
                .with_usage("Throughout grow cycle"),
                Product::new(
                    "Silica",
                    ProductType::Silica,
                    ml_per_gal(20),
                    None,
                    "Silica supplement for strength",
                )
                .with_usage("Add first, throughout cycle"),
                Product::new(
                    "PK Booster",
                    ProductType::PkBoost,
                    ml_per_gal(20),
                    None,
                    "Phosphorus-Potassium boost",
                )
                .with_usage("Mid to late flower"),
            ],
        },
        Brand {
            name: "General Hydroponics".to_string(),
            description: "Industry standard 3-part system with comprehensive supplements"
                .to_string(),
            base_nutrients: vec![
                Product::new(
                    "Flora Micro",
                    ProductType::Micro,
                    ml_per_gal(40),
                    Some(Npk::new(5, 0, 1)),
                    "Concentrated micronutrients and calcium",
                ),
                Product::new(
                    "Flora Grow",
                    ProductType::Grow,
                    ml_per_gal(40),
                    Some(Npk::new(2, 1, 6)),
                    "Promotes structural and vegetative growth",
                )
                .with_usage("Heavy in veg, reduced in flower"),
                Product::new(
                    "Flora Bloom",
                    ProductType::Bloom,
                    ml_per_gal(40),
                    Some(Npk::new(0, 5, 4)),
                    "Promotes flower development and fruiting",
                )
                .with_usage("During flowering phase"),
            ],
            supplements: vec![
                Product::new(
                    "CaliMagic",
                    ProductType::CalMag,
                    ml_per_gal(50),
                    Some(Npk::new(1, 0, 0)),
                    "Calcium and magnesium supplement",
                )
                .with_usage("Throughout grow cycle, essential with RO water"),
                Product::new(
                    "Rapid Start",
                    ProductType::Root,
                    ml_per_gal(20),
                    None,
                    "Root development enhancer",
                )
                .with_usage("Early growth and transplanting"),
                Product::new(
                    "Diamond Nectar",
                    ProductType::Humic,
                    ml_per_gal(20),
                    None,
                    "Premium humic acid supplement",
                )
                .with_usage("Throughout grow cycle"),
                Product::new(
                    "Armor Si",
                    ProductType::Silica,
                    ml_per_gal(20),
                    None,
                    "Silica supplement",
                )
                .with_usage("Throughout grow cycle"),
                Product::new(
                    "Liquid KoolBloom",
                    ProductType::PkBoost,
                    ml_per_gal(25),
                    Some(Npk::new(0, 10, 10)),
                    "Liquid P-K booster",
                )
                .with_usage("Early to mid flowering"),
                Product::new(
                    "Dry KoolBloom",
                    ProductType::Ripening,
                    ml_per_gal(15),
                    Some(Npk::new(0, 27, 27)),
                    "Flowering finisher powder",
                )
                .with_usage("Last 2-3 weeks of flower")
                .in_grams(),
                Product::new(
                    "Floralicious Plus",
                    ProductType::Enzyme,
                    ml_per_gal(10),
                    None,
                    "Organic bioactivator",
                )
                .with_usage("Throughout grow cycle"),
                Product::new(
                    "Florablend",
                    ProductType::Biostimulant,
                    ml_per_gal(20),
                    None,
                    "Organic vegan supplement",
                )
                .with_usage("Throughout grow cycle"),
            ],
        },
        Brand {
            name: "Advanced Nutrients".to_string(),
            description: "pH Perfect technology with premium supplements".to_string(),
            base_nutrients: vec![
                Product::new(
                    "pH Perfect Micro",
                    ProductType::Micro,
                    ml_per_gal(40),
                    Some(Npk::new(5, 0, 1)),
                    "Self-adjusting pH micronutrient formula",
                ),
                Product::new(
                    "pH Perfect Grow",
                    ProductType::Grow,
                    ml_per_gal(40),
                    Some(Npk::new(4, 0, 1)),
                    "Vegetative growth formula",
                ),
                Product::new(
                    "pH Perfect Bloom",
                    ProductType::Bloom,
                    ml_per_gal(40),
                    Some(Npk::new(0, 5, 4)),
                    "Flowering phase formula",
                ),
            ],
            supplements: vec![],
        },
        Brand {
            name: "Athena".to_string(),
            description: "Professional grade blended nutrient system".to_string(),
            base_nutrients: vec![
                Product::new(
                    "Core",
                    ProductType::Base,
                    ml_per_gal(30),
                    Some(Npk::new(4, 0, 1)),
                    "Complete nutrient solution",
                ),
                Product::new(
                    "Bloom",
                    ProductType::Bloom,
                    ml_per_gal(30),
                    Some(Npk::new(0, 5, 4)),
                    "Flower enhancer",
                ),
            ],
            supplements: vec![],
        },
        Brand {
            name: "House & Garden".to_string(),
            description: "Premium Dutch nutrients with specialized additives".to_string(),
            base_nutrients: vec![
                Product::new(
                    "Aqua Flakes A",
                    ProductType::BaseA,
                    ml_per_gal(30),
                    Some(Npk::new(5, 0, 3)),
                    "Part A base nutrient",
                ),
                Product::new(
                    "Aqua Flakes B",
                    ProductType::BaseB,
                    ml_per_gal(30),
                    Some(Npk::new(1, 4, 5)),
                    "Part B base nutrient",
                ),
            ],
            supplements: vec![],
        },
        Brand {
            name: "Canna".to_string(),
            description: "Research-based nutrients optimized for various media".to_string(),
            base_nutrients: vec![
                Product::new(
                    "Canna A",
                    ProductType::BaseA,
                    ml_per_gal(30),
                    Some(Npk::new(5, 0, 1)),
                    "Part A complete nutrient",
                ),
                Product::new(
                    "Canna B",
                    ProductType::BaseB,
                    ml_per_gal(30),
                    Some(Npk::new(0, 4, 2)),
                    "Part B complete nutrient",
                ),
            ],
            supplements: vec![],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_expected_brands() {
        let catalog = NutrientCatalog::builtin();
        let names = catalog.brand_names();
        assert!(names.contains(&"Generic"));
        assert!(names.contains(&"General Hydroponics"));
        assert!(names.contains(&"Advanced Nutrients"));
        assert!(names.contains(&"Athena"));
        assert!(names.contains(&"House & Garden"));
        assert!(names.contains(&"Canna"));
    }

    #[test]
    fn product_lookup_searches_base_then_supplements() {
        let catalog = NutrientCatalog::builtin();
        let gh = catalog.get("General Hydroponics").unwrap();

        let micro = gh.product("Flora Micro").unwrap();
        assert_eq!(micro.product_type, ProductType::Micro);
        assert_eq!(micro.max_strength, Decimal::new(40, 1));

        let silica = gh.product("Armor Si").unwrap();
        assert_eq!(silica.product_type, ProductType::Silica);

        assert!(gh.product("Nonexistent").is_none());
    }

    #[test]
    fn default_selection_includes_base_and_core_supplements() {
        let catalog = NutrientCatalog::builtin();
        let gh = catalog.get("General Hydroponics").unwrap();
        let selection = gh.default_selection();

        let names: Vec<&str> = selection.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"Flora Micro"));
        assert!(names.contains(&"Flora Grow"));
        assert!(names.contains(&"Flora Bloom"));
        assert!(names.contains(&"CaliMagic"));
        assert!(names.contains(&"Armor Si"));
        assert!(names.contains(&"Liquid KoolBloom"));
        // Enzyme and biostimulant products are opt-in
        assert!(!names.contains(&"Floralicious Plus"));
        assert!(!names.contains(&"Florablend"));
    }

    #[test]
    fn dry_koolbloom_is_measured_in_grams() {
        let catalog = NutrientCatalog::builtin();
        let gh = catalog.get("General Hydroponics").unwrap();
        assert_eq!(gh.product("Dry KoolBloom").unwrap().unit, DoseUnit::Grams);
    }

    #[test]
    fn every_max_strength_is_positive() {
        let catalog = NutrientCatalog::builtin();
        for brand in catalog.brands() {
            for product in brand.products() {
                assert!(
                    product.max_strength > Decimal::ZERO,
                    "{} has non-positive max strength",
                    product.name
                );
            }
        }
    }
}
