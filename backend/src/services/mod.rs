//! Business logic services for the Hydroponic Nutrient Management Platform

pub mod dosing;
pub mod mixing;
pub mod recipe;
pub mod strain;

pub use dosing::DosingService;
pub use recipe::RecipeService;
pub use strain::StrainService;
