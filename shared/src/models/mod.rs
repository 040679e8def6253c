//! Domain models for the Hydroponic Nutrient Management Platform

mod catalog;
mod dosing;
mod mixing;
mod recipe;
mod strain;

pub use catalog::*;
pub use dosing::*;
pub use mixing::*;
pub use recipe::*;
pub use strain::*;
