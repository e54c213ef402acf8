pub mod drift;
pub mod geo;
pub mod holdings;
pub mod overview;
