//! Position, portfolio and governance-target domain models.

mod positions_model;

pub use positions_model::{PortfolioRecord, PositionRecord, TargetAllocation};
