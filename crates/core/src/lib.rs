//! Patrimoine Core - valuation, aggregation and technical-analysis engine
//! for a personal investment dashboard.
//!
//! This crate is the pure computation layer: it consolidates
//! multi-portfolio position rows and per-instrument market rows into
//! FX-normalized holdings, country-level exposure, momentum/trend
//! classifications and allocation-drift assessments. It performs no I/O;
//! persistence and presentation are external collaborators behind the
//! `store` seam.

pub mod constants;
pub mod errors;
pub mod fx;
pub mod indicators;
pub mod ingest;
pub mod market_data;
pub mod portfolio;
pub mod positions;
pub mod store;

// Re-export common types from the portfolio modules
pub use portfolio::drift::{DriftAssessment, DriftReport, DriftStatus};
pub use portfolio::geo::{CountryExposure, MarketRegion};
pub use portfolio::holdings::Holding;
pub use portfolio::overview::{DashboardInput, OverviewService, PortfolioOverview};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
