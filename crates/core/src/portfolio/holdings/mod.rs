//! Consolidated holdings - the cross-portfolio view of each instrument.

mod holdings_model;
mod holdings_service;

mod holdings_service_tests;

pub use holdings_model::Holding;
pub use holdings_service::HoldingsService;
