//! Dashboard overview - the facade turning one input snapshot into the
//! complete per-portfolio result set.

mod overview_model;
mod overview_service;

pub use overview_model::{DashboardInput, PortfolioOverview};
pub use overview_service::OverviewService;
