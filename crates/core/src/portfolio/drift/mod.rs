//! Governance drift - allocation-drift assessment against target
//! allocations.

mod drift_model;
mod drift_service;

pub use drift_model::{DriftAssessment, DriftReport, DriftStatus, UNCLASSIFIED_CLASS};
pub use drift_service::DriftService;
