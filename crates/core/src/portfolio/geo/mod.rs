//! Geographic exposure - coverage-map normalization and the country-level
//! exposure builder feeding the dashboard map.

mod coverage;
mod geo_model;
mod geo_service;

pub use coverage::{fallback_coverage, normalize_coverage};
pub use geo_model::{country_info, CountryExposure, CountryInfo, MarketRegion};
pub use geo_service::GeoExposureService;
