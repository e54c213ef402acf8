//! Market data domain models - one record per tradable instrument, as
//! synchronized by the external ETL jobs.

mod market_data_model;

pub use market_data_model::{
    DataQualityStatus, IndicatorBundle, MarketRecord, PerformanceHorizon, PerformanceSet,
};
