use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::fx::CurrencyRate;
use crate::ingest::RawRow;
use crate::market_data::MarketRecord;
use crate::portfolio::drift::DriftReport;
use crate::portfolio::geo::{CountryExposure, MarketRegion};
use crate::portfolio::holdings::Holding;
use crate::positions::{PortfolioRecord, PositionRecord, TargetAllocation};

/// One immutable input snapshot for an aggregation run: every row set the
/// core consumes, already fetched by the caller.
#[derive(Debug, Clone, Default)]
pub struct DashboardInput {
    pub market: HashMap<String, MarketRecord>,
    pub positions: Vec<PositionRecord>,
    pub portfolios: Vec<PortfolioRecord>,
    pub currencies: Vec<CurrencyRate>,
    pub targets: Vec<TargetAllocation>,
}

impl DashboardInput {
    /// Normalizes raw row sets into one typed snapshot. Rows that cannot
    /// resolve their join keys are dropped; everything else degrades
    /// field by field.
    pub fn from_rows(
        market_rows: &[RawRow],
        position_rows: &[RawRow],
        portfolio_rows: &[RawRow],
        currency_rows: &[RawRow],
        target_rows: &[RawRow],
    ) -> Self {
        DashboardInput {
            market: MarketRecord::map_from_rows(market_rows),
            positions: PositionRecord::vec_from_rows(position_rows),
            portfolios: PortfolioRecord::vec_from_rows(portfolio_rows),
            currencies: CurrencyRate::vec_from_rows(currency_rows),
            targets: TargetAllocation::vec_from_rows(target_rows),
        }
    }
}

/// Complete derived result set for one portfolio filter. Plain
/// serializable records, ready for rendering or transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioOverview {
    /// Portfolio id this view was computed for; the synthetic `ALL` id
    /// stands for the cross-portfolio aggregate.
    pub portfolio_id: String,
    pub holdings: Vec<Holding>,
    pub total_value_base: Decimal,
    pub countries: Vec<CountryExposure>,
    pub regions: Vec<MarketRegion>,
    pub drift: DriftReport,
}
