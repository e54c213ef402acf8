use log::debug;
use rust_decimal::Decimal;

use crate::constants::{BASE_CURRENCY, PORTFOLIO_ALL_ID};
use crate::fx::RateTable;
use crate::market_data::PerformanceHorizon;
use crate::portfolio::drift::DriftService;
use crate::portfolio::geo::GeoExposureService;
use crate::portfolio::holdings::HoldingsService;

use super::{DashboardInput, PortfolioOverview};

/// Facade over the aggregation, geographic and governance engines.
///
/// Stateless between runs; each `build` works on the snapshot it is
/// given, so independent filters can be computed in parallel from the
/// same input.
pub struct OverviewService {
    base_currency: String,
    holdings: HoldingsService,
    geo: GeoExposureService,
    drift: DriftService,
}

impl OverviewService {
    pub fn new(base_currency: impl Into<String>) -> Self {
        let base_currency = base_currency.into().to_uppercase();
        OverviewService {
            holdings: HoldingsService::new(base_currency.clone()),
            geo: GeoExposureService::new(),
            drift: DriftService::new(),
            base_currency,
        }
    }

    pub fn with_base_currency() -> Self {
        Self::new(BASE_CURRENCY)
    }

    /// Builds the complete result set for one portfolio filter.
    ///
    /// Governance targets apply by exact portfolio id; the synthetic
    /// `ALL` view uses the targets declared for `ALL`.
    pub fn build(
        &self,
        input: &DashboardInput,
        filter: Option<&str>,
        horizon: PerformanceHorizon,
    ) -> PortfolioOverview {
        let portfolio_id = filter.unwrap_or(PORTFOLIO_ALL_ID).to_string();
        debug!("Building overview for portfolio {}", portfolio_id);

        let rates = RateTable::new(&self.base_currency, &input.currencies);
        let holdings = self
            .holdings
            .aggregate(&input.positions, &input.market, &rates, filter);
        let total_value_base: Decimal = holdings.iter().map(|h| h.market_value_base).sum();

        let countries = self.geo.build_exposures(&holdings, &input.market, horizon);
        let regions = countries.iter().map(Into::into).collect();

        let targets: Vec<_> = input
            .targets
            .iter()
            .filter(|t| t.portfolio_id == portfolio_id)
            .cloned()
            .collect();
        let drift = self.drift.assess(&holdings, &targets);

        PortfolioOverview {
            portfolio_id,
            holdings,
            total_value_base,
            countries,
            regions,
            drift,
        }
    }

    /// Builds one overview per known portfolio plus the `ALL` aggregate.
    pub fn build_all(
        &self,
        input: &DashboardInput,
        horizon: PerformanceHorizon,
    ) -> Vec<PortfolioOverview> {
        let mut overviews = vec![self.build(input, None, horizon)];
        for portfolio in &input.portfolios {
            overviews.push(self.build(input, Some(&portfolio.id), horizon));
        }
        overviews
    }
}

impl Default for OverviewService {
    fn default() -> Self {
        Self::with_base_currency()
    }
}
