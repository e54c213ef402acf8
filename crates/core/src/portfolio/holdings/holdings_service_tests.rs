#[cfg(test)]
mod tests {
    use crate::fx::{CurrencyRate, RateTable};
    use crate::market_data::{DataQualityStatus, MarketRecord, PerformanceSet};
    use crate::portfolio::holdings::HoldingsService;
    use crate::positions::PositionRecord;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn market_record(ticker: &str, name: &str, price: Decimal, currency: &str) -> MarketRecord {
        MarketRecord {
            ticker: ticker.to_string(),
            name: name.to_string(),
            last_price: Some(price),
            currency: currency.to_string(),
            instrument_type: Some("EQUITY".to_string()),
            geo_coverage: None,
            quality: DataQualityStatus::Ok,
            last_update: None,
            performance: PerformanceSet::default(),
            indicators: None,
        }
    }

    fn position(portfolio: &str, ticker: &str, qty: Decimal, pru: Option<Decimal>) -> PositionRecord {
        PositionRecord {
            portfolio_id: portfolio.to_string(),
            ticker: ticker.to_string(),
            quantity_buy: Some(qty),
            quantity_current: Some(qty),
            average_cost: pru,
            target_weight_pct: None,
            geo_coverage: None,
        }
    }

    fn usd_rates() -> RateTable {
        RateTable::new(
            "EUR",
            &[CurrencyRate {
                code: "USD".to_string(),
                symbol: Some("$".to_string()),
                rate_to_base: Some(dec!(0.90)),
            }],
        )
    }

    fn market_map(records: Vec<MarketRecord>) -> HashMap<String, MarketRecord> {
        records
            .into_iter()
            .map(|r| (r.ticker.clone(), r))
            .collect()
    }

    #[test]
    fn test_two_portfolios_consolidate_into_one_holding() {
        let service = HoldingsService::new("EUR");
        let market = market_map(vec![market_record("AAPL", "Apple Inc.", dec!(180), "USD")]);
        let positions = vec![
            position("A", "AAPL", dec!(10), Some(dec!(150))),
            position("B", "AAPL", dec!(5), Some(dec!(170))),
        ];

        let holdings = service.aggregate(&positions, &market, &usd_rates(), None);
        assert_eq!(holdings.len(), 1);

        let holding = &holdings[0];
        assert_eq!(holding.quantity_current, dec!(15));
        assert_eq!(holding.average_cost.unwrap().round_dp(2), dec!(156.67));
        assert_eq!(holding.market_value_base, dec!(2430));
        assert_eq!(holding.invested_value_base, Some(dec!(2115)));
        assert_eq!(holding.gain_base, Some(dec!(315)));
        assert_eq!(holding.gain_pct.unwrap().round_dp(2), dec!(14.89));
        assert_eq!(holding.portfolio_ids, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_value_conservation_across_positions() {
        let service = HoldingsService::new("EUR");
        let market = market_map(vec![market_record("AAPL", "Apple Inc.", dec!(180), "USD")]);
        let quantities = [dec!(1.5), dec!(2.25), dec!(7), dec!(0.125)];
        let positions: Vec<PositionRecord> = quantities
            .iter()
            .enumerate()
            .map(|(i, qty)| position(&format!("P{}", i), "AAPL", *qty, None))
            .collect();

        let rates = usd_rates();
        let holdings = service.aggregate(&positions, &market, &rates, None);

        let summed: Decimal = quantities
            .iter()
            .map(|qty| *qty * dec!(180) * dec!(0.90))
            .sum();
        assert_eq!(holdings[0].market_value_base, summed);
    }

    #[test]
    fn test_identical_snapshot_yields_identical_output() {
        let service = HoldingsService::new("EUR");
        let market = market_map(vec![
            market_record("AAPL", "Apple Inc.", dec!(180), "USD"),
            market_record("MC.PA", "LVMH", dec!(612.4), "EUR"),
        ]);
        let positions = vec![
            position("A", "AAPL", dec!(10), Some(dec!(150))),
            position("B", "MC.PA", dec!(4), Some(dec!(550))),
        ];
        let rates = usd_rates();

        let first = service.aggregate(&positions, &market, &rates, None);
        let second = service.aggregate(&positions, &market, &rates, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unpriced_but_held_stays_visible() {
        let service = HoldingsService::new("EUR");
        let positions = vec![position("A", "GHOST", dec!(3), Some(dec!(20)))];

        let holdings = service.aggregate(&positions, &HashMap::new(), &usd_rates(), None);
        assert_eq!(holdings.len(), 1);

        let holding = &holdings[0];
        assert!(!holding.is_priced());
        assert_eq!(holding.last_price, Decimal::ZERO);
        assert_eq!(holding.market_value_base, Decimal::ZERO);
        assert_eq!(holding.name, "GHOST");
        assert_eq!(holding.quality, DataQualityStatus::Partial);
        // Cost is known, so the loss is visible too.
        assert_eq!(holding.invested_value_base, Some(dec!(60)));
        assert_eq!(holding.gain_base, Some(dec!(-60)));
    }

    #[test]
    fn test_portfolio_filter_and_synthetic_all() {
        let service = HoldingsService::new("EUR");
        let market = market_map(vec![market_record("AAPL", "Apple Inc.", dec!(180), "USD")]);
        let positions = vec![
            position("A", "AAPL", dec!(10), None),
            position("B", "AAPL", dec!(5), None),
        ];
        let rates = usd_rates();

        let only_a = service.aggregate(&positions, &market, &rates, Some("A"));
        assert_eq!(only_a[0].quantity_current, dec!(10));
        assert_eq!(only_a[0].portfolio_ids, vec!["A".to_string()]);

        let all = service.aggregate(&positions, &market, &rates, Some("ALL"));
        assert_eq!(all[0].quantity_current, dec!(15));
    }

    #[test]
    fn test_cost_only_from_positions_that_supply_it() {
        let service = HoldingsService::new("EUR");
        let market = market_map(vec![market_record("AAPL", "Apple Inc.", dec!(100), "USD")]);
        let positions = vec![
            position("A", "AAPL", dec!(10), Some(dec!(90))),
            position("B", "AAPL", dec!(5), None),
        ];

        let holdings = service.aggregate(&positions, &market, &usd_rates(), None);
        let holding = &holdings[0];
        // Weighted over the costed subset only.
        assert_eq!(holding.average_cost, Some(dec!(90)));
        assert_eq!(holding.invested_value_base, Some(dec!(810)));
        // Market value still covers every position.
        assert_eq!(holding.market_value_base, dec!(1350));
    }

    #[test]
    fn test_no_cost_anywhere_means_no_pnl() {
        let service = HoldingsService::new("EUR");
        let market = market_map(vec![market_record("AAPL", "Apple Inc.", dec!(100), "USD")]);
        let positions = vec![position("A", "AAPL", dec!(10), None)];

        let holdings = service.aggregate(&positions, &market, &usd_rates(), None);
        let holding = &holdings[0];
        assert_eq!(holding.average_cost, None);
        assert_eq!(holding.invested_value_base, None);
        assert_eq!(holding.gain_base, None);
        assert_eq!(holding.gain_pct, None);
    }

    #[test]
    fn test_target_weight_is_value_weighted() {
        let service = HoldingsService::new("EUR");
        let market = market_map(vec![market_record("AAPL", "Apple Inc.", dec!(100), "USD")]);
        let mut heavy = position("A", "AAPL", dec!(30), None);
        heavy.target_weight_pct = Some(dec!(10));
        let mut light = position("B", "AAPL", dec!(10), None);
        light.target_weight_pct = Some(dec!(20));

        let holdings = service.aggregate(&[heavy, light], &market, &usd_rates(), None);
        // (10 * 2700 + 20 * 900) / 3600 = 12.5
        assert_eq!(holdings[0].target_weight_pct, Some(dec!(12.5)));
    }

    #[test]
    fn test_unknown_currency_fails_open_at_parity() {
        let service = HoldingsService::new("EUR");
        let market = market_map(vec![market_record("NESN.SW", "Nestlé", dec!(100), "CHF")]);
        let positions = vec![position("A", "NESN.SW", dec!(2), None)];

        // Rate table has no CHF quote.
        let holdings = service.aggregate(&positions, &market, &usd_rates(), None);
        assert_eq!(holdings[0].market_value_base, dec!(200));
    }

    #[test]
    fn test_country_weights_from_position_override() {
        let service = HoldingsService::new("EUR");
        let market = market_map(vec![market_record("IWDA.AS", "MSCI World", dec!(80), "EUR")]);
        let mut with_coverage = position("A", "IWDA.AS", dec!(10), None);
        with_coverage.geo_coverage = Some(HashMap::from([
            ("US".to_string(), dec!(0.7)),
            ("JP".to_string(), dec!(0.3)),
        ]));

        let holdings = service.aggregate(&[with_coverage], &market, &usd_rates(), None);
        let weights = &holdings[0].country_weights;
        assert_eq!(weights.get("US"), Some(&dec!(70)));
        assert_eq!(weights.get("JP"), Some(&dec!(30)));
    }

    #[test]
    fn test_country_weights_fall_back_to_market_coverage() {
        let service = HoldingsService::new("EUR");
        let mut record = market_record("MC.PA", "LVMH", dec!(612.4), "EUR");
        record.geo_coverage = Some(HashMap::from([
            ("FR".to_string(), dec!(80)),
            ("US".to_string(), dec!(20)),
        ]));
        let market = market_map(vec![record]);
        let positions = vec![position("A", "MC.PA", dec!(2), None)];

        let holdings = service.aggregate(&positions, &market, &usd_rates(), None);
        let weights = &holdings[0].country_weights;
        assert_eq!(weights.get("FR"), Some(&dec!(80)));
        assert_eq!(weights.get("US"), Some(&dec!(20)));
    }

    #[test]
    fn test_output_ordered_by_case_insensitive_name() {
        let service = HoldingsService::new("EUR");
        let market = market_map(vec![
            market_record("B1", "beta fund", dec!(1), "EUR"),
            market_record("A1", "Alpha Fund", dec!(1), "EUR"),
            market_record("C1", "Gamma", dec!(1), "EUR"),
        ]);
        let positions = vec![
            position("P", "C1", dec!(1), None),
            position("P", "B1", dec!(1), None),
            position("P", "A1", dec!(1), None),
        ];

        let holdings = service.aggregate(&positions, &market, &usd_rates(), None);
        let names: Vec<&str> = holdings.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha Fund", "beta fund", "Gamma"]);
    }
}
