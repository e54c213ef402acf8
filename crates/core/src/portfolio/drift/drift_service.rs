use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use crate::constants::{
    DEFAULT_TOLERANCE_BAND_PCT, DISPLAY_DECIMAL_PRECISION, TARGET_SUM_TOLERANCE_PCT,
    UNCLASSIFIED_BREACH_SHARE_PCT,
};
use crate::portfolio::holdings::Holding;
use crate::positions::TargetAllocation;

use super::{DriftAssessment, DriftReport, DriftStatus, UNCLASSIFIED_CLASS};

/// Assesses allocation drift of consolidated holdings against governance
/// targets.
pub struct DriftService;

impl DriftService {
    pub fn new() -> Self {
        DriftService
    }

    /// Builds the drift report for one set of holdings and the targets
    /// applying to the same portfolio filter.
    ///
    /// Classes held without a target stay visible with an `OK` status and
    /// no drift; targets without holdings assess at a current of zero.
    /// Unclassifiable holdings pool into the `UNKNOWN` bucket, which is
    /// flagged `BREACH` once it exceeds its fixed share threshold.
    pub fn assess(&self, holdings: &[Holding], targets: &[TargetAllocation]) -> DriftReport {
        let mut report = DriftReport::default();

        let total: Decimal = holdings.iter().map(|h| h.market_value_base).sum();
        if total <= Decimal::ZERO {
            if !targets.is_empty() {
                report
                    .warnings
                    .push("Portfolio value is zero, drift cannot be assessed".to_string());
            }
            return report;
        }

        let mut class_values: HashMap<String, Decimal> = HashMap::new();
        for holding in holdings {
            let class = holding
                .asset_class
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNCLASSIFIED_CLASS.to_string());
            *class_values.entry(class).or_insert(Decimal::ZERO) += holding.market_value_base;
        }

        debug!(
            "Assessing drift over {} classes, {} targets, total {}",
            class_values.len(),
            targets.len(),
            total
        );

        let default_band = Decimal::from_str_radix(DEFAULT_TOLERANCE_BAND_PCT, 10)
            .unwrap_or_else(|_| dec!(5));

        for target in targets {
            if target.asset_class == UNCLASSIFIED_CLASS {
                // The unclassified bucket has its own fixed policy.
                continue;
            }
            let value = class_values
                .remove(&target.asset_class)
                .unwrap_or(Decimal::ZERO);
            let current_pct = value * dec!(100) / total;
            let band = target.tolerance_band.unwrap_or(default_band);
            let drift = current_pct - target.target_pct;

            report.assessments.push(DriftAssessment {
                asset_class: target.asset_class.clone(),
                current_value_base: value,
                current_pct: current_pct.round_dp(DISPLAY_DECIMAL_PRECISION),
                target_pct: Some(target.target_pct),
                tolerance_band: Some(band),
                drift_pct: Some(drift.round_dp(DISPLAY_DECIMAL_PRECISION)),
                status: classify_drift(drift, band),
            });
        }

        let unclassified_value = class_values
            .remove(UNCLASSIFIED_CLASS)
            .unwrap_or(Decimal::ZERO);

        // Remaining classes are held but untargeted; keep them visible.
        let mut untargeted: Vec<(String, Decimal)> = class_values.into_iter().collect();
        untargeted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        for (class, value) in untargeted {
            report.assessments.push(DriftAssessment {
                asset_class: class,
                current_value_base: value,
                current_pct: (value * dec!(100) / total).round_dp(DISPLAY_DECIMAL_PRECISION),
                target_pct: None,
                tolerance_band: None,
                drift_pct: None,
                status: DriftStatus::Ok,
            });
        }

        if unclassified_value > Decimal::ZERO {
            let share = unclassified_value * dec!(100) / total;
            let threshold = Decimal::from_str_radix(UNCLASSIFIED_BREACH_SHARE_PCT, 10)
                .unwrap_or_else(|_| dec!(10));
            let status = if share > threshold {
                report.warnings.push(format!(
                    "Unclassified holdings represent {}% of total value (threshold {}%)",
                    share.round_dp(DISPLAY_DECIMAL_PRECISION),
                    threshold
                ));
                DriftStatus::Breach
            } else {
                DriftStatus::Ok
            };
            report.assessments.push(DriftAssessment {
                asset_class: UNCLASSIFIED_CLASS.to_string(),
                current_value_base: unclassified_value,
                current_pct: share.round_dp(DISPLAY_DECIMAL_PRECISION),
                target_pct: None,
                tolerance_band: None,
                drift_pct: None,
                status,
            });
        }

        if !targets.is_empty() {
            let target_sum: Decimal = targets.iter().map(|t| t.target_pct).sum();
            let tolerance = Decimal::from_str_radix(TARGET_SUM_TOLERANCE_PCT, 10)
                .unwrap_or_else(|_| dec!(0.1));
            if (target_sum - dec!(100)).abs() > tolerance {
                report.warnings.push(format!(
                    "Target allocations sum to {}% instead of 100%",
                    target_sum
                ));
            }
        }

        report
    }
}

impl Default for DriftService {
    fn default() -> Self {
        Self::new()
    }
}

/// Band classification: inside half the band is `OK`, inside the full
/// band is `WARNING`, beyond it is `BREACH`.
fn classify_drift(drift: Decimal, band: Decimal) -> DriftStatus {
    let magnitude = drift.abs();
    if magnitude <= band / dec!(2) {
        DriftStatus::Ok
    } else if magnitude <= band {
        DriftStatus::Warning
    } else {
        DriftStatus::Breach
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::DataQualityStatus;
    use rust_decimal_macros::dec;

    fn holding(ticker: &str, class: Option<&str>, value: Decimal) -> Holding {
        Holding {
            ticker: ticker.to_string(),
            name: ticker.to_string(),
            currency: "EUR".to_string(),
            last_price: dec!(1),
            quality: DataQualityStatus::Ok,
            asset_class: class.map(|c| c.to_string()),
            quantity_current: value,
            quantity_buy: value,
            average_cost: None,
            target_weight_pct: None,
            market_value_base: value,
            invested_value_base: None,
            gain_base: None,
            gain_pct: None,
            portfolio_ids: vec!["A".to_string()],
            country_weights: std::collections::HashMap::new(),
        }
    }

    fn target(class: &str, pct: Decimal, band: Decimal) -> TargetAllocation {
        TargetAllocation {
            portfolio_id: "ALL".to_string(),
            asset_class: class.to_string(),
            target_pct: pct,
            tolerance_band: Some(band),
        }
    }

    #[test]
    fn test_classification_boundaries_for_band_of_four() {
        assert_eq!(classify_drift(dec!(1.9), dec!(4)), DriftStatus::Ok);
        assert_eq!(classify_drift(dec!(2.1), dec!(4)), DriftStatus::Warning);
        assert_eq!(classify_drift(dec!(4.1), dec!(4)), DriftStatus::Breach);
        assert_eq!(classify_drift(dec!(-2.1), dec!(4)), DriftStatus::Warning);
        // Boundary values sit inside the lower bucket.
        assert_eq!(classify_drift(dec!(2), dec!(4)), DriftStatus::Ok);
        assert_eq!(classify_drift(dec!(4), dec!(4)), DriftStatus::Warning);
    }

    #[test]
    fn test_drift_against_targets() {
        let service = DriftService::new();
        let holdings = vec![
            holding("H1", Some("EQUITY"), dec!(65)),
            holding("H2", Some("BOND"), dec!(35)),
        ];
        let targets = vec![
            target("EQUITY", dec!(60), dec!(4)),
            target("BOND", dec!(40), dec!(4)),
        ];

        let report = service.assess(&holdings, &targets);
        assert_eq!(report.assessments.len(), 2);

        let equity = &report.assessments[0];
        assert_eq!(equity.drift_pct, Some(dec!(5)));
        assert_eq!(equity.status, DriftStatus::Breach);

        let bond = &report.assessments[1];
        assert_eq!(bond.drift_pct, Some(dec!(-5)));
        assert_eq!(bond.status, DriftStatus::Breach);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_unclassified_bucket_breaches_above_threshold() {
        let service = DriftService::new();
        let holdings = vec![
            holding("H1", Some("EQUITY"), dec!(85)),
            holding("H2", None, dec!(15)),
        ];

        let report = service.assess(&holdings, &[]);
        let unknown = report
            .assessments
            .iter()
            .find(|a| a.asset_class == UNCLASSIFIED_CLASS)
            .unwrap();
        assert_eq!(unknown.current_pct, dec!(15));
        assert_eq!(unknown.status, DriftStatus::Breach);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_small_unclassified_share_is_ok() {
        let service = DriftService::new();
        let holdings = vec![
            holding("H1", Some("EQUITY"), dec!(95)),
            holding("H2", None, dec!(5)),
        ];

        let report = service.assess(&holdings, &[]);
        let unknown = report
            .assessments
            .iter()
            .find(|a| a.asset_class == UNCLASSIFIED_CLASS)
            .unwrap();
        assert_eq!(unknown.status, DriftStatus::Ok);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_target_sum_off_100_raises_warning() {
        let service = DriftService::new();
        let holdings = vec![holding("H1", Some("EQUITY"), dec!(100))];
        let targets = vec![target("EQUITY", dec!(90), dec!(4))];

        let report = service.assess(&holdings, &targets);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("sum to 90%")));
    }

    #[test]
    fn test_target_without_holdings_assesses_at_zero() {
        let service = DriftService::new();
        let holdings = vec![holding("H1", Some("EQUITY"), dec!(100))];
        let targets = vec![
            target("EQUITY", dec!(60), dec!(4)),
            target("GOLD", dec!(40), dec!(4)),
        ];

        let report = service.assess(&holdings, &targets);
        let gold = report
            .assessments
            .iter()
            .find(|a| a.asset_class == "GOLD")
            .unwrap();
        assert_eq!(gold.current_pct, Decimal::ZERO);
        assert_eq!(gold.drift_pct, Some(dec!(-40)));
        assert_eq!(gold.status, DriftStatus::Breach);
    }

    #[test]
    fn test_untargeted_class_stays_visible() {
        let service = DriftService::new();
        let holdings = vec![
            holding("H1", Some("EQUITY"), dec!(90)),
            holding("H2", Some("CRYPTO"), dec!(10)),
        ];
        let targets = vec![target("EQUITY", dec!(90), dec!(4))];

        let report = service.assess(&holdings, &targets);
        let crypto = report
            .assessments
            .iter()
            .find(|a| a.asset_class == "CRYPTO")
            .unwrap();
        assert_eq!(crypto.current_pct, dec!(10));
        assert_eq!(crypto.target_pct, None);
        assert_eq!(crypto.status, DriftStatus::Ok);
    }

    #[test]
    fn test_zero_total_yields_empty_report_with_warning() {
        let service = DriftService::new();
        let report = service.assess(&[], &[target("EQUITY", dec!(100), dec!(4))]);
        assert!(report.assessments.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }
}
