use log::warn;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::CurrencyRate;

/// Lookup of quote-currency to base-currency multipliers built from one
/// currency snapshot.
///
/// The base currency itself always rates at 1. An unknown currency also
/// rates at 1: a single missing FX quote must not blank out an entire
/// holding's valuation, so the gap is logged as a data-quality concern
/// and the amount passes through unconverted.
pub struct RateTable {
    base: String,
    rates: HashMap<String, Decimal>,
}

impl RateTable {
    pub fn new(base_currency: &str, rows: &[CurrencyRate]) -> Self {
        let base = base_currency.trim().to_uppercase();
        let mut rates = HashMap::new();

        for row in rows {
            let rate = match row.rate_to_base {
                Some(rate) if rate > Decimal::ZERO => rate,
                _ => {
                    warn!(
                        "RateTable: ignoring currency {} with missing or non-positive rate",
                        row.code
                    );
                    continue;
                }
            };
            rates.insert(row.code.clone(), rate);
        }

        rates.insert(base.clone(), Decimal::ONE);

        RateTable { base, rates }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Multiplier from `code` to the base currency. Unknown codes fall
    /// open to 1.
    pub fn rate(&self, code: &str) -> Decimal {
        let normalized = code.trim().to_uppercase();
        match self.rates.get(&normalized) {
            Some(rate) => *rate,
            None => {
                warn!(
                    "RateTable: no rate for {} -> {}, treating amount as already in base units",
                    normalized, self.base
                );
                Decimal::ONE
            }
        }
    }

    /// Converts an amount quoted in `code` into base units.
    pub fn to_base(&self, amount: Decimal, code: &str) -> Decimal {
        amount * self.rate(code)
    }
}
