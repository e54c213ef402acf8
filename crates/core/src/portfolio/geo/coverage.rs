use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Exchange-suffix conventions used when an instrument carries no
/// coverage map. An unadorned 1-5 letter ticker is assumed US-listed.
const SUFFIX_COUNTRIES: &[(&str, &str)] = &[
    ("PA", "FR"),
    ("L", "GB"),
    ("DE", "DE"),
    ("F", "DE"),
    ("SW", "CH"),
    ("MI", "IT"),
    ("AS", "NL"),
    ("MC", "ES"),
    ("BR", "BE"),
    ("T", "JP"),
    ("TO", "CA"),
    ("HK", "HK"),
    ("AX", "AU"),
];

/// Single-country 100% map derived from the ticker's exchange suffix, or
/// an empty map when no convention applies.
pub fn fallback_coverage(ticker: &str) -> HashMap<String, Decimal> {
    let ticker = ticker.trim().to_uppercase();

    if let Some((_, suffix)) = ticker.rsplit_once('.') {
        if let Some((_, country)) = SUFFIX_COUNTRIES.iter().find(|(s, _)| *s == suffix) {
            return HashMap::from([(country.to_string(), dec!(100))]);
        }
        return HashMap::new();
    }

    if (1..=5).contains(&ticker.len()) && ticker.chars().all(|c| c.is_ascii_alphabetic()) {
        return HashMap::from([("US".to_string(), dec!(100))]);
    }

    HashMap::new()
}

/// Normalizes a raw country-weight map to percentages summing to 100.
///
/// Non-positive weights are dropped first. The remaining weights may be
/// fractions (sum <= 1.5) or percentages that drifted off 100; either way
/// they are rescaled over the positive entries only. A missing or
/// fully-filtered map falls back to the ticker's exchange convention, and
/// an empty result is an empty map, not an error.
pub fn normalize_coverage(
    raw: Option<&HashMap<String, Decimal>>,
    ticker: &str,
) -> HashMap<String, Decimal> {
    let positive: HashMap<String, Decimal> = raw
        .map(|map| {
            map.iter()
                .filter(|(_, weight)| **weight > Decimal::ZERO)
                .map(|(country, weight)| (country.trim().to_uppercase(), *weight))
                .collect()
        })
        .unwrap_or_default();

    let entries = if positive.is_empty() {
        fallback_coverage(ticker)
    } else {
        positive
    };

    let sum: Decimal = entries.values().sum();
    if sum <= Decimal::ZERO {
        return HashMap::new();
    }

    entries
        .into_iter()
        .map(|(country, weight)| (country, weight * dec!(100) / sum))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_map_scales_to_percentages() {
        let raw = HashMap::from([("US".to_string(), dec!(0.7)), ("JP".to_string(), dec!(0.3))]);
        let normalized = normalize_coverage(Some(&raw), "IWDA.AS");
        assert_eq!(normalized.get("US"), Some(&dec!(70)));
        assert_eq!(normalized.get("JP"), Some(&dec!(30)));
    }

    #[test]
    fn test_percent_map_renormalizes_over_positive_entries() {
        let raw = HashMap::from([
            ("FR".to_string(), dec!(60)),
            ("US".to_string(), dec!(20)),
            ("XX".to_string(), dec!(-5)),
        ]);
        let normalized = normalize_coverage(Some(&raw), "MC.PA");
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized.get("FR"), Some(&dec!(75)));
        assert_eq!(normalized.get("US"), Some(&dec!(25)));
    }

    #[test]
    fn test_missing_map_uses_suffix_convention() {
        let normalized = normalize_coverage(None, "MC.PA");
        assert_eq!(normalized.get("FR"), Some(&dec!(100)));

        let normalized = normalize_coverage(None, "AAPL");
        assert_eq!(normalized.get("US"), Some(&dec!(100)));
    }

    #[test]
    fn test_unknown_suffix_and_long_ticker_yield_empty() {
        assert!(normalize_coverage(None, "SOMETHING.XX").is_empty());
        assert!(normalize_coverage(None, "ABCDEFGH").is_empty());
        assert!(normalize_coverage(None, "BTC-USD").is_empty());
    }

    #[test]
    fn test_all_filtered_map_falls_back() {
        let raw = HashMap::from([("FR".to_string(), Decimal::ZERO)]);
        let normalized = normalize_coverage(Some(&raw), "AI.PA");
        assert_eq!(normalized.get("FR"), Some(&dec!(100)));
    }
}
