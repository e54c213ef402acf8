use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display metadata for one country: name and map centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Countries appearing in instrument coverage maps. Unknown codes render
/// with the code itself and a (0, 0) centroid rather than being dropped.
const COUNTRIES: &[CountryInfo] = &[
    CountryInfo { code: "US", name: "United States", latitude: 39.8, longitude: -98.6 },
    CountryInfo { code: "FR", name: "France", latitude: 46.2, longitude: 2.2 },
    CountryInfo { code: "GB", name: "United Kingdom", latitude: 54.0, longitude: -2.0 },
    CountryInfo { code: "DE", name: "Germany", latitude: 51.2, longitude: 10.4 },
    CountryInfo { code: "CH", name: "Switzerland", latitude: 46.8, longitude: 8.2 },
    CountryInfo { code: "IT", name: "Italy", latitude: 42.8, longitude: 12.8 },
    CountryInfo { code: "ES", name: "Spain", latitude: 40.3, longitude: -3.7 },
    CountryInfo { code: "NL", name: "Netherlands", latitude: 52.2, longitude: 5.3 },
    CountryInfo { code: "BE", name: "Belgium", latitude: 50.6, longitude: 4.7 },
    CountryInfo { code: "SE", name: "Sweden", latitude: 62.0, longitude: 15.0 },
    CountryInfo { code: "DK", name: "Denmark", latitude: 56.0, longitude: 10.0 },
    CountryInfo { code: "NO", name: "Norway", latitude: 61.0, longitude: 9.0 },
    CountryInfo { code: "FI", name: "Finland", latitude: 64.0, longitude: 26.0 },
    CountryInfo { code: "IE", name: "Ireland", latitude: 53.4, longitude: -8.2 },
    CountryInfo { code: "PT", name: "Portugal", latitude: 39.6, longitude: -8.0 },
    CountryInfo { code: "AT", name: "Austria", latitude: 47.6, longitude: 14.1 },
    CountryInfo { code: "JP", name: "Japan", latitude: 36.2, longitude: 138.3 },
    CountryInfo { code: "CN", name: "China", latitude: 35.9, longitude: 104.2 },
    CountryInfo { code: "HK", name: "Hong Kong", latitude: 22.3, longitude: 114.2 },
    CountryInfo { code: "TW", name: "Taiwan", latitude: 23.7, longitude: 121.0 },
    CountryInfo { code: "KR", name: "South Korea", latitude: 36.5, longitude: 127.8 },
    CountryInfo { code: "IN", name: "India", latitude: 21.0, longitude: 78.0 },
    CountryInfo { code: "SG", name: "Singapore", latitude: 1.35, longitude: 103.8 },
    CountryInfo { code: "AU", name: "Australia", latitude: -25.3, longitude: 133.8 },
    CountryInfo { code: "NZ", name: "New Zealand", latitude: -41.8, longitude: 171.8 },
    CountryInfo { code: "CA", name: "Canada", latitude: 56.1, longitude: -106.3 },
    CountryInfo { code: "MX", name: "Mexico", latitude: 23.6, longitude: -102.5 },
    CountryInfo { code: "BR", name: "Brazil", latitude: -14.2, longitude: -51.9 },
    CountryInfo { code: "ZA", name: "South Africa", latitude: -29.0, longitude: 24.0 },
    CountryInfo { code: "IL", name: "Israel", latitude: 31.4, longitude: 35.0 },
];

/// Looks up display metadata for an ISO-3166 alpha-2 code.
pub fn country_info(code: &str) -> Option<&'static CountryInfo> {
    COUNTRIES.iter().find(|c| c.code == code)
}

/// Country-level exposure for the geographic breakdown table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryExposure {
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Total exposure in base currency.
    pub exposure_base: Decimal,
    /// Share of the grand total across all countries, in percent.
    pub exposure_pct: Decimal,
    /// Exposure-weighted performance for the requested horizon.
    pub performance: Option<Decimal>,
    /// Number of instruments contributing exposure to this country.
    pub instrument_count: usize,
}

/// Lighter view of a country exposure for map rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRegion {
    pub code: String,
    /// Exposure share normalized to 0-100.
    pub exposure_share: Decimal,
    pub performance: Option<Decimal>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&CountryExposure> for MarketRegion {
    fn from(exposure: &CountryExposure) -> Self {
        MarketRegion {
            code: exposure.code.clone(),
            exposure_share: exposure.exposure_pct,
            performance: exposure.performance,
            latitude: exposure.latitude,
            longitude: exposure.longitude,
        }
    }
}
