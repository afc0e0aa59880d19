use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_REGION: &str = "default";
pub const INDIA_REGION: &str = "IN";

/// Pricing region: an upper-case ISO country code or [`DEFAULT_REGION`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RegionCode(String);

// Backend keys are matched against upper-cased geolocation codes
impl<'de> Deserialize<'de> for RegionCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(RegionCode::normalise(&raw))
    }
}

impl RegionCode {
    pub fn default_region() -> Self {
        RegionCode(DEFAULT_REGION.to_string())
    }

    pub fn india() -> Self {
        RegionCode(INDIA_REGION.to_string())
    }

    /// Accepts two ASCII letters in any case, surrounded by whitespace or not.
    pub fn from_country_code(raw: &str) -> Option<Self> {
        let code = raw.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(RegionCode(code.to_ascii_uppercase()))
        } else {
            None
        }
    }

    /// `default` in any case stays the default region, everything else is
    /// trimmed and upper-cased.
    pub fn normalise(raw: &str) -> Self {
        let code = raw.trim();
        if code.eq_ignore_ascii_case(DEFAULT_REGION) {
            RegionCode::default_region()
        } else {
            RegionCode(code.to_ascii_uppercase())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_india(&self) -> bool {
        self.0 == INDIA_REGION
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutUrls {
    #[serde(default)]
    pub monthly: Option<String>,
    #[serde(default)]
    pub annual: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionPricing {
    pub currency: String,
    pub symbol: String,
    pub monthly: f64,
    pub annual: f64,
    #[serde(rename = "checkoutUrls", default)]
    pub checkout_urls: CheckoutUrls,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub regions: BTreeMap<RegionCode, RegionPricing>,
}

impl PricingConfig {
    /// Used whenever the backend can't be reached or answers with garbage.
    pub fn fallback() -> Self {
        let mut regions = BTreeMap::new();
        regions.insert(
            RegionCode::default_region(),
            RegionPricing {
                currency: "USD".to_string(),
                symbol: "$".to_string(),
                monthly: 2.0,
                annual: 15.0,
                checkout_urls: CheckoutUrls {
                    monthly: Some("#checkout-monthly".to_string()),
                    annual: Some("#checkout-annual".to_string()),
                },
            },
        );
        regions.insert(
            RegionCode::india(),
            RegionPricing {
                currency: "INR".to_string(),
                symbol: "₹".to_string(),
                monthly: 99.0,
                annual: 799.0,
                checkout_urls: CheckoutUrls {
                    monthly: Some("#checkout-monthly".to_string()),
                    annual: Some("#checkout-annual".to_string()),
                },
            },
        );
        PricingConfig { regions }
    }

    /// Names the first region whose amounts are negative or not numbers.
    pub fn invalid_region(&self) -> Option<&RegionCode> {
        self.regions
            .iter()
            .find(|(_, p)| ![p.monthly, p.annual].iter().all(|a| a.is_finite() && *a >= 0.0))
            .map(|(code, _)| code)
    }

    /// The entry for `region`, or the default entry when the region has none.
    pub fn for_region(&self, region: &RegionCode) -> Option<&RegionPricing> {
        self.regions
            .get(region)
            .or_else(|| self.regions.get(&RegionCode::default_region()))
    }
}

/// Envelope the backend wraps its answers in.
#[derive(Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
}
