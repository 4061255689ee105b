//! Submitter configuration (environment-driven).

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PRICE_UNIT: &str = "USD";

/// Where and how drafts are submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitterConfig {
    /// Base URL of the product service; `/api/product` is appended.
    pub api_url: String,
    pub timeout: Duration,
    /// Sent as `priceUnit` with every submission.
    pub price_unit: String,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            price_unit: DEFAULT_PRICE_UNIT.to_string(),
        }
    }
}

impl SubmitterConfig {
    /// Read `SKUFORGE_API_URL`, `SKUFORGE_TIMEOUT_SECS` and
    /// `SKUFORGE_PRICE_UNIT`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SubmitterConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("SKUFORGE_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }

        if let Some(raw) = lookup("SKUFORGE_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    value = %raw,
                    "SKUFORGE_TIMEOUT_SECS is not a positive integer; using {DEFAULT_TIMEOUT_SECS}s"
                ),
            }
        }

        if let Some(unit) = lookup("SKUFORGE_PRICE_UNIT").filter(|v| !v.trim().is_empty()) {
            config.price_unit = unit.trim().to_string();
        }

        config
    }
}
