//! Purchase price in USD: observed price first, then a per-site default.

use climateguard_core::constants::{DEFAULT_PRICE_USD, MAX_OBSERVED_PRICE_USD};
use climateguard_core::PageSignal;

/// Typical basket price per storefront, checked in order against the host.
const SITE_PRICES: &[(&str, f64)] = &[
    ("amazon", 45.0),
    ("ebay", 35.0),
    ("walmart", 30.0),
    ("target", 25.0),
    ("bestbuy", 85.0),
    ("apple", 120.0),
    ("nike", 80.0),
    ("adidas", 70.0),
];

/// Never fails; the result is always positive and finite.
pub fn estimate_price(signal: &PageSignal) -> f64 {
    if let Some(observed) = signal
        .prices
        .iter()
        .copied()
        .find(|p| p.is_finite() && *p > 0.0 && *p < MAX_OBSERVED_PRICE_USD)
    {
        return observed;
    }
    site_default_price(&signal.site_host)
}

pub fn site_default_price(site_host: &str) -> f64 {
    let host = site_host.to_lowercase();
    SITE_PRICES
        .iter()
        .find(|(key, _)| host.contains(key))
        .map(|(_, price)| *price)
        .unwrap_or(DEFAULT_PRICE_USD)
}
