use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Product texts of this many characters or more are page copy, not names.
const MAX_PRODUCT_TEXT_CHARS: usize = 200;

/// At most this many product candidates are kept per scan.
const MAX_PRODUCTS: usize = 10;

/// Scraped prices at or above this are discarded at construction.
const MAX_SCRAPED_PRICE_USD: f64 = 100_000.0;

/// Navigation text that matches product selectors on most storefronts.
const NAVIGATION_TERMS: &[&str] = &[
    "home",
    "menu",
    "search",
    "login",
    "sign in",
    "account",
    "cart",
    "checkout",
    "welcome",
    "categories",
    "filter",
    "sort by",
    "price",
    "contact",
    "about",
    "help",
];

const SHOPPING_HOSTS: &[&str] = &[
    "amazon",
    "ebay",
    "walmart",
    "target",
    "bestbuy",
    "etsy",
    "aliexpress",
    "shopify",
    "apple",
    "nike",
    "adidas",
];

fn price_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\$?(\d+(?:\.\d{2})?)").ok())
        .as_ref()
}

/// What the scan surface saw on one page. Immutable per scan; may be empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSignal {
    pub site_host: String,
    /// Document order; the first entry is the primary product.
    pub products: Vec<String>,
    pub prices: Vec<f64>,
}

impl PageSignal {
    pub fn new(site_host: impl Into<String>, products: Vec<String>, prices: Vec<f64>) -> Self {
        Self {
            site_host: site_host.into(),
            products,
            prices,
        }
    }

    /// Build a signal from raw scraper output: filters navigation text,
    /// de-duplicates names and parses price strings.
    pub fn from_raw<P, Q>(site_host: impl Into<String>, product_texts: P, price_texts: Q) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        Q: IntoIterator,
        Q::Item: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let products = product_texts
            .into_iter()
            .filter_map(|t| {
                let text = t.as_ref().trim();
                is_product_text(text).then(|| text.to_string())
            })
            .filter(|t| seen.insert(t.clone()))
            .take(MAX_PRODUCTS)
            .collect();

        let prices = price_texts
            .into_iter()
            .filter_map(|t| parse_price(t.as_ref()))
            .collect();

        Self {
            site_host: site_host.into(),
            products,
            prices,
        }
    }

    pub fn primary_product(&self) -> Option<&str> {
        self.products.first().map(String::as_str)
    }

    pub fn has_products(&self) -> bool {
        !self.products.is_empty()
    }

    /// Whether the host belongs to a known storefront.
    pub fn is_shopping_site(&self) -> bool {
        let host = self.site_host.to_lowercase();
        SHOPPING_HOSTS.iter().any(|s| host.contains(s))
    }

    /// Known storefront, or any page exposing products or prices.
    pub fn has_shopping_content(&self) -> bool {
        self.is_shopping_site() || self.has_products() || !self.prices.is_empty()
    }

    /// Short site label for display: `www.amazon.com` becomes `amazon`.
    pub fn display_site(&self) -> &str {
        let host = self.site_host.strip_prefix("www.").unwrap_or(&self.site_host);
        host.split('.').next().unwrap_or(host)
    }
}

fn is_product_text(text: &str) -> bool {
    if text.is_empty() || text.chars().count() >= MAX_PRODUCT_TEXT_CHARS {
        return false;
    }
    let lower = text.to_lowercase();
    !NAVIGATION_TERMS.iter().any(|term| lower.contains(term))
}

fn parse_price(text: &str) -> Option<f64> {
    let caps = price_pattern()?.captures(text)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    (value > 0.0 && value < MAX_SCRAPED_PRICE_USD).then_some(value)
}
