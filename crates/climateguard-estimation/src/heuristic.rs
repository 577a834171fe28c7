//! Local carbon heuristic: a keyword table of base and spread figures.
//!
//! Each product gets `base + jitter * spread` from its first matching rule,
//! and the page estimate is the mean across products. Pages without products
//! fall back to a per-site figure. Jitter comes from a seedable RNG so tests
//! and replays are reproducible.

use std::sync::Mutex;

use climateguard_core::models::clamp_carbon;
use climateguard_core::PageSignal;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

struct HeuristicRule {
    keywords: &'static [&'static str],
    base_kg: f64,
    spread_kg: f64,
}

const fn rule(keywords: &'static [&'static str], base_kg: f64, spread_kg: f64) -> HeuristicRule {
    HeuristicRule {
        keywords,
        base_kg,
        spread_kg,
    }
}

const RULES: &[HeuristicRule] = &[
    rule(&["iphone", "samsung", "phone", "smartphone", "mobile"], 60.0, 40.0),
    rule(&["laptop", "macbook", "computer", "notebook"], 200.0, 100.0),
    rule(&["tablet", "ipad", "surface"], 80.0, 40.0),
    rule(&["tv", "television", "monitor", "display"], 120.0, 80.0),
    rule(&["camera", "dslr", "mirrorless"], 50.0, 30.0),
    rule(&["shirt", "tshirt", "t-shirt"], 8.0, 6.0),
    rule(&["jeans", "pants", "trousers"], 15.0, 10.0),
    rule(&["shoes", "sneakers", "footwear"], 12.0, 8.0),
    rule(&["jacket", "coat", "hoodie"], 20.0, 15.0),
    rule(&["dress", "skirt", "blouse"], 10.0, 8.0),
    rule(&["chair", "sofa", "couch"], 30.0, 20.0),
    rule(&["table", "desk"], 25.0, 15.0),
    rule(&["bed", "mattress"], 40.0, 30.0),
    rule(&["book", "novel", "magazine"], 2.0, 3.0),
    rule(&["game", "console", "playstation", "xbox"], 15.0, 10.0),
    rule(&["food", "grocery", "snack"], 1.0, 2.0),
];

static DEFAULT_RULE: HeuristicRule = rule(&[], 10.0, 15.0);

/// Per-site figure for pages with no product names.
const SITE_CARBON: &[(&str, f64)] = &[
    ("amazon", 25.0),
    ("ebay", 20.0),
    ("walmart", 15.0),
    ("target", 12.0),
    ("bestbuy", 45.0),
    ("apple", 80.0),
    ("nike", 15.0),
    ("adidas", 12.0),
];

const DEFAULT_SITE_CARBON_KG: f64 = 10.0;

/// Site figures get up to this fraction of the base as jitter.
const SITE_JITTER_FRACTION: f64 = 0.2;

fn rule_for(product: &str) -> &'static HeuristicRule {
    let lower = product.to_lowercase();
    RULES
        .iter()
        .find(|r| r.keywords.iter().any(|k| lower.contains(k)))
        .unwrap_or(&DEFAULT_RULE)
}

/// Base figure and spread for one product text.
pub fn product_range(product: &str) -> (f64, f64) {
    let r = rule_for(product);
    (r.base_kg, r.spread_kg)
}

pub fn site_base_carbon(site_host: &str) -> f64 {
    let host = site_host.to_lowercase();
    SITE_CARBON
        .iter()
        .find(|(key, _)| host.contains(key))
        .map(|(_, kg)| *kg)
        .unwrap_or(DEFAULT_SITE_CARBON_KG)
}

/// Keyword-table estimator. Never fails.
pub struct LocalHeuristic {
    rng: Mutex<StdRng>,
}

impl LocalHeuristic {
    /// `Some(seed)` makes the jitter sequence reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Estimated kilograms for the page, clamped to the recordable minimum.
    pub fn estimate(&self, signal: &PageSignal) -> f64 {
        let raw = if signal.products.is_empty() {
            let base = site_base_carbon(&signal.site_host);
            base + self.jitter() * base * SITE_JITTER_FRACTION
        } else {
            let total: f64 = signal
                .products
                .iter()
                .map(|p| {
                    let r = rule_for(p);
                    r.base_kg + self.jitter() * r.spread_kg
                })
                .sum();
            total / signal.products.len() as f64
        };
        clamp_carbon(raw)
    }

    /// Uniform in `[0, 1)`.
    fn jitter(&self) -> f64 {
        // A poisoned lock only means another thread panicked mid-draw; the
        // generator state is still usable.
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.gen::<f64>()
    }
}

impl Default for LocalHeuristic {
    fn default() -> Self {
        Self::new(None)
    }
}
