//! Fixed conversion factors and ledger limits.

/// Every estimate and every recorded offset carries at least this much carbon.
pub const MIN_CARBON_KG: f64 = 5.0;

/// Carbon absorbed per tree-equivalent.
pub const KG_PER_TREE: f64 = 5.0;

/// Donation recorded per kilogram offset.
pub const USD_PER_KG: f64 = 0.1;

/// Average passenger-car emissions per mile driven.
pub const KG_PER_MILE: f64 = 0.16;

/// Remote authority returns tonnes; the ledger works in kilograms.
pub const KG_PER_TONNE: f64 = 1000.0;

/// Observed prices outside `(0, MAX_OBSERVED_PRICE_USD)` are ignored.
pub const MAX_OBSERVED_PRICE_USD: f64 = 10_000.0;

/// Fallback price when neither an observed price nor a site default applies.
pub const DEFAULT_PRICE_USD: f64 = 25.0;

/// Retained history length (display cache).
pub const HISTORY_CAP: usize = 100;

/// Trailing window for live-activity queries.
pub const RECENT_WINDOW_SECS: i64 = 5 * 60;

/// Retention age for the history log.
pub const RETENTION_DAYS: i64 = 7;

/// Cadence of retention pruning.
pub const PRUNE_INTERVAL_SECS: u64 = 60 * 60;

/// Cadence of the display surface's reconcile poll.
pub const POLL_INTERVAL_MS: u64 = 2_000;

/// Display-side activity feed length.
pub const ACTIVITY_CAP: usize = 20;

/// Remote estimation timeout.
pub const REMOTE_TIMEOUT_MS: u64 = 10_000;

/// Remote estimation endpoint used when none is configured.
pub const DEFAULT_ESTIMATE_ENDPOINT: &str = "https://beta3.api.climatiq.io/estimate";

/// Environment variable holding the remote authority credential.
pub const DEFAULT_API_KEY_ENV: &str = "CLIMATIQ_API_KEY";

/// Placeholder labels for offsets whose page exposed no product name.
pub const MANUAL_PRODUCT_PLACEHOLDER: &str = "Unknown Product";
pub const AUTO_PRODUCT_PLACEHOLDER: &str = "Auto Purchase";

/// Persistence bucket names.
pub mod buckets {
    pub const CARBON_STATS: &str = "carbonStats";
    pub const RECENT_OFFSETS: &str = "recentOffsets";
    pub const AUTO_OFFSET_ENABLED: &str = "autoOffsetEnabled";
}
