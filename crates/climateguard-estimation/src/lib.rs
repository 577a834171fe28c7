//! # climateguard-estimation
//!
//! Turns a [`PageSignal`](climateguard_core::PageSignal) into a carbon figure.
//!
//! - [`classifier`]: free text to emission category
//! - [`price`]: observed or site-default price in USD
//! - [`heuristic`]: local keyword-table estimate with seeded jitter
//! - [`remote`]: HTTP client for the estimation authority
//! - [`service`]: remote-first estimation with local fallback
//! - [`scan`]: generation tickets that suppress stale completions

pub mod classifier;
pub mod heuristic;
pub mod price;
pub mod remote;
pub mod scan;
pub mod service;

pub use classifier::classify;
pub use heuristic::LocalHeuristic;
pub use price::estimate_price;
pub use remote::ClimatiqClient;
pub use scan::{ScanGeneration, ScanTicket};
pub use service::CarbonEstimationService;
