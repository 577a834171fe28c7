//! # climateguard-ledger
//!
//! The offset ledger and everything that observes it.
//!
//! - [`OffsetLedger`]: bounded newest-first history plus cumulative stats
//! - [`window`] / [`retention`]: time-based views and pruning
//! - [`EventBroadcaster`]: fan-out of ledger notifications
//! - [`LedgerMirror`]: the display surface's de-duplicated copy

pub mod broadcast;
pub mod ledger;
pub mod mirror;
pub mod retention;
pub mod window;

pub use broadcast::{EventBroadcaster, LedgerNotification};
pub use ledger::OffsetLedger;
pub use mirror::{LedgerMirror, LiveSummary};
