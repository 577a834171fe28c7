//! # climateguard-runtime
//!
//! Wires the estimation service and the ledger into running tasks.
//!
//! - [`messages`]: closed request/response enums decoded at the transport edge
//! - [`authority`]: the single task that owns the ledger
//! - [`scanner`]: page scans with stale-result suppression and offset triggers
//! - [`display`]: the display surface's push + poll sync loop

pub mod authority;
pub mod display;
pub mod messages;
pub mod scanner;

pub use authority::{spawn_authority, AuthorityHandle};
pub use display::{spawn_display_sync, DisplayHandle};
pub use messages::{OffsetRequest, Request, Response};
pub use scanner::{ScanOutcome, ScanSurface};
