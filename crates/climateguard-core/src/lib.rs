//! # climateguard-core
//!
//! Foundation crate for ClimateGuard.
//! Defines the shared models, traits, errors, config, constants and tracing
//! setup. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod observability;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ClimateGuardConfig;
pub use errors::{ClimateGuardError, ClimateGuardResult, EstimationError, PersistenceError};
pub use models::{
    AggregateStats, CarbonEstimate, EmissionCategory, EmissionFactor, ImpactEquivalents,
    OffsetEvent, OffsetId, OffsetKind, PageSignal,
};
