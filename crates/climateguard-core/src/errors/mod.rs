mod climateguard_error;
mod estimation_error;
mod persistence_error;
pub mod recovery;

pub use climateguard_error::{ClimateGuardError, ClimateGuardResult};
pub use estimation_error::{EstimationError, EstimationResult};
pub use persistence_error::{PersistenceError, PersistenceResult};
pub use recovery::RecoveryAction;
