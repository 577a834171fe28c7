mod category;
mod estimate;
mod factor;
mod offset_event;
mod page_signal;
mod stats;

pub use category::EmissionCategory;
pub use estimate::{CarbonEstimate, ImpactEquivalents};
pub use factor::EmissionFactor;
pub use offset_event::{clamp_carbon, OffsetEvent, OffsetId, OffsetKind};
pub use page_signal::PageSignal;
pub use stats::AggregateStats;
