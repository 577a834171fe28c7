mod event_sink;
mod offset_store;
mod remote_estimator;

pub use event_sink::IEventSink;
pub use offset_store::{IOffsetStore, StoreHealth};
pub use remote_estimator::{EstimateRequest, IRemoteEstimator, SpendParameters};
