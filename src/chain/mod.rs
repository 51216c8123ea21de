//! Chain time: snapshots, per-network constants, and height/time math.

pub mod clock;
pub mod params;
pub mod provider;
pub mod snapshot;

pub use clock::{height_at, measure_rate, time_at, ChainClock};
pub use params::NetworkParams;
pub use provider::{measure_recent_rate, ChainDataProvider, StaticChainData};
pub use snapshot::Snapshot;
