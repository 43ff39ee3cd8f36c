mod error;
mod registry;
mod types;

pub use error::FleetError;
pub use registry::Fleet;
pub use types::{SatelliteId, SatelliteRecord, SatelliteStatus};
