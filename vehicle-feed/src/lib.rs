pub mod fleet;
pub mod report;
pub mod seed;
pub mod types;

pub use seed::{MockSeeds, SeedRow, SeedSource};
pub use types::driver::{DriverTrip, FixedLocation, LocationSource, TripStatus};
pub use types::feed::{FeedConfig, VehicleFeed};
pub use types::sim_error::SimError;
pub use types::snapshot::VehicleSnapshot;
pub use types::vehicle::{City, Occupancy, TransportMode, Vehicle, VehicleType, FALLBACK_CENTER};
