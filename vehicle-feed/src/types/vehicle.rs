use super::sim_error::SimError;

/// Coordinate pair used whenever no real position is available: the map
/// default before a city is chosen, the dashboard fleet center, and the
/// driver location fallback.
pub const FALLBACK_CENTER: (f64, f64) = (37.7749, -122.4194);

/// Cities covered by the mock data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    Mumbai,
    Bangalore,
    Delhi,
}

impl City {
    pub const ALL: [City; 3] = [City::Mumbai, City::Bangalore, City::Delhi];

    pub fn as_str(&self) -> &'static str {
        match self {
            City::Mumbai => "mumbai",
            City::Bangalore => "bangalore",
            City::Delhi => "delhi",
        }
    }

    pub fn from_str(city: &str) -> Result<City, SimError> {
        match city.to_lowercase().as_str() {
            "mumbai" => Ok(City::Mumbai),
            "bangalore" => Ok(City::Bangalore),
            "delhi" => Ok(City::Delhi),
            _ => Err(SimError::Other(format!("Unknown city: {}", city))),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            City::Mumbai => "Mumbai",
            City::Bangalore => "Bangalore",
            City::Delhi => "Delhi",
        }
    }

    /// Map center for the city, as (latitude, longitude).
    pub fn center(&self) -> (f64, f64) {
        match self {
            City::Mumbai => (19.0760, 72.8777),
            City::Bangalore => (12.9716, 77.5946),
            City::Delhi => (28.6139, 77.2090),
        }
    }
}

/// Transport modes a traveler can filter on. Seed data exists per mode;
/// `Monorail` vehicles only appear in the generated dashboard fleet, so it
/// is a [`VehicleType`] but not a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Bus,
    Metro,
    Train,
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] =
        [TransportMode::Bus, TransportMode::Metro, TransportMode::Train];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Bus => "bus",
            TransportMode::Metro => "metro",
            TransportMode::Train => "train",
        }
    }

    pub fn from_str(mode: &str) -> Result<TransportMode, SimError> {
        match mode.to_lowercase().as_str() {
            "bus" => Ok(TransportMode::Bus),
            "metro" => Ok(TransportMode::Metro),
            "train" => Ok(TransportMode::Train),
            _ => Err(SimError::Other(format!("Unknown transport mode: {}", mode))),
        }
    }

    pub fn vehicle_type(&self) -> VehicleType {
        match self {
            TransportMode::Bus => VehicleType::Bus,
            TransportMode::Metro => VehicleType::Metro,
            TransportMode::Train => VehicleType::Train,
        }
    }
}

/// Kind of vehicle, drives the marker fill color and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    Bus,
    Metro,
    Train,
    Monorail,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Bus,
        VehicleType::Metro,
        VehicleType::Train,
        VehicleType::Monorail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Bus => "bus",
            VehicleType::Metro => "metro",
            VehicleType::Train => "train",
            VehicleType::Monorail => "monorail",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VehicleType::Bus => "Bus",
            VehicleType::Metro => "Metro",
            VehicleType::Train => "Train",
            VehicleType::Monorail => "Monorail",
        }
    }

    /// Marker label: first letter of the kind, uppercased.
    pub fn label(&self) -> char {
        match self {
            VehicleType::Bus => 'B',
            VehicleType::Metro => 'M',
            VehicleType::Train => 'T',
            VehicleType::Monorail => 'M',
        }
    }

    /// The mode this kind is seeded under, if any.
    pub fn transport_mode(&self) -> Option<TransportMode> {
        match self {
            VehicleType::Bus => Some(TransportMode::Bus),
            VehicleType::Metro => Some(TransportMode::Metro),
            VehicleType::Train => Some(TransportMode::Train),
            VehicleType::Monorail => None,
        }
    }
}

/// Ordinal crowding level, Low < Medium < Full. Drives the marker ring color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Occupancy {
    Low,
    Medium,
    Full,
}

impl Occupancy {
    pub const ALL: [Occupancy; 3] = [Occupancy::Low, Occupancy::Medium, Occupancy::Full];

    pub fn as_str(&self) -> &'static str {
        match self {
            Occupancy::Low => "low",
            Occupancy::Medium => "medium",
            Occupancy::Full => "full",
        }
    }

    pub fn from_str(occupancy: &str) -> Result<Occupancy, SimError> {
        match occupancy.to_lowercase().as_str() {
            "low" => Ok(Occupancy::Low),
            "medium" => Ok(Occupancy::Medium),
            "full" => Ok(Occupancy::Full),
            _ => Err(SimError::Other(format!("Unknown occupancy: {}", occupancy))),
        }
    }
}

/// Represents one tracked vehicle at a point in time, including its position,
/// crowding level and display metadata.
///
/// The `id` is stable across snapshots: a vehicle seeded as
/// `"delhi-metro-1"` keeps that id for the lifetime of the feed while its
/// position and eta drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: String,
    pub kind: VehicleType,
    pub latitude: f64,
    pub longitude: f64,
    pub occupancy: Occupancy,
    pub route: String,
    pub eta: Option<String>,
    pub city: City,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_round_trips_through_strings() {
        for city in City::ALL {
            assert_eq!(City::from_str(city.as_str()).unwrap(), city);
        }
        assert!(City::from_str("gotham").is_err());
    }

    #[test]
    fn occupancy_is_ordered_by_severity() {
        assert!(Occupancy::Low < Occupancy::Medium);
        assert!(Occupancy::Medium < Occupancy::Full);
    }

    #[test]
    fn marker_labels_are_first_letters() {
        assert_eq!(VehicleType::Bus.label(), 'B');
        assert_eq!(VehicleType::Metro.label(), 'M');
        assert_eq!(VehicleType::Train.label(), 'T');
        assert_eq!(VehicleType::Monorail.label(), 'M');
    }

    #[test]
    fn monorail_has_no_transport_mode() {
        assert_eq!(VehicleType::Monorail.transport_mode(), None);
        assert_eq!(
            VehicleType::Metro.transport_mode(),
            Some(TransportMode::Metro)
        );
    }
}
