use chrono::{NaiveDateTime, Utc};
use rand::Rng;

use super::vehicle::{Occupancy, FALLBACK_CENTER};

/// Supplies the driver's current position. Returning `None` means the
/// position could not be read; callers fall back to [`FALLBACK_CENTER`]
/// rather than erroring.
pub trait LocationSource {
    fn current_position(&self) -> Option<(f64, f64)>;
}

/// Location source pinned to one coordinate pair.
pub struct FixedLocation(pub f64, pub f64);

impl FixedLocation {
    pub fn fallback() -> Self {
        let (lat, lng) = FALLBACK_CENTER;
        FixedLocation(lat, lng)
    }
}

impl LocationSource for FixedLocation {
    fn current_position(&self) -> Option<(f64, f64)> {
        Some((self.0, self.1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripStatus {
    Idle,
    OnTrip,
}

/// The driver's own trip state: whether a trip is running, the reported
/// occupancy, and the vehicle position. While a trip is running the
/// position drifts the same way feed vehicles do.
pub struct DriverTrip {
    pub status: TripStatus,
    pub occupancy: Occupancy,
    pub latitude: f64,
    pub longitude: f64,
    started_at: Option<NaiveDateTime>,
}

impl DriverTrip {
    pub fn new(source: &dyn LocationSource) -> Self {
        let (latitude, longitude) = source.current_position().unwrap_or(FALLBACK_CENTER);
        Self {
            status: TripStatus::Idle,
            occupancy: Occupancy::Low,
            latitude,
            longitude,
            started_at: None,
        }
    }

    pub fn is_on_trip(&self) -> bool {
        self.status == TripStatus::OnTrip
    }

    /// Starts a trip. A no-op when a trip is already running.
    pub fn start_trip(&mut self) {
        if self.status == TripStatus::Idle {
            self.status = TripStatus::OnTrip;
            self.started_at = Some(Utc::now().naive_utc());
        }
    }

    pub fn end_trip(&mut self) {
        self.status = TripStatus::Idle;
        self.started_at = None;
    }

    pub fn set_occupancy(&mut self, occupancy: Occupancy) {
        self.occupancy = occupancy;
    }

    /// Minutes since the trip started, if one is running.
    pub fn trip_duration_minutes(&self) -> Option<i64> {
        self.started_at.map(|started| {
            Utc::now()
                .naive_utc()
                .signed_duration_since(started)
                .num_minutes()
        })
    }

    /// Formats a trip duration the way the dashboard shows it: `"42m"`, or
    /// `"1h 5m"` past the hour.
    pub fn format_duration(minutes: i64) -> String {
        if minutes < 60 {
            format!("{}m", minutes)
        } else {
            format!("{}h {}m", minutes / 60, minutes % 60)
        }
    }

    /// Moves the position by a uniform value in [-δ/2, +δ/2] per axis.
    /// Only applies while a trip is running.
    pub fn drift(&mut self, jitter: f64) {
        if !self.is_on_trip() {
            return;
        }
        let mut rng = rand::thread_rng();
        self.latitude += rng.gen_range(-jitter / 2.0..=jitter / 2.0);
        self.longitude += rng.gen_range(-jitter / 2.0..=jitter / 2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoLocation;

    impl LocationSource for NoLocation {
        fn current_position(&self) -> Option<(f64, f64)> {
            None
        }
    }

    #[test]
    fn unavailable_location_falls_back_to_fixed_coordinates() {
        let trip = DriverTrip::new(&NoLocation);
        assert_eq!((trip.latitude, trip.longitude), FALLBACK_CENTER);
    }

    #[test]
    fn trip_transitions() {
        let mut trip = DriverTrip::new(&FixedLocation(28.61, 77.20));
        assert!(!trip.is_on_trip());
        assert_eq!(trip.trip_duration_minutes(), None);

        trip.start_trip();
        assert!(trip.is_on_trip());
        assert!(trip.trip_duration_minutes().is_some());

        // Starting again must not reset the running trip
        trip.start_trip();
        assert!(trip.is_on_trip());
        assert!(trip.trip_duration_minutes().is_some());

        trip.end_trip();
        assert!(!trip.is_on_trip());
        assert_eq!(trip.trip_duration_minutes(), None);
    }

    #[test]
    fn occupancy_can_be_reported_any_time() {
        let mut trip = DriverTrip::new(&FixedLocation::fallback());
        trip.set_occupancy(Occupancy::Full);
        assert_eq!(trip.occupancy, Occupancy::Full);
    }

    #[test]
    fn drift_only_moves_a_running_trip() {
        let mut trip = DriverTrip::new(&FixedLocation(28.61, 77.20));

        trip.drift(0.001);
        assert_eq!((trip.latitude, trip.longitude), (28.61, 77.20));

        trip.start_trip();
        trip.drift(0.001);
        assert!((trip.latitude - 28.61).abs() <= 0.0005 + 1e-12);
        assert!((trip.longitude - 77.20).abs() <= 0.0005 + 1e-12);
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(DriverTrip::format_duration(0), "0m");
        assert_eq!(DriverTrip::format_duration(59), "59m");
        assert_eq!(DriverTrip::format_duration(60), "1h 0m");
        assert_eq!(DriverTrip::format_duration(125), "2h 5m");
    }
}
