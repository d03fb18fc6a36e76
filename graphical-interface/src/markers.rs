use std::collections::BTreeMap;

use vehicle_feed::{Vehicle, VehicleSnapshot};

/// One rendered map marker, keyed by its vehicle id.
#[derive(Debug, Clone)]
pub struct Marker {
    pub vehicle: Vehicle,
}

/// The set of markers currently on the map, reconciled against the latest
/// snapshot instead of being rebuilt from scratch: surviving vehicles keep
/// their marker (updated in place), vanished ids drop theirs, new ids get a
/// fresh one. Draw order follows the id ordering so markers do not shuffle
/// between frames.
#[derive(Debug, Default)]
pub struct MarkerSet {
    markers: BTreeMap<String, Marker>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles the marker set against `snapshot`. An empty snapshot
    /// clears every marker and leaves the set reusable.
    pub fn sync(&mut self, snapshot: &VehicleSnapshot) {
        self.markers.retain(|id, _| snapshot.contains(id));

        for vehicle in snapshot.vehicles() {
            match self.markers.get_mut(&vehicle.id) {
                Some(marker) => marker.vehicle = vehicle.clone(),
                None => {
                    self.markers.insert(
                        vehicle.id.clone(),
                        Marker {
                            vehicle: vehicle.clone(),
                        },
                    );
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Marker> {
        self.markers.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vehicle_feed::{City, Occupancy, VehicleType};

    fn vehicle(id: &str, latitude: f64) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            kind: VehicleType::Bus,
            latitude,
            longitude: 72.8777,
            occupancy: Occupancy::Medium,
            route: "BEST 1".to_string(),
            eta: Some("3 min".to_string()),
            city: City::Mumbai,
        }
    }

    #[test]
    fn sync_adds_markers_for_new_vehicles() {
        let mut markers = MarkerSet::new();
        markers.sync(&VehicleSnapshot::new(
            0,
            vec![vehicle("a", 19.0), vehicle("b", 19.1)],
        ));

        assert_eq!(markers.len(), 2);
        assert!(markers.get("a").is_some());
        assert!(markers.get("b").is_some());
    }

    #[test]
    fn sync_updates_surviving_markers_in_place() {
        let mut markers = MarkerSet::new();
        markers.sync(&VehicleSnapshot::new(0, vec![vehicle("a", 19.0)]));
        markers.sync(&VehicleSnapshot::new(1, vec![vehicle("a", 19.5)]));

        assert_eq!(markers.len(), 1);
        assert_eq!(markers.get("a").unwrap().vehicle.latitude, 19.5);
    }

    #[test]
    fn sync_drops_markers_for_vanished_vehicles() {
        let mut markers = MarkerSet::new();
        markers.sync(&VehicleSnapshot::new(
            0,
            vec![vehicle("a", 19.0), vehicle("b", 19.1)],
        ));
        markers.sync(&VehicleSnapshot::new(1, vec![vehicle("b", 19.2)]));

        assert_eq!(markers.len(), 1);
        assert!(markers.get("a").is_none());
        assert!(markers.get("b").is_some());
    }

    #[test]
    fn empty_snapshot_clears_all_markers_and_set_stays_usable() {
        let mut markers = MarkerSet::new();
        markers.sync(&VehicleSnapshot::new(0, vec![vehicle("a", 19.0)]));
        markers.sync(&VehicleSnapshot::new(1, Vec::new()));

        assert!(markers.is_empty());

        markers.sync(&VehicleSnapshot::new(2, vec![vehicle("c", 19.3)]));
        assert_eq!(markers.len(), 1);
    }

    #[test]
    fn draw_order_is_stable_by_id() {
        let mut markers = MarkerSet::new();
        markers.sync(&VehicleSnapshot::new(
            0,
            vec![vehicle("b", 19.1), vehicle("a", 19.0), vehicle("c", 19.2)],
        ));

        let ids: Vec<&str> = markers.iter().map(|m| m.vehicle.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
