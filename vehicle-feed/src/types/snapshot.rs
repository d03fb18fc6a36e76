use super::vehicle::{Occupancy, Vehicle};

/// One complete, immutable vehicle-state listing produced at a point in
/// time. Snapshot 0 is the seed set; every timer tick supersedes the
/// previous snapshot with the next one. Snapshots are handed to consumers
/// by value and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSnapshot {
    tick: usize,
    vehicles: Vec<Vehicle>,
}

impl VehicleSnapshot {
    pub fn new(tick: usize, vehicles: Vec<Vehicle>) -> Self {
        Self { tick, vehicles }
    }

    /// The tick that produced this snapshot; 0 for the seed snapshot.
    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.vehicles.iter().map(|vehicle| vehicle.id.as_str())
    }

    pub fn count_by_occupancy(&self, occupancy: Occupancy) -> usize {
        self.vehicles
            .iter()
            .filter(|vehicle| vehicle.occupancy == occupancy)
            .count()
    }

    pub fn into_vehicles(self) -> Vec<Vehicle> {
        self.vehicles
    }
}
