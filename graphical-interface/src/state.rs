use vehicle_feed::{Occupancy, Vehicle, VehicleSnapshot};

/// Tracks the currently selected vehicle marker. Owned by the hosting
/// screen; the map and the feed only read it.
pub struct SelectionState {
    pub vehicle: Option<Vehicle>,
}

impl SelectionState {
    pub fn new() -> SelectionState {
        Self { vehicle: None }
    }

    /// If the provided vehicle is already selected, it will be deselected.
    /// Otherwise, it will be selected. Identity is the vehicle id, so a
    /// drifted payload still toggles its own marker off.
    pub fn toggle_vehicle_selection(&mut self, vehicle: &Vehicle) {
        if let Some(selected) = &self.vehicle {
            if selected.id == vehicle.id {
                self.vehicle = None;
            } else {
                self.vehicle = Some(vehicle.clone());
            }
        } else {
            self.vehicle = Some(vehicle.clone());
        }
    }

    pub fn clear(&mut self) {
        self.vehicle = None;
    }
}

/// The vehicles to display, refreshed from the latest snapshot.
pub struct ViewState {
    pub vehicles: Vec<Vehicle>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            vehicles: Vec::new(),
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: &VehicleSnapshot) {
        self.vehicles = snapshot.vehicles().to_vec();
    }

    pub fn occupancy_count(&self, occupancy: Occupancy) -> usize {
        self.vehicles
            .iter()
            .filter(|vehicle| vehicle.occupancy == occupancy)
            .count()
    }

    /// Refreshes the selected vehicle's payload from the latest vehicles so
    /// the detail view never shows stale position or eta; clears the
    /// selection if the id is gone.
    pub fn refresh_selection(&self, selection: &mut SelectionState) {
        if let Some(selected) = &selection.vehicle {
            match self.vehicles.iter().find(|v| v.id == selected.id) {
                Some(latest) => selection.vehicle = Some(latest.clone()),
                None => selection.vehicle = None,
            }
        }
    }
}
