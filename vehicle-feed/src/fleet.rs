use rand::Rng;

use crate::types::vehicle::{City, Occupancy, Vehicle, VehicleType, FALLBACK_CENTER};

pub const FLEET_BUSES: usize = 45;
pub const FLEET_METROS: usize = 18;
pub const FLEET_TRAINS: usize = 12;
pub const FLEET_MONORAILS: usize = 8;

/// Generates the authority dashboard's mock fleet: 45 buses, 18 metros,
/// 12 trains and 8 monorails scattered around the fallback center, each
/// kind with its own spread window and eta range. The result is meant to be
/// driven by a dashboard-cadence [`crate::VehicleFeed`].
pub fn city_fleet() -> Vec<Vehicle> {
    let mut rng = rand::thread_rng();
    let mut fleet = Vec::with_capacity(FLEET_BUSES + FLEET_METROS + FLEET_TRAINS + FLEET_MONORAILS);

    for i in 1..=FLEET_BUSES {
        fleet.push(fleet_vehicle(
            &mut rng,
            VehicleType::Bus,
            format!("bus-{}", i),
            format!("Route {}", 100 + i),
            0.1,
            15,
            City::Mumbai,
        ));
    }
    for i in 1..=FLEET_METROS {
        fleet.push(fleet_vehicle(
            &mut rng,
            VehicleType::Metro,
            format!("metro-{}", i),
            format!("Line {}", i),
            0.08,
            10,
            City::Bangalore,
        ));
    }
    for i in 1..=FLEET_TRAINS {
        fleet.push(fleet_vehicle(
            &mut rng,
            VehicleType::Train,
            format!("train-{}", i),
            format!("Express {}", i),
            0.12,
            8,
            City::Delhi,
        ));
    }
    for i in 1..=FLEET_MONORAILS {
        fleet.push(fleet_vehicle(
            &mut rng,
            VehicleType::Monorail,
            format!("monorail-{}", i),
            format!("Sky {}", i),
            0.06,
            12,
            City::Mumbai,
        ));
    }

    fleet
}

fn fleet_vehicle<R: Rng>(
    rng: &mut R,
    kind: VehicleType,
    id: String,
    route: String,
    spread: f64,
    eta_max: u32,
    city: City,
) -> Vehicle {
    let (center_lat, center_lng) = FALLBACK_CENTER;

    Vehicle {
        id,
        kind,
        latitude: center_lat + rng.gen_range(-spread / 2.0..=spread / 2.0),
        longitude: center_lng + rng.gen_range(-spread / 2.0..=spread / 2.0),
        occupancy: Occupancy::ALL[rng.gen_range(0..Occupancy::ALL.len())],
        route,
        eta: Some(format!("{} min", rng.gen_range(1..=eta_max))),
        city,
    }
}
