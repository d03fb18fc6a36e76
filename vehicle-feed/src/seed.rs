use rand::Rng;

use crate::types::vehicle::{City, Occupancy, TransportMode, Vehicle};

/// Jitter window applied once per axis at seed time, so two feeds for the
/// same city never start pixel-identical. Identifiers and counts stay
/// reproducible; exact coordinates deliberately do not.
pub const SEED_FUZZ: f64 = 0.01;

/// Upper bound of the randomly drawn eta, in minutes.
pub const ETA_MAX_MINUTES: u32 = 15;

/// One raw seed tuple for a vehicle: route label, base position and crowding
/// level. Everything else on [`Vehicle`] (id, kind, city, eta, fuzzed
/// position) is derived by [`seed_vehicles`].
#[derive(Debug, Clone)]
pub struct SeedRow {
    pub route: String,
    pub lat: f64,
    pub lng: f64,
    pub occupancy: Occupancy,
}

/// Supplies seed rows per city and mode. The built-in [`MockSeeds`] table is
/// the only implementation shipped; a real ingestion pipeline would slot in
/// here.
pub trait SeedSource {
    fn seed_rows(&self, city: City, mode: TransportMode) -> Vec<SeedRow>;
}

/// The canned per-city, per-mode vehicle table.
pub struct MockSeeds;

impl SeedSource for MockSeeds {
    fn seed_rows(&self, city: City, mode: TransportMode) -> Vec<SeedRow> {
        seed_table(city, mode)
            .iter()
            .map(|&(route, lat, lng, occupancy)| SeedRow {
                route: route.to_string(),
                lat,
                lng,
                occupancy,
            })
            .collect()
    }
}

fn seed_table(city: City, mode: TransportMode) -> &'static [(&'static str, f64, f64, Occupancy)] {
    match (city, mode) {
        (City::Mumbai, TransportMode::Bus) => &[
            ("BEST 1", 19.0760, 72.8777, Occupancy::Medium),
            ("BEST 45", 19.0860, 72.8677, Occupancy::Low),
            ("BEST 201", 19.0660, 72.8877, Occupancy::Full),
        ],
        (City::Mumbai, TransportMode::Metro) => &[
            ("Line 1 (Blue)", 19.0560, 72.8377, Occupancy::Full),
            ("Line 2A (Yellow)", 19.0960, 72.8977, Occupancy::Medium),
        ],
        (City::Mumbai, TransportMode::Train) => &[
            ("Western Line", 19.0460, 72.8177, Occupancy::Full),
            ("Central Line", 19.1060, 72.8777, Occupancy::Medium),
            ("Harbour Line", 19.0260, 72.8577, Occupancy::Low),
        ],
        (City::Bangalore, TransportMode::Bus) => &[
            ("BMTC V-500", 12.9716, 77.5946, Occupancy::Low),
            ("BMTC 201E", 12.9816, 77.5846, Occupancy::Medium),
            ("BMTC G-4", 12.9616, 77.6046, Occupancy::Full),
        ],
        (City::Bangalore, TransportMode::Metro) => &[
            ("Purple Line", 12.9516, 77.5746, Occupancy::Medium),
            ("Green Line", 12.9916, 77.6146, Occupancy::Low),
        ],
        (City::Bangalore, TransportMode::Train) => &[
            ("Bangalore-Mysore", 12.9316, 77.5546, Occupancy::Low),
            ("Bangalore-Chennai", 12.9116, 77.6346, Occupancy::Medium),
        ],
        (City::Delhi, TransportMode::Bus) => &[
            ("DTC 764", 28.6139, 77.2090, Occupancy::Medium),
            ("DTC 543", 28.6239, 77.1990, Occupancy::Full),
            ("Cluster 511", 28.6039, 77.2190, Occupancy::Low),
        ],
        (City::Delhi, TransportMode::Metro) => &[
            ("Red Line", 28.5939, 77.1890, Occupancy::Full),
            ("Blue Line", 28.6339, 77.2290, Occupancy::Medium),
            ("Yellow Line", 28.5739, 77.2390, Occupancy::Low),
        ],
        (City::Delhi, TransportMode::Train) => &[
            ("Rajdhani Express", 28.6439, 77.1690, Occupancy::Medium),
            ("Shatabdi Express", 28.5539, 77.2590, Occupancy::Low),
        ],
    }
}

/// Derives the initial vehicle set for a city and optional mode filter.
///
/// Ids are deterministic (`"{city}-{mode}-{index}"`, 1-based, modes in
/// bus/metro/train order), so re-seeding the same combination always yields
/// the same id set; positions get independent [`SEED_FUZZ`] jitter each call.
/// A combination with no seed rows yields an empty list, not an error: the
/// UI must never crash from a bad selection.
pub fn seed_vehicles<S>(source: &S, city: City, mode: Option<TransportMode>) -> Vec<Vehicle>
where
    S: SeedSource + ?Sized,
{
    let modes: Vec<TransportMode> = match mode {
        Some(mode) => vec![mode],
        None => TransportMode::ALL.to_vec(),
    };

    let mut rng = rand::thread_rng();
    let mut vehicles = Vec::new();

    for mode in modes {
        for (index, row) in source.seed_rows(city, mode).into_iter().enumerate() {
            vehicles.push(Vehicle {
                id: format!("{}-{}-{}", city.as_str(), mode.as_str(), index + 1),
                kind: mode.vehicle_type(),
                latitude: row.lat + rng.gen_range(-SEED_FUZZ / 2.0..=SEED_FUZZ / 2.0),
                longitude: row.lng + rng.gen_range(-SEED_FUZZ / 2.0..=SEED_FUZZ / 2.0),
                occupancy: row.occupancy,
                route: row.route,
                eta: Some(random_eta(&mut rng)),
                city,
            });
        }
    }

    vehicles
}

/// Draws a fresh display eta, uniform in [1, 15] minutes.
pub fn random_eta<R: Rng>(rng: &mut R) -> String {
    format!("{} min", rng.gen_range(1..=ETA_MAX_MINUTES))
}

/// Route labels offered by the route planner per city and mode. Display
/// data only; no routing is computed over these.
pub fn route_options(city: City, mode: TransportMode) -> &'static [&'static str] {
    match (city, mode) {
        (City::Mumbai, TransportMode::Bus) => {
            &["BEST 1", "BEST 45", "BEST 201", "BEST 315", "BEST 421"]
        }
        (City::Mumbai, TransportMode::Metro) => &[
            "Line 1 (Blue)",
            "Line 2A (Yellow)",
            "Line 2B (Yellow)",
            "Line 3 (Aqua)",
        ],
        (City::Mumbai, TransportMode::Train) => {
            &["Western Line", "Central Line", "Harbour Line", "Trans-Harbour"]
        }
        (City::Bangalore, TransportMode::Bus) => {
            &["BMTC V-500", "BMTC 201E", "BMTC G-4", "BMTC AS-1", "BMTC KBS-1"]
        }
        (City::Bangalore, TransportMode::Metro) => &["Purple Line", "Green Line", "Blue Line"],
        (City::Bangalore, TransportMode::Train) => {
            &["Bangalore-Mysore", "Bangalore-Chennai", "Bangalore-Hubli"]
        }
        (City::Delhi, TransportMode::Bus) => {
            &["DTC 764", "DTC 543", "Cluster 511", "DTC 620", "Cluster 347"]
        }
        (City::Delhi, TransportMode::Metro) => &[
            "Red Line",
            "Blue Line",
            "Yellow Line",
            "Green Line",
            "Violet Line",
            "Pink Line",
        ],
        (City::Delhi, TransportMode::Train) => &[
            "Rajdhani Express",
            "Shatabdi Express",
            "Duronto Express",
            "Gatimaan Express",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::vehicle::VehicleType;

    #[test]
    fn all_modes_are_seeded_in_mode_order() {
        let vehicles = seed_vehicles(&MockSeeds, City::Mumbai, None);

        assert_eq!(vehicles.len(), 8); // 3 bus + 2 metro + 3 train
        assert_eq!(vehicles[0].id, "mumbai-bus-1");
        assert_eq!(vehicles[3].id, "mumbai-metro-1");
        assert_eq!(vehicles[5].id, "mumbai-train-1");
        assert!(vehicles.iter().all(|v| v.city == City::Mumbai));
    }

    #[test]
    fn mode_filter_limits_the_seed_set() {
        let vehicles = seed_vehicles(&MockSeeds, City::Delhi, Some(TransportMode::Metro));

        let ids: Vec<&str> = vehicles.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["delhi-metro-1", "delhi-metro-2", "delhi-metro-3"]);
        assert!(vehicles.iter().all(|v| v.kind == VehicleType::Metro));

        let routes: Vec<&str> = vehicles.iter().map(|v| v.route.as_str()).collect();
        assert_eq!(routes, ["Red Line", "Blue Line", "Yellow Line"]);
    }

    #[test]
    fn seed_positions_are_fuzzed_but_bounded() {
        let vehicles = seed_vehicles(&MockSeeds, City::Bangalore, Some(TransportMode::Bus));
        let table = seed_table(City::Bangalore, TransportMode::Bus);

        for (vehicle, &(_, lat, lng, _)) in vehicles.iter().zip(table) {
            assert!((vehicle.latitude - lat).abs() <= SEED_FUZZ / 2.0 + 1e-12);
            assert!((vehicle.longitude - lng).abs() <= SEED_FUZZ / 2.0 + 1e-12);
        }
    }

    #[test]
    fn reseeding_repeats_ids_but_not_positions() {
        let first = seed_vehicles(&MockSeeds, City::Delhi, None);
        let second = seed_vehicles(&MockSeeds, City::Delhi, None);

        let first_ids: Vec<&str> = first.iter().map(|v| v.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);

        let moved = first
            .iter()
            .zip(&second)
            .any(|(a, b)| a.latitude != b.latitude || a.longitude != b.longitude);
        assert!(moved, "independent fuzz should move at least one vehicle");
    }

    #[test]
    fn etas_are_within_range() {
        let vehicles = seed_vehicles(&MockSeeds, City::Mumbai, None);
        for vehicle in vehicles {
            let eta = vehicle.eta.expect("seeded vehicles carry an eta");
            let minutes: u32 = eta
                .strip_suffix(" min")
                .expect("eta ends with ' min'")
                .parse()
                .expect("eta starts with a number");
            assert!((1..=ETA_MAX_MINUTES).contains(&minutes));
        }
    }

    #[test]
    fn route_options_cover_every_combination() {
        for city in City::ALL {
            for mode in TransportMode::ALL {
                assert!(!route_options(city, mode).is_empty());
            }
        }
    }
}
