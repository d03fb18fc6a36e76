use std::collections::BTreeSet;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use vehicle_feed::{
    City, FeedConfig, MockSeeds, SeedRow, SeedSource, TransportMode, VehicleFeed, VehicleSnapshot,
};

const TEST_TICK: Duration = Duration::from_millis(25);
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

fn test_config(city: City, mode: Option<TransportMode>, jitter: f64) -> FeedConfig {
    FeedConfig::live_view(city, mode)
        .with_tick_interval(TEST_TICK)
        .with_jitter(jitter)
}

fn id_set(snapshot: &VehicleSnapshot) -> BTreeSet<String> {
    snapshot.ids().map(str::to_string).collect()
}

fn eta_minutes(eta: &str) -> u32 {
    eta.strip_suffix(" min")
        .expect("eta should end with ' min'")
        .parse()
        .expect("eta should start with a number")
}

#[test]
fn delhi_metro_seed_and_first_tick() {
    let (tx, rx) = mpsc::channel();
    let feed = VehicleFeed::start(
        &MockSeeds,
        test_config(City::Delhi, Some(TransportMode::Metro), 0.001),
        None,
        move |snapshot| {
            tx.send(snapshot).ok();
        },
    )
    .expect("feed should start");

    // The seed snapshot is emitted synchronously from start()
    let seed = rx.try_recv().expect("seed snapshot is already available");
    assert_eq!(seed.tick(), 0);
    assert_eq!(seed.len(), 3);

    let ids: Vec<&str> = seed.ids().collect();
    assert_eq!(ids, ["delhi-metro-1", "delhi-metro-2", "delhi-metro-3"]);

    let routes: BTreeSet<&str> = seed.vehicles().iter().map(|v| v.route.as_str()).collect();
    assert_eq!(
        routes,
        BTreeSet::from(["Red Line", "Blue Line", "Yellow Line"])
    );

    for vehicle in seed.vehicles() {
        let eta = vehicle.eta.as_deref().expect("eta is set at seed time");
        assert!((1..=15).contains(&eta_minutes(eta)));
    }

    let next = rx.recv_timeout(RECV_TIMEOUT).expect("first tick arrives");
    assert_eq!(next.tick(), 1);
    assert_eq!(id_set(&next), id_set(&seed));

    for vehicle in next.vehicles() {
        let seeded = seed.get(&vehicle.id).expect("identity is preserved");
        assert!((vehicle.latitude - seeded.latitude).abs() <= 0.0005 + 1e-12);
        assert!((vehicle.longitude - seeded.longitude).abs() <= 0.0005 + 1e-12);
        assert!(vehicle.eta.is_some());
    }

    feed.stop();
}

#[test]
fn identity_and_occupancy_survive_many_ticks() {
    let (tx, rx) = mpsc::channel();
    let feed = VehicleFeed::start(
        &MockSeeds,
        test_config(City::Mumbai, None, 0.001),
        None,
        move |snapshot| {
            tx.send(snapshot).ok();
        },
    )
    .expect("feed should start");

    let seed = rx.recv_timeout(RECV_TIMEOUT).expect("seed snapshot");
    let mut previous = seed.clone();
    for _ in 0..4 {
        let snapshot = rx.recv_timeout(RECV_TIMEOUT).expect("tick snapshot");
        assert_eq!(snapshot.tick(), previous.tick() + 1, "strict tick order");
        assert_eq!(id_set(&snapshot), id_set(&seed));
        for vehicle in snapshot.vehicles() {
            let seeded = seed.get(&vehicle.id).unwrap();
            assert_eq!(
                vehicle.occupancy, seeded.occupancy,
                "ticks never change occupancy"
            );
        }
        previous = snapshot;
    }

    feed.stop();
}

#[test]
fn dashboard_jitter_window_bounds_each_step() {
    let (tx, rx) = mpsc::channel();
    let feed = VehicleFeed::start(
        &MockSeeds,
        test_config(City::Bangalore, None, 0.002),
        None,
        move |snapshot| {
            tx.send(snapshot).ok();
        },
    )
    .expect("feed should start");

    let mut previous = rx.recv_timeout(RECV_TIMEOUT).expect("seed snapshot");
    for _ in 0..3 {
        let snapshot = rx.recv_timeout(RECV_TIMEOUT).expect("tick snapshot");
        for vehicle in snapshot.vehicles() {
            let before = previous.get(&vehicle.id).unwrap();
            assert!((vehicle.latitude - before.latitude).abs() <= 0.001 + 1e-12);
            assert!((vehicle.longitude - before.longitude).abs() <= 0.001 + 1e-12);
        }
        previous = snapshot;
    }

    feed.stop();
}

#[test]
fn stop_emits_nothing_afterwards() {
    let (tx, rx) = mpsc::channel();
    let feed = VehicleFeed::start(
        &MockSeeds,
        test_config(City::Delhi, None, 0.001),
        None,
        move |snapshot| {
            tx.send(snapshot).ok();
        },
    )
    .expect("feed should start");

    thread::sleep(TEST_TICK * 4);
    feed.stop();

    // Whatever was emitted before stop() returned is fine; drain it.
    while rx.try_recv().is_ok() {}

    thread::sleep(TEST_TICK * 5);
    assert!(
        rx.try_recv().is_err(),
        "no snapshot may be emitted after stop() returns"
    );
}

#[test]
fn stop_is_idempotent_and_safe_after_teardown() {
    let feed = VehicleFeed::start(
        &MockSeeds,
        test_config(City::Mumbai, Some(TransportMode::Bus), 0.001),
        None,
        |_| {},
    )
    .expect("feed should start");

    feed.stop();
    feed.stop();
    assert!(!feed.is_running());
}

#[test]
fn empty_seed_combination_yields_empty_snapshots() {
    struct NoSeeds;

    impl SeedSource for NoSeeds {
        fn seed_rows(&self, _city: City, _mode: TransportMode) -> Vec<SeedRow> {
            Vec::new()
        }
    }

    let (tx, rx) = mpsc::channel();
    let feed = VehicleFeed::start(
        &NoSeeds,
        test_config(City::Delhi, Some(TransportMode::Metro), 0.001),
        None,
        move |snapshot| {
            tx.send(snapshot).ok();
        },
    )
    .expect("an empty combination is not an error");

    let seed = rx.try_recv().expect("seed snapshot");
    assert!(seed.is_empty());

    let next = rx.recv_timeout(RECV_TIMEOUT).expect("ticks keep coming");
    assert!(next.is_empty());

    feed.stop();
}

#[test]
fn current_vehicles_tracks_the_feed() {
    let feed = VehicleFeed::start(
        &MockSeeds,
        test_config(City::Bangalore, Some(TransportMode::Metro), 0.001),
        None,
        |_| {},
    )
    .expect("feed should start");

    let vehicles = feed.current_vehicles().expect("state is readable");
    assert_eq!(vehicles.len(), 2);
    assert!(vehicles.iter().all(|v| v.city == City::Bangalore));

    feed.stop();
}

#[test]
fn panicking_consumer_does_not_stop_the_feed() {
    let (tx, rx) = mpsc::channel();
    let feed = VehicleFeed::start(
        &MockSeeds,
        test_config(City::Delhi, Some(TransportMode::Bus), 0.001),
        None,
        move |snapshot| {
            tx.send(snapshot.tick()).ok();
            if snapshot.tick() == 1 {
                panic!("consumer failure on the first tick");
            }
        },
    )
    .expect("feed should start");

    let mut seen_past_first = false;
    for _ in 0..4 {
        if let Ok(tick) = rx.recv_timeout(RECV_TIMEOUT) {
            if tick >= 2 {
                seen_past_first = true;
                break;
            }
        }
    }
    assert!(seen_past_first, "the loop must survive a panicking consumer");

    feed.stop();
}
