use std::sync::{Arc, Mutex};
use std::time::Duration;

use logger::Logger;
use rand::Rng;

use crate::seed::{self, SeedSource};

use super::sim_error::SimError;
use super::snapshot::VehicleSnapshot;
use super::timer::Timer;
use super::vehicle::{City, TransportMode, Vehicle};

/// Refresh cadence of the traveler live view.
pub const LIVE_VIEW_TICK: Duration = Duration::from_millis(5000);
/// Refresh cadence of the authority dashboard and driver views.
pub const DASHBOARD_TICK: Duration = Duration::from_millis(10_000);
/// Per-tick jitter window δ of the live view, in degrees (roughly ±55 m).
pub const LIVE_VIEW_JITTER: f64 = 0.001;
/// Per-tick jitter window δ of the dashboard view.
pub const DASHBOARD_JITTER: f64 = 0.002;

/// Configuration for one feed: which vehicles to seed and how they drift.
///
/// Different screens legitimately want different cadence and jitter, so both
/// are carried here instead of being baked into the feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub city: City,
    /// Mode filter; `None` includes every mode seeded for the city.
    pub mode: Option<TransportMode>,
    pub tick_interval: Duration,
    /// Jitter window δ: each tick moves each coordinate by a uniform value
    /// in [-δ/2, +δ/2].
    pub jitter: f64,
}

impl FeedConfig {
    /// Traveler live view: 5 s ticks, δ = 0.001.
    pub fn live_view(city: City, mode: Option<TransportMode>) -> Self {
        Self {
            city,
            mode,
            tick_interval: LIVE_VIEW_TICK,
            jitter: LIVE_VIEW_JITTER,
        }
    }

    /// Authority dashboard: all modes, 10 s ticks, δ = 0.002.
    pub fn dashboard(city: City) -> Self {
        Self {
            city,
            mode: None,
            tick_interval: DASHBOARD_TICK,
            jitter: DASHBOARD_JITTER,
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }
}

/// Produces an initial [`VehicleSnapshot`] and a refreshed one per tick,
/// simulating live movement without any external source.
///
/// The seed snapshot (tick 0) is handed to the consumer synchronously from
/// [`VehicleFeed::start`]; afterwards one snapshot per tick arrives on the
/// timer thread, strictly in tick order, each building on the previous
/// vehicle list so drift accumulates. Occupancy is never changed by a tick.
pub struct VehicleFeed {
    vehicles: Arc<Mutex<Vec<Vehicle>>>,
    timer: Arc<Timer>,
    config: FeedConfig,
}

impl VehicleFeed {
    /// Starts a feed seeded from `source` for the configured city and mode.
    ///
    /// An unknown city/mode combination seeds an empty vehicle list and the
    /// feed emits empty snapshots; it does not fail.
    pub fn start<S, F>(
        source: &S,
        config: FeedConfig,
        logger: Option<Logger>,
        on_snapshot: F,
    ) -> Result<Self, SimError>
    where
        S: SeedSource + ?Sized,
        F: Fn(VehicleSnapshot) + Send + 'static,
    {
        let seeded = seed::seed_vehicles(source, config.city, config.mode);
        Self::start_with_vehicles(seeded, config, logger, on_snapshot)
    }

    /// Starts a feed from an explicit vehicle list, e.g. the generated
    /// dashboard fleet.
    pub fn start_with_vehicles<F>(
        vehicles: Vec<Vehicle>,
        config: FeedConfig,
        logger: Option<Logger>,
        on_snapshot: F,
    ) -> Result<Self, SimError>
    where
        F: Fn(VehicleSnapshot) + Send + 'static,
    {
        let shared = Arc::new(Mutex::new(vehicles.clone()));
        on_snapshot(VehicleSnapshot::new(0, vehicles));

        let timer = Timer::new(config.tick_interval);
        let state = Arc::clone(&shared);
        let jitter = config.jitter;

        Arc::clone(&timer).start(move |tick| {
            let mut state_lock = match state.lock() {
                Ok(lock) => lock,
                Err(_) => {
                    report_tick_error(
                        logger.as_ref(),
                        tick,
                        "vehicle state lock poisoned, skipping this tick",
                    );
                    return;
                }
            };

            let mut rng = rand::thread_rng();
            for vehicle in state_lock.iter_mut() {
                vehicle.latitude += rng.gen_range(-jitter / 2.0..=jitter / 2.0);
                vehicle.longitude += rng.gen_range(-jitter / 2.0..=jitter / 2.0);
                vehicle.eta = Some(seed::random_eta(&mut rng));
            }

            let snapshot = VehicleSnapshot::new(tick, state_lock.clone());
            drop(state_lock);
            on_snapshot(snapshot);
        })?;

        Ok(VehicleFeed {
            vehicles: shared,
            timer,
            config,
        })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// A copy of the current vehicle list, outside the snapshot stream.
    pub fn current_vehicles(&self) -> Result<Vec<Vehicle>, SimError> {
        self.vehicles
            .lock()
            .map(|vehicles| vehicles.clone())
            .map_err(|_| SimError::TimerLockError("Failed to lock vehicle state".to_string()))
    }

    /// Stops the feed. Idempotent; once this returns, no further snapshot is
    /// emitted, even if a tick was already scheduled. Must not be called
    /// from inside the snapshot callback.
    pub fn stop(&self) {
        self.timer.stop();
    }
}

impl Drop for VehicleFeed {
    fn drop(&mut self) {
        self.timer.stop();
    }
}

fn report_tick_error(logger: Option<&Logger>, tick: usize, message: &str) {
    match logger {
        Some(logger) => {
            let _ = logger.error(&format!("Tick {}: {}", tick, message), true);
        }
        None => eprintln!("Tick {}: {}", tick, message),
    }
}
