use std::panic::{self, AssertUnwindSafe};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard,
};
use std::thread;
use std::time::{Duration, Instant};

use super::sim_error::SimError;

/// A recurring tick timer driving the feed, with support for stopping.
///
/// The timer runs its callback on a dedicated thread, once per interval,
/// passing a 1-based tick count. Every callback invocation happens under the
/// tick guard; [`Timer::stop`] takes the same guard before clearing the
/// running flag, so once `stop` returns no further callback can run — a tick
/// already in flight has completed and a pending wake-up will observe the
/// cleared flag before invoking the callback.
pub struct Timer {
    interval: Duration,
    running: AtomicBool,
    tick_guard: Mutex<()>,
}

impl Timer {
    /// Creates a new timer ticking every `interval`.
    pub fn new(interval: Duration) -> Arc<Self> {
        Arc::new(Self {
            interval,
            running: AtomicBool::new(true),
            tick_guard: Mutex::new(()),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stops the timer. Idempotent, and safe to call after the tick thread
    /// has already wound down. Must not be called from inside the tick
    /// callback itself (the callback holds the tick guard).
    pub fn stop(&self) {
        let guard = self.lock_tick_guard();
        self.running.store(false, Ordering::SeqCst);
        drop(guard);
    }

    /// Starts the timer and executes the callback function on each tick.
    ///
    /// A panicking callback is caught and logged so one bad tick cannot
    /// bring down the loop; the next tick proceeds as scheduled.
    pub fn start(
        self: Arc<Self>,
        tick_callback: impl Fn(usize) + Send + 'static,
    ) -> Result<(), SimError> {
        thread::Builder::new()
            .name("feed-timer".to_string())
            .spawn(move || {
                let mut tick_count = 0;
                let mut elapsed = Duration::ZERO;
                while self.running.load(Ordering::SeqCst) {
                    thread::sleep(self.interval.saturating_sub(elapsed));

                    let now = Instant::now();
                    let _guard = self.lock_tick_guard();
                    if !self.running.load(Ordering::SeqCst) {
                        break;
                    }

                    tick_count += 1;
                    let outcome =
                        panic::catch_unwind(AssertUnwindSafe(|| tick_callback(tick_count)));
                    if outcome.is_err() {
                        eprintln!("Tick {} callback panicked. Continuing.", tick_count);
                    }

                    elapsed = now.elapsed();
                }
            })
            .map_err(|_| {
                SimError::TimerStartError("Failed to start the timer thread.".to_string())
            })?;

        Ok(())
    }

    fn lock_tick_guard(&self) -> MutexGuard<'_, ()> {
        // The callback cannot poison the guard (panics are caught inside
        // it), but recover anyway rather than propagate.
        self.tick_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn ticks_count_up_from_one() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let timer = Timer::new(Duration::from_millis(10));

        let sink = Arc::clone(&seen);
        Arc::clone(&timer)
            .start(move |tick| sink.lock().unwrap().push(tick))
            .expect("timer should start");

        thread::sleep(Duration::from_millis(100));
        timer.stop();

        let ticks = seen.lock().unwrap().clone();
        assert!(!ticks.is_empty(), "expected at least one tick");
        for (index, tick) in ticks.iter().enumerate() {
            assert_eq!(*tick, index + 1, "ticks must be sequential from 1");
        }
    }

    #[test]
    fn no_tick_fires_after_stop_returns() {
        let count = Arc::new(AtomicUsize::new(0));
        let timer = Timer::new(Duration::from_millis(5));

        let counter = Arc::clone(&count);
        Arc::clone(&timer)
            .start(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .expect("timer should start");

        thread::sleep(Duration::from_millis(40));
        timer.stop();
        let at_stop = count.load(Ordering::SeqCst);

        thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), at_stop);
    }

    #[test]
    fn stop_is_idempotent() {
        let timer = Timer::new(Duration::from_millis(5));
        Arc::clone(&timer).start(|_| {}).expect("timer should start");

        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
    }

    #[test]
    fn panicking_callback_does_not_kill_the_loop() {
        let count = Arc::new(AtomicUsize::new(0));
        let timer = Timer::new(Duration::from_millis(5));

        let counter = Arc::clone(&count);
        Arc::clone(&timer)
            .start(move |tick| {
                counter.fetch_add(1, Ordering::SeqCst);
                if tick == 1 {
                    panic!("bad tick");
                }
            })
            .expect("timer should start");

        thread::sleep(Duration::from_millis(60));
        timer.stop();

        assert!(
            count.load(Ordering::SeqCst) >= 2,
            "loop should survive a panicking tick"
        );
    }
}
