//! Expired Entry Sweeper
//!
//! Background task that periodically evicts expired cache entries. Reads
//! already evict lazily; the sweeper reclaims entries that are never read.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::SharedCache;

/// Interval between sweeps unless configured otherwise.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

// == Sweeper State ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    /// A sweep task is scheduled
    Armed,
    /// No further sweeps will run
    Stopped,
}

// == Sweeper ==
/// Owns the recurring sweep task for a shared cache.
///
/// The first sweep runs one full interval after [`start`](Sweeper::start).
/// Dropping the sweeper stops it.
///
/// # Example
/// ```ignore
/// let cache = CacheManager::in_memory(CategoryTable::defaults()).into_shared();
/// let mut sweeper = Sweeper::new(cache.clone(), DEFAULT_SWEEP_INTERVAL);
/// sweeper.start();
/// // Later, during shutdown:
/// sweeper.stop();
/// ```
#[derive(Debug)]
pub struct Sweeper {
    cache: SharedCache,
    interval: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Creates a stopped sweeper. A zero interval is raised to one millisecond.
    pub fn new(cache: SharedCache, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            warn!("Sweep interval of zero requested, using 1ms");
            Duration::from_millis(1)
        } else {
            interval
        };

        Self {
            cache,
            interval,
            handle: None,
        }
    }

    /// Arms the sweeper. Has no effect if it is already armed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.state() == SweeperState::Armed {
            return;
        }

        let cache = self.cache.clone();
        let period = self.interval;
        info!("Starting cache sweeper with interval of {:?}", period);

        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                // Sweeps run inline: at most one small read per category,
                // even when the store does blocking fs I/O
                let evicted = cache.write().await.sweep();
                if evicted > 0 {
                    info!("Cache sweep: evicted {} expired entries", evicted);
                } else {
                    debug!("Cache sweep: no expired entries found");
                }
            }
        }));
    }

    /// Stops the sweeper. Has no effect if it is already stopped.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("Cache sweeper stopped");
        }
    }

    pub fn state(&self) -> SweeperState {
        match &self.handle {
            Some(handle) if !handle.is_finished() => SweeperState::Armed,
            _ => SweeperState::Stopped,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}
