//! Background status polling.
//!
//! Spawns a thread that owns the `StatusSource`, performs one fetch at a
//! time and hands each result over a rendezvous channel. The next fetch is
//! only scheduled once the consumer has taken the previous result, so at
//! most one request is ever outstanding.
//!
//! Each `Poller` spawns exactly one thread, shut down and joined when the
//! `Poller` is dropped.
use crossbeam_channel as xch;
use gasmon_config::MIN_UPDATE_INTERVAL_MS;
use gasmon_traits::clock::Clock;
use gasmon_traits::{DeviceStatus, StatusSource};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// Upper bound on a single sleep slice so shutdown stays responsive.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Result of one polling tick.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    Sample {
        status: DeviceStatus,
        /// Round-trip time of the fetch.
        latency_ms: u64,
        /// Local receipt time, epoch ms.
        received_at_ms: i64,
    },
    /// Timeout, transport failure or malformed payload.
    Miss { error: String, at_ms: i64 },
}

/// Perform one fetch and time it.
pub fn poll_once<S, C>(source: &mut S, clock: &C, timeout: Duration) -> PollEvent
where
    S: StatusSource + ?Sized,
    C: Clock + ?Sized,
{
    let start = clock.now_ms();
    match source.fetch(timeout) {
        Ok(status) => {
            let received_at_ms = clock.now_ms();
            PollEvent::Sample {
                status,
                latency_ms: clock.ms_since(start),
                received_at_ms,
            }
        }
        Err(e) => PollEvent::Miss {
            error: e.to_string(),
            at_ms: clock.now_ms(),
        },
    }
}

pub struct Poller {
    rx: Option<xch::Receiver<PollEvent>>,
    interval_ms: Arc<AtomicU64>,
    /// Shutdown flag for immediate response (atomic for lock-free check)
    shutdown: Arc<AtomicBool>,
    /// Join handle for graceful thread cleanup
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl Poller {
    /// Start polling immediately, then every `interval_ms` after each result
    /// has been consumed.
    pub fn spawn<S, C>(mut source: S, clock: C, interval_ms: u64, timeout: Duration) -> Self
    where
        S: StatusSource + Send + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let (tx, rx) = xch::bounded(0);
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let interval = Arc::new(AtomicU64::new(interval_ms.max(MIN_UPDATE_INTERVAL_MS)));
        let interval_clone = interval.clone();

        let join_handle = std::thread::spawn(move || {
            loop {
                if shutdown_clone.load(Ordering::Relaxed) {
                    tracing::debug!("Poller thread received shutdown signal");
                    break;
                }

                let event = poll_once(&mut source, &clock, timeout);
                // Blocks until the consumer takes it; fails once the consumer is gone.
                if tx.send(event).is_err() {
                    tracing::debug!("Poller consumer disconnected, exiting thread");
                    break;
                }

                let mut remaining = Duration::from_millis(interval_clone.load(Ordering::Relaxed));
                while !remaining.is_zero() {
                    if shutdown_clone.load(Ordering::Relaxed) {
                        break;
                    }
                    let slice = remaining.min(SLEEP_SLICE);
                    clock.sleep(slice);
                    remaining = remaining.saturating_sub(slice);
                }
            }
            tracing::trace!("Poller thread exiting cleanly");
        });

        Self {
            rx: Some(rx),
            interval_ms: interval,
            shutdown,
            join_handle: Some(join_handle),
        }
    }

    /// Wait up to `timeout` for the next tick's result.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<PollEvent> {
        self.rx.as_ref()?.recv_timeout(timeout).ok()
    }

    /// Block until the next result; `None` once the thread has stopped.
    pub fn recv(&self) -> Option<PollEvent> {
        self.rx.as_ref()?.recv().ok()
    }

    /// Reschedule; takes effect from the next wait, never cancels a fetch.
    pub fn set_interval_ms(&self, ms: u64) {
        self.interval_ms
            .store(ms.max(MIN_UPDATE_INTERVAL_MS), Ordering::Relaxed);
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms.load(Ordering::Relaxed)
    }

    /// Follow a settings change. Returns true when the interval moved.
    pub fn sync_interval(&self, ms: u64) -> bool {
        let before = self.interval_ms();
        self.set_interval_ms(ms);
        self.interval_ms() != before
    }

    /// Ask the thread to stop after its current fetch.
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        // Dropping the receiver unblocks a pending send.
        self.rx.take();

        // The thread exits once its in-flight fetch returns (bounded by the
        // request timeout) or immediately if it is between fetches.
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => {
                    tracing::trace!("Poller thread joined successfully");
                }
                Err(e) => {
                    tracing::warn!(?e, "Poller thread panicked during shutdown");
                }
            }
        }
    }
}
