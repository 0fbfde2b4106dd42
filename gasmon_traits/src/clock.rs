use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Wall-clock abstraction used wherever a "current instant" is needed.
///
/// - now_ms(): milliseconds since the Unix epoch
/// - sleep(): sleeps for the provided duration (implementations may simulate)
/// - ms_since(): elapsed milliseconds from an earlier `now_ms()` value
pub trait Clock {
    fn now_ms(&self) -> i64;
    fn sleep(&self, d: Duration);

    /// Milliseconds elapsed since `epoch_ms`, saturating at 0 when the clock
    /// went backwards.
    fn ms_since(&self, epoch_ms: i64) -> u64 {
        u64::try_from(self.now_ms().saturating_sub(epoch_ms)).unwrap_or(0)
    }
}

/// Real-time clock backed by `SystemTime`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now_ms(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
            Err(e) => -i64::try_from(e.duration().as_millis()).unwrap_or(i64::MAX),
        }
    }

    #[inline]
    fn sleep(&self, d: Duration) {
        if d.is_zero() {
            return;
        }
        thread::sleep(d);
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }

    fn sleep(&self, d: Duration) {
        (**self).sleep(d);
    }
}

#[cfg(any(test, feature = "test-clock"))]
pub mod test_clock {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    /// Deterministic clock whose time only moves when told to.
    ///
    /// Clones share the same time, so a test can keep a handle while the
    /// code under test owns another.
    /// sleep(d) advances internal time by d without actually sleeping.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now_ms: Arc<AtomicI64>,
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::at(0)
        }
    }

    impl ManualClock {
        pub fn at(epoch_ms: i64) -> Self {
            Self {
                now_ms: Arc::new(AtomicI64::new(epoch_ms)),
            }
        }

        /// Advance the clock by the given duration.
        pub fn advance(&self, d: Duration) {
            let ms = i64::try_from(d.as_millis()).unwrap_or(i64::MAX);
            self.now_ms.fetch_add(ms, Ordering::SeqCst);
        }

        /// Jump to an absolute instant; may move backwards.
        pub fn set(&self, epoch_ms: i64) {
            self.now_ms.store(epoch_ms, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.now_ms.load(Ordering::SeqCst)
        }

        fn sleep(&self, d: Duration) {
            self.advance(d);
        }
    }
}
