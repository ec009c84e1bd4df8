//! Monotonic time sources
//!
//! Widgets never read wall-clock time directly. They hold a [`SharedClock`] so
//! hosts drive them from `Instant` and tests drive them from a [`ManualClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A monotonic millisecond time source
pub trait Clock: Send + Sync {
    /// Milliseconds since an arbitrary fixed origin; never decreases
    fn now_ms(&self) -> f64;
}

/// Shared handle to a clock
pub type SharedClock = Arc<dyn Clock>;

/// Clock backed by `std::time::Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn shared() -> SharedClock {
        Arc::new(Self::new())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Manually advanced clock for deterministic tests and scripted replays
///
/// Stores the current time as `f64` bits so it can be advanced through a
/// shared reference.
#[derive(Debug, Default)]
pub struct ManualClock {
    bits: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            bits: AtomicU64::new(start_ms.to_bits()),
        }
    }

    pub fn shared(start_ms: f64) -> Arc<Self> {
        Arc::new(Self::new(start_ms))
    }

    /// Move time forward by `ms` (negative values are ignored)
    pub fn advance(&self, ms: f64) {
        if ms <= 0.0 || !ms.is_finite() {
            return;
        }
        let now = self.now_ms();
        self.bits.store((now + ms).to_bits(), Ordering::SeqCst);
    }

    /// Jump to an absolute time; earlier times are clamped to the current time
    pub fn set(&self, ms: f64) {
        let now = self.now_ms();
        if ms > now {
            self.bits.store(ms.to_bits(), Ordering::SeqCst);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::new(10.0);
        clock.advance(5.0);
        assert_eq!(clock.now_ms(), 15.0);

        clock.advance(-100.0);
        clock.set(3.0);
        assert_eq!(clock.now_ms(), 15.0);

        clock.set(40.0);
        assert_eq!(clock.now_ms(), 40.0);
    }

    #[test]
    fn test_manual_clock_through_shared_handle() {
        let manual = ManualClock::shared(0.0);
        let shared: SharedClock = manual.clone();
        manual.advance(600.0);
        assert_eq!(shared.now_ms(), 600.0);
    }

    #[test]
    fn test_system_clock_never_goes_backwards() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
