//! Monotonic millisecond clocks

use std::cell::Cell;
use std::rc::Rc;

/// Source of monotonic time in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Real time since the clock was created
#[derive(Debug)]
pub struct MonotonicClock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
    /// `Date.now()` can step backwards; never report less than this
    #[cfg(target_arch = "wasm32")]
    last: Cell<f64>,
    #[cfg(target_arch = "wasm32")]
    origin: f64,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        Self {
            last: Cell::new(0.0),
            origin: js_sys::Date::now(),
        }
    }
}

impl Clock for MonotonicClock {
    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> f64 {
        let now = (js_sys::Date::now() - self.origin).max(self.last.get());
        self.last.set(now);
        now
    }
}

/// Hand-advanced clock for replays and tests. Clones share one timeline.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms.max(0.0));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(10.0);
        let handle = clock.clone();
        handle.advance(5.0);
        assert_eq!(clock.now_ms(), 15.0);
        // Time never runs backwards
        handle.advance(-100.0);
        assert_eq!(clock.now_ms(), 15.0);
    }

    #[test]
    fn test_monotonic_clock_never_decreases() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
