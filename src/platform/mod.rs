//! Platform abstraction layer
//!
//! Handles browser/native differences for time: the lifecycle timers read
//! `now_ms`, score records are stamped with `timestamp`.

use std::cell::Cell;
use std::rc::Rc;

/// Source of time for the session
pub trait Clock {
    /// Monotonic milliseconds
    fn now_ms(&self) -> f64;
    /// Human-readable wall-clock time for score records
    fn timestamp(&self) -> String;
}

/// Clock advanced by hand (tests, headless runs)
///
/// Clones share the same time, so a caller can keep one handle and give
/// another to the game.
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
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn timestamp(&self) -> String {
        format!("t+{:.0}ms", self.now.get())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::SystemClock;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use super::Clock;

    /// Process clock for native builds
    #[derive(Debug, Clone)]
    pub struct SystemClock {
        start: Instant,
    }

    impl Default for SystemClock {
        fn default() -> Self {
            Self {
                start: Instant::now(),
            }
        }
    }

    impl Clock for SystemClock {
        fn now_ms(&self) -> f64 {
            self.start.elapsed().as_secs_f64() * 1000.0
        }

        /// Seconds since the Unix epoch
        fn timestamp(&self) -> String {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs().to_string())
                .unwrap_or_else(|_| "N/A".to_string())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserClock;

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::JsValue;

    use super::Clock;

    /// `Date`-based clock
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserClock;

    impl Clock for BrowserClock {
        fn now_ms(&self) -> f64 {
            js_sys::Date::now()
        }

        fn timestamp(&self) -> String {
            js_sys::Date::new_0()
                .to_locale_string("default", &JsValue::UNDEFINED)
                .into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_shared() {
        let clock = ManualClock::new(100.0);
        let handle = clock.clone();
        handle.advance(250.0);
        assert_eq!(clock.now_ms(), 350.0);
        clock.set(10.0);
        assert_eq!(handle.now_ms(), 10.0);
        assert_eq!(handle.timestamp(), "t+10ms");
    }
}
