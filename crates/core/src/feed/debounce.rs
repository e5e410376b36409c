//! Gesture timing utilities shared by the feed machine.
//!
//! One [`Debouncer`] covers both wheel and touch navigation (minimum gap
//! between accepted gestures); [`TapDetector`] is its inverse (maximum gap
//! between two taps that count as a double tap).

use std::time::{Duration, Instant};

/// Rejects events that arrive less than `window` after the last accepted one.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Returns `true` if an event at `now` would clear the window.
    pub fn ready(&self, now: Instant) -> bool {
        match self.last_accepted {
            None => true,
            Some(last) => now.duration_since(last) >= self.window,
        }
    }

    /// Mark an event at `now` as accepted, restarting the window.
    pub fn record(&mut self, now: Instant) {
        self.last_accepted = Some(now);
    }

    /// Accept the event if the window has elapsed, recording it on success.
    pub fn try_accept(&mut self, now: Instant) -> bool {
        if self.ready(now) {
            self.record(now);
            true
        } else {
            false
        }
    }
}

/// Detects two taps within `window` of each other.
#[derive(Debug, Clone, Copy)]
pub struct TapDetector {
    window: Duration,
    last_tap: Option<Instant>,
}

impl TapDetector {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_tap: None,
        }
    }

    /// Register a tap at `now`; returns `true` when it completes a double tap.
    ///
    /// Every tap restarts the window, so three rapid taps report two doubles.
    pub fn tap(&mut self, now: Instant) -> bool {
        let double = matches!(self.last_tap, Some(last) if now.duration_since(last) < self.window);
        self.last_tap = Some(now);
        double
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn first_event_always_accepted() {
        let mut d = Debouncer::new(WINDOW);
        assert!(d.try_accept(Instant::now()));
    }

    #[test]
    fn event_inside_window_rejected() {
        let mut d = Debouncer::new(WINDOW);
        let t0 = Instant::now();
        assert!(d.try_accept(t0));
        assert!(!d.try_accept(t0 + Duration::from_millis(299)));
    }

    #[test]
    fn event_at_window_boundary_accepted() {
        let mut d = Debouncer::new(WINDOW);
        let t0 = Instant::now();
        assert!(d.try_accept(t0));
        assert!(d.try_accept(t0 + WINDOW));
    }

    #[test]
    fn rejected_event_does_not_restart_window() {
        let mut d = Debouncer::new(WINDOW);
        let t0 = Instant::now();
        assert!(d.try_accept(t0));
        assert!(!d.try_accept(t0 + Duration::from_millis(200)));
        // Window is still measured from t0, not from the rejected event.
        assert!(d.try_accept(t0 + Duration::from_millis(300)));
    }

    #[test]
    fn ready_does_not_consume() {
        let mut d = Debouncer::new(WINDOW);
        let t0 = Instant::now();
        assert!(d.ready(t0));
        assert!(d.ready(t0));
        d.record(t0);
        assert!(!d.ready(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn two_quick_taps_are_a_double() {
        let mut taps = TapDetector::new(WINDOW);
        let t0 = Instant::now();
        assert!(!taps.tap(t0));
        assert!(taps.tap(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn slow_taps_are_singles() {
        let mut taps = TapDetector::new(WINDOW);
        let t0 = Instant::now();
        assert!(!taps.tap(t0));
        assert!(!taps.tap(t0 + Duration::from_millis(400)));
    }

    #[test]
    fn tap_at_window_boundary_is_single() {
        let mut taps = TapDetector::new(WINDOW);
        let t0 = Instant::now();
        assert!(!taps.tap(t0));
        assert!(!taps.tap(t0 + WINDOW));
    }
}
