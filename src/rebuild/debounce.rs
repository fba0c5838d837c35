use std::time::{Duration, Instant};

/// Default coalescing window for rebuild requests.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(50);

/// Coalesces rebuild requests.
///
/// A pending request starts a rebuild at most once per window, and never
/// while another rebuild is in flight. Requests that arrive during a window
/// or during a rebuild collapse into a single follow-up rebuild, so the
/// last edit is always picked up.
#[derive(Debug, Clone)]
pub struct Debounce {
    window: Duration,
    pending: bool,
    in_flight: bool,
    last_start: Option<Instant>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Debounce {
    /// Creates a debounce with the given window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: false,
            in_flight: false,
            last_start: None,
        }
    }

    /// Records a rebuild request.
    pub fn request(&mut self) {
        self.pending = true;
    }

    /// Returns whether a request is waiting to be served.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns whether a rebuild is running.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Starts a rebuild if one is due at `now`.
    ///
    /// Returns `true` if the caller should rebuild now; the caller must
    /// then call [`Debounce::finish`] when done.
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if !self.pending || self.in_flight {
            return false;
        }
        let due = self
            .last_start
            .is_none_or(|last| now.saturating_duration_since(last) >= self.window);
        if !due {
            return false;
        }
        self.pending = false;
        self.in_flight = true;
        self.last_start = Some(now);
        true
    }

    /// Marks the running rebuild as finished.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn first_request_fires_immediately() {
        let t0 = Instant::now();
        let mut debounce = Debounce::default();
        assert!(!debounce.try_begin(t0));
        debounce.request();
        assert!(debounce.try_begin(t0));
        debounce.finish();
        assert!(!debounce.try_begin(t0 + 100 * MS));
    }

    #[test]
    fn burst_collapses_into_one_follow_up() {
        let t0 = Instant::now();
        let mut debounce = Debounce::default();
        debounce.request();
        assert!(debounce.try_begin(t0));
        debounce.finish();

        for i in 1..5 {
            debounce.request();
            assert!(!debounce.try_begin(t0 + i * 10 * MS));
        }
        assert!(debounce.try_begin(t0 + 50 * MS));
        debounce.finish();
        assert!(!debounce.is_pending());
        assert!(!debounce.try_begin(t0 + 200 * MS));
    }

    #[test]
    fn never_two_in_flight() {
        let t0 = Instant::now();
        let mut debounce = Debounce::default();
        debounce.request();
        assert!(debounce.try_begin(t0));
        debounce.request();
        assert!(!debounce.try_begin(t0 + 500 * MS));
        assert!(debounce.is_in_flight());
        debounce.finish();
        assert!(debounce.try_begin(t0 + 500 * MS));
    }
}
