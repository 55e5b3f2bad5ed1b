use std::time::{Duration, Instant};

/// Trailing-edge debounce: only the last value scheduled in a burst fires, `delay` after
/// that last call.
///
/// Time is passed in by the caller, so the frame loop (or a test) decides what "now" is.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace whatever is pending and restart the quiet window.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().map(|(due, _)| *due)?;
        if now < due {
            return None;
        }
        self.flush()
    }

    /// Fire the pending value now, if any.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(due, _)| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::Debouncer;
    use std::time::{Duration, Instant};

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn burst_collapses_into_last_call() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.schedule(1, t0);
        d.schedule(2, t0 + Duration::from_millis(200));
        d.schedule(3, t0 + Duration::from_millis(400));

        // 500ms after the first call, but only 100ms after the last one.
        assert_eq!(d.poll(t0 + Duration::from_millis(500)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(900)), Some(3));
        assert_eq!(d.poll(t0 + Duration::from_millis(2000)), None);
    }

    #[test]
    fn flush_and_cancel() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.schedule("a", t0);
        assert!(d.is_pending());
        assert_eq!(d.time_until_due(t0), Some(DELAY));
        assert_eq!(d.flush(), Some("a"));
        assert!(!d.is_pending());

        d.schedule("b", t0);
        d.cancel();
        assert_eq!(d.poll(t0 + DELAY), None);
        assert_eq!(d.time_until_due(t0), None);
    }
}
