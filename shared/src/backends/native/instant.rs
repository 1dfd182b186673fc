use std::time::Duration;

/// A point in time, used to expire pending handshakes
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    inner: std::time::Instant,
}

impl Instant {
    pub fn now() -> Self {
        Self {
            inner: std::time::Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.inner.elapsed()
    }

    /// Zero if `earlier` is actually later than `self`
    pub fn duration_since(&self, earlier: &Instant) -> Duration {
        self.inner.saturating_duration_since(earlier.inner)
    }

    pub fn add_millis(&mut self, millis: u32) {
        self.inner += Duration::from_millis(u64::from(millis));
    }

    pub fn add_duration(&mut self, duration: Duration) {
        self.inner += duration;
    }
}
