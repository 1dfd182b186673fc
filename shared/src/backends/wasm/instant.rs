use std::time::Duration;

/// A point in time, used to expire pending handshakes
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Instant {
    millis: f64,
}

impl Instant {
    pub fn now() -> Self {
        Self {
            millis: js_sys::Date::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        Self::now().duration_since(self)
    }

    /// Zero if `earlier` is actually later than `self`
    pub fn duration_since(&self, earlier: &Instant) -> Duration {
        let millis = (self.millis - earlier.millis).max(0.0);
        Duration::from_secs_f64(millis / 1000.0)
    }

    pub fn add_millis(&mut self, millis: u32) {
        self.millis += f64::from(millis);
    }

    pub fn add_duration(&mut self, duration: Duration) {
        self.millis += duration.as_secs_f64() * 1000.0;
    }
}
