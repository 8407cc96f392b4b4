//! Pre-fetch politeness delay.
//!
//! Each adapter pays a uniform jittered delay in `[min, max)` before every
//! request. This is a per-call delay, not a shared rate budget across calls.
//! The draw is split from the sleep so tests can exercise the jitter math
//! without touching the clock.

use std::time::Duration;

use tracing::debug;

#[derive(Debug, Clone)]
pub struct Throttle {
    min: Duration,
    max: Duration,
}

impl Throttle {
    /// Jitter window used when nothing is configured: 1–3 seconds.
    pub fn default_window() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(3000))
    }

    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max: max.max(min) }
    }

    /// Draw a delay uniformly from `[min, max)`.
    pub fn pick(&self) -> Duration {
        self.pick_with(rand::random::<f64>())
    }

    /// Map a unit fraction in `[0, 1)` onto the jitter window.
    pub fn pick_with(&self, fraction: f64) -> Duration {
        let span = self.max.saturating_sub(self.min);
        self.min + span.mul_f64(fraction.clamp(0.0, 1.0))
    }

    /// Suspend for one jittered delay.
    pub async fn wait(&self) {
        let delay = self.pick();
        debug!(delay_ms = delay.as_millis() as u64, "throttling before fetch");
        tokio::time::sleep(delay).await;
    }
}
