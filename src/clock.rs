//! Suspension points of the control loop.

use embassy_time::Duration;

/// Lets the control loop pause without knowing where time comes from.
#[allow(async_fn_in_trait)]
pub trait Clock {
    /// Suspend the caller for `duration`.
    async fn sleep(&mut self, duration: Duration);
}

/// Sleeps on the embassy timer queue.
#[cfg(feature = "esp32c3")]
pub struct EmbassyClock;

#[cfg(feature = "esp32c3")]
impl Clock for EmbassyClock {
    async fn sleep(&mut self, duration: Duration) {
        embassy_time::Timer::after(duration).await;
    }
}
