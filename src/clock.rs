//! Injectable monotonic time source.

use embassy_time::Instant;

/// Monotonic clock consulted for elapsed-time transitions.
///
/// If the host cannot provide time (the clock never advances), the
/// transitions that depend on elapsed time simply never fire and the
/// engine degrades to "no automatic deactivation".
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<C: Clock> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Clock backed by the embassy time driver.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
