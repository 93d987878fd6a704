//! Runtime traits for event consumers.
//!
//! [`InputProcessor`] provides the core consume loop over
//! [`crate::channel::EVENT_CHANNEL`], and [`PollingProcessor`] extends it
//! with timer-driven `update` calls interleaved with event handling.

use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Instant, Timer};

use crate::channel::{EVENT_CHANNEL, KEYBOARD_REPORT_CHANNEL};
use crate::event::Event;
use crate::hid::Report;

/// The trait for anything that runs as its own task.
pub trait Runnable {
    async fn run(&mut self) -> !;
}

/// The trait for input processors.
///
/// The input processor processes the [`Event`]s from the input devices
/// and converts them to HID reports. There might be multiple reports
/// generated for one event, so the "sending report" operation is done
/// inside `process`.
pub trait InputProcessor {
    /// Process one incoming event.
    async fn process(&mut self, event: Event);

    /// Send a processed report to the USB/BLE writer.
    async fn send_report(&self, report: Report) {
        KEYBOARD_REPORT_CHANNEL.send(report).await;
    }

    /// Default processing loop that continuously receives and processes
    /// events.
    async fn process_loop(&mut self) -> ! {
        loop {
            let event = EVENT_CHANNEL.receive().await;
            self.process(event).await;
        }
    }
}

/// Trait for processors with periodic updates.
///
/// The polling loop alternates between waiting for events and calling
/// `update()` at the specified interval.
pub trait PollingProcessor: InputProcessor {
    /// Returns the interval between `update` calls.
    fn interval(&self) -> Duration;

    /// Update periodically, will be called according to [`Self::interval()`]
    async fn update(&mut self);

    /// Polling loop that processes events and calls `update()` at the
    /// specified interval.
    async fn polling_loop(&mut self) -> ! {
        let mut last = Instant::now();

        loop {
            let elapsed = last.elapsed();

            match select(
                Timer::after(self.interval().checked_sub(elapsed).unwrap_or(Duration::MIN)),
                EVENT_CHANNEL.receive(),
            )
            .await
            {
                Either::First(_) => {
                    self.update().await;
                    last = Instant::now();
                }
                Either::Second(event) => self.process(event).await,
            }
        }
    }
}
