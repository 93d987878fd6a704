//! The trait for output device controllers.
//!
//! A controller owns its event subscription and reacts to events by
//! driving some output device (an indicator light, a display, ...). It
//! never produces HID reports.

/// This trait provides the interface for individual output device
/// controllers.
pub trait Controller {
    /// Type of the received events.
    type Event;

    /// Wait for the next event.
    async fn next_event(&mut self) -> Self::Event;

    /// Process the received event.
    async fn process_event(&mut self, event: Self::Event);

    /// Event loop that continuously processes incoming events.
    async fn event_loop(&mut self) -> ! {
        loop {
            let event = self.next_event().await;
            self.process_event(event).await;
        }
    }
}
