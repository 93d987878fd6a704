//! Input device trait and the wiring macros.
//!
//! Sensor and matrix tasks live in the host firmware; they implement
//! [`InputDevice`] and are bound to [`crate::channel::EVENT_CHANNEL`]
//! with [`run_devices!`], running concurrently with the processor's
//! polling loop.

use crate::event::Event;

/// The trait for input devices.
///
/// An input device produces raw [`Event`]s: the trackball sensor task
/// emits per-tick [`crate::event::PointerEvent`]s, the matrix task emits
/// [`crate::event::KeyEvent`]s.
pub trait InputDevice {
    /// Read the next raw input event.
    async fn read_event(&mut self) -> Event;
}

/// Macro to bind input devices to an event channel and run all of them.
///
/// # Example
/// ```rust,ignore
/// let device_future = run_devices! {
///     (ball, matrix) => automouse::channel::EVENT_CHANNEL,
/// };
/// embassy_futures::join::join(device_future, processor.polling_loop()).await;
/// ```
#[macro_export]
macro_rules! run_devices {
    ( $( ( $( $dev:ident ),* ) => $channel:expr ),+ $(,)? ) => {{
        use $crate::futures::{self, future::FutureExt, select_biased};
        $crate::join_all!(
            $(
                async {
                    loop {
                        let event = select_biased! {
                            $(
                                e = $crate::input_device::InputDevice::read_event(&mut $dev).fuse() => e,
                            )*
                        };
                        $channel.send(event).await;
                    }
                }
            ),+
        )
    }};
}

/// Helper macro for joining all futures
#[macro_export]
macro_rules! join_all {
    ($fut:expr) => {
        $fut
    };
    ($f1:expr, $f2:expr) => {
        $crate::embassy_futures::join::join($f1, $f2)
    };
    ($f1:expr, $f2:expr, $f3:expr) => {
        $crate::embassy_futures::join::join3($f1, $f2, $f3)
    };
    ($f1:expr, $f2:expr, $f3:expr, $f4:expr) => {
        $crate::embassy_futures::join::join4($f1, $f2, $f3, $f4)
    };
    ($f1:expr, $f2:expr, $f3:expr, $f4:expr, $($rest:expr),+) => {{
        let head = $crate::embassy_futures::join::join4($f1, $f2, $f3, $f4);
        let tail = $crate::join_all!($($rest),+);
        $crate::embassy_futures::join::join(head, tail)
    }};
}
