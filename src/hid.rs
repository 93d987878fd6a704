//! Types for HID reports handed to the host-side report writer.

use serde::Serialize;
use usbd_hid::descriptor::{AsInputReport, KeyboardReport, MouseReport};

/// Reports emitted by input processors. The host firmware drains
/// [`crate::channel::KEYBOARD_REPORT_CHANNEL`] and forwards each report
/// via USB or BLE.
#[derive(Serialize)]
pub enum Report {
    /// Normal keyboard hid report
    KeyboardReport(KeyboardReport),
    /// Mouse hid report
    MouseReport(MouseReport),
}

impl AsInputReport for Report {}
