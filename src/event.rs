//! Event types flowing between devices, processors and controllers.

use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

use crate::keycode::KeyCode;

/// A key press or release, after the host keymap resolved the matrix
/// position to a keycode.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub code: KeyCode,
    pub pressed: bool,
}

/// Relative displacement reported by the optical sensor for one polling
/// tick. A tick without movement is delivered as `(0, 0)`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointerEvent {
    pub dx: i16,
    pub dy: i16,
}

/// Events consumed by input processors.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Key press or release.
    Key(KeyEvent),
    /// Pointer displacement for the current tick.
    Pointer(PointerEvent),
}

/// The highest active layer changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerChangeEvent {
    pub layer: u8,
}
