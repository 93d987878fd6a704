#![no_std]

//! Automatic mouse layer engine for trackball keyboards.
//!
//! On a split keyboard with an integrated trackball, the keys under the
//! fingers should turn into pointer buttons whenever the hand is on the
//! ball, and back into letters the moment typing resumes. This crate
//! implements that arbitration: a per-tick state machine which watches
//! pointer motion, arms a temporary "clickable" layer once enough motion
//! has accumulated, merges the synthetic pointer buttons into outgoing
//! mouse reports, and drives the scroll-mode flag and indicator color from
//! the active layer.
//!
//! The host firmware keeps ownership of the hardware: matrix scanning,
//! sensor drivers and the USB/BLE report writer plug into this crate
//! through the [`input_device::InputDevice`] trait and the channels in
//! [`channel`].

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod automouse;
pub mod channel;
pub mod clock;
pub mod config;
pub mod controller;
pub mod event;
pub mod hid;
pub mod indicator;
pub mod input_device;
pub mod keycode;
pub mod layer;
pub mod macro_keys;
pub mod processor;
pub mod state;

// Re-exported for the `run_devices!`/`join_all!` macros.
pub use embassy_futures;
pub use futures;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Mutex flavor used by every channel in this crate.
pub type RawMutex = CriticalSectionRawMutex;

/// Capacity of [`channel::EVENT_CHANNEL`].
pub const EVENT_CHANNEL_SIZE: usize = 16;
/// Capacity of [`channel::KEYBOARD_REPORT_CHANNEL`].
pub const REPORT_CHANNEL_SIZE: usize = 16;
/// Capacity of [`channel::LAYER_CHANNEL`].
pub const LAYER_CHANNEL_SIZE: usize = 4;
/// Number of subscribers of [`channel::LAYER_CHANNEL`].
pub const LAYER_CHANNEL_SUBS: usize = 2;
/// Number of (non-immediate) publishers of [`channel::LAYER_CHANNEL`].
pub const LAYER_CHANNEL_PUBS: usize = 1;
