//! Keycodes understood by the engine.
//!
//! The host keymap resolves matrix positions to keycodes before anything
//! reaches this crate. Only the custom codes in the vendor range get
//! special treatment here; every other code travels as [`KeyCode::Hid`]
//! and is only ever inspected for its press/release edge.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use bitfield_struct::bitfield;
use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

/// Raw code of [`MacroKey::ImeEscape`], as reported to Remap.
pub const RAW_IME_ESCAPE: u16 = 0x5DAD;
/// Raw code of [`MacroKey::Launcher`].
pub const RAW_LAUNCHER: u16 = 0x5DAE;
/// Raw code of [`PointerButton::Primary`].
pub const RAW_POINTER_BUTTON_1: u16 = 0x5DAF;
/// Raw code of [`PointerButton::Secondary`].
pub const RAW_POINTER_BUTTON_2: u16 = 0x5DB0;
/// Raw code of [`PointerButton::Middle`].
pub const RAW_POINTER_BUTTON_3: u16 = 0x5DB1;

/// HID usage codes sent by the macro key chords.
pub(crate) mod hid_usage {
    /// Keyboard Escape
    pub const ESCAPE: u8 = 0x29;
    /// Keyboard Spacebar
    pub const SPACE: u8 = 0x2C;
    /// Keyboard LANG2 (IME off)
    pub const LANG2: u8 = 0x91;
}

/// Left Alt bit of the HID modifier byte.
pub(crate) const MODIFIER_LALT: u8 = 1 << 2;

/// A keycode delivered with each key event.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// One of the three synthetic pointer buttons.
    PointerButton(PointerButton),
    /// One of the custom held-chord macro keys.
    Macro(MacroKey),
    /// Any plain HID usage code.
    Hid(u16),
}

impl KeyCode {
    /// Classify a raw 16-bit code. The custom keys occupy
    /// `0x5DAD..=0x5DB1`; everything else is a plain HID code.
    pub const fn from_raw(code: u16) -> Self {
        match code {
            RAW_IME_ESCAPE => Self::Macro(MacroKey::ImeEscape),
            RAW_LAUNCHER => Self::Macro(MacroKey::Launcher),
            RAW_POINTER_BUTTON_1 => Self::PointerButton(PointerButton::Primary),
            RAW_POINTER_BUTTON_2 => Self::PointerButton(PointerButton::Secondary),
            RAW_POINTER_BUTTON_3 => Self::PointerButton(PointerButton::Middle),
            _ => Self::Hid(code),
        }
    }

    /// The raw 16-bit code this keycode came from.
    pub const fn raw(self) -> u16 {
        match self {
            Self::Macro(MacroKey::ImeEscape) => RAW_IME_ESCAPE,
            Self::Macro(MacroKey::Launcher) => RAW_LAUNCHER,
            Self::PointerButton(PointerButton::Primary) => RAW_POINTER_BUTTON_1,
            Self::PointerButton(PointerButton::Secondary) => RAW_POINTER_BUTTON_2,
            Self::PointerButton(PointerButton::Middle) => RAW_POINTER_BUTTON_3,
            Self::Hid(code) => code,
        }
    }
}

/// The three synthetic pointer buttons. They are keymap entries, not
/// physical mouse buttons; the engine merges them into the outgoing
/// pointer report.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PointerButton {
    /// Left
    Primary = 0,
    /// Right
    Secondary = 1,
    /// Middle
    Middle = 2,
}

impl PointerButton {
    /// This button's bit in the report bitmask.
    pub const fn bit(self) -> PointerButtons {
        match self {
            Self::Primary => PointerButtons::PRIMARY,
            Self::Secondary => PointerButtons::SECONDARY,
            Self::Middle => PointerButtons::MIDDLE,
        }
    }
}

/// Custom macro keys that hold a chord of plain keycodes while pressed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroKey {
    /// Escape that also switches the IME off.
    ImeEscape,
    /// IME-off launcher chord (alt-space).
    Launcher,
}

/// Pointer button bitmask merged into outgoing mouse reports. Only the
/// low three bits are assigned.
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Eq, PartialEq)]
pub struct PointerButtons {
    #[bits(1)]
    pub primary: bool,
    #[bits(1)]
    pub secondary: bool,
    #[bits(1)]
    pub middle: bool,
    #[bits(5)]
    _reserved: u8,
}

impl BitOr for PointerButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}
impl BitAnd for PointerButtons {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() & rhs.into_bits())
    }
}
impl Not for PointerButtons {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_bits(!self.into_bits())
    }
}
impl BitOrAssign for PointerButtons {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}
impl BitAndAssign for PointerButtons {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl PointerButtons {
    pub const PRIMARY: Self = Self::new().with_primary(true);
    pub const SECONDARY: Self = Self::new().with_secondary(true);
    pub const MIDDLE: Self = Self::new().with_middle(true);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn raw_roundtrip_for_custom_codes() {
        for raw in RAW_IME_ESCAPE..=RAW_POINTER_BUTTON_3 {
            let code = KeyCode::from_raw(raw);
            assert_ne!(code, KeyCode::Hid(raw));
            assert_eq!(code.raw(), raw);
        }
        assert_eq!(KeyCode::from_raw(0x0004), KeyCode::Hid(0x0004));
    }

    #[test]
    fn button_bits_match_report_positions() {
        assert_eq!(PointerButton::Primary.bit().into_bits(), 1 << 0);
        assert_eq!(PointerButton::Secondary.bit().into_bits(), 1 << 1);
        assert_eq!(PointerButton::Middle.bit().into_bits(), 1 << 2);

        let mut buttons = PointerButtons::new();
        buttons |= PointerButton::Middle.bit();
        buttons |= PointerButton::Primary.bit();
        assert_eq!(buttons.into_bits(), 0b101);
        buttons &= !PointerButton::Primary.bit();
        assert_eq!(buttons.into_bits(), 0b100);
    }
}
