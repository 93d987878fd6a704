//! Held-chord expansion for the custom macro keys.
//!
//! Each macro key registers a fixed chord of plain keycodes while held
//! and unregisters it on release, mirroring QMK's
//! `register_code`/`unregister_code` pairs. Macro keys deliberately do
//! not count as "other keys" for the auto mouse layer: holding one must
//! not cancel an armed layer.

use heapless::Vec;
use usbd_hid::descriptor::KeyboardReport;

use crate::config::MacroKeysConfig;
use crate::keycode::MacroKey;

/// Maximum keycodes in one chord, bounded by the 6KRO report.
pub const CHORD_MAX_KEYS: usize = 6;

/// A modifier byte plus plain keycodes held together.
#[derive(Clone, Debug, Default)]
pub struct Chord {
    /// HID modifier bits OR-ed into the report while held.
    pub modifiers: u8,
    /// Plain HID usage codes pressed together.
    pub keycodes: Vec<u8, CHORD_MAX_KEYS>,
}

impl Chord {
    /// Panics if `keycodes` holds more than [`CHORD_MAX_KEYS`] codes.
    pub fn new(modifiers: u8, keycodes: &[u8]) -> Self {
        Self {
            modifiers,
            keycodes: Vec::from_iter(keycodes.iter().copied()),
        }
    }
}

/// Register/unregister state of the macro keys.
pub struct MacroKeys {
    config: MacroKeysConfig,
    modifiers: u8,
    held: Vec<u8, CHORD_MAX_KEYS>,
}

impl MacroKeys {
    pub fn new(config: MacroKeysConfig) -> Self {
        Self {
            config,
            modifiers: 0,
            held: Vec::new(),
        }
    }

    /// Apply a macro key edge and return the keyboard report to flush.
    pub fn on_macro_key(&mut self, key: MacroKey, pressed: bool) -> KeyboardReport {
        let chord = match key {
            MacroKey::ImeEscape => &self.config.ime_escape,
            MacroKey::Launcher => &self.config.launcher,
        };
        if pressed {
            self.modifiers |= chord.modifiers;
            for &code in &chord.keycodes {
                if !self.held.contains(&code) {
                    // A full report drops the extra codes, like 6KRO does.
                    let _ = self.held.push(code);
                }
            }
        } else {
            self.modifiers &= !chord.modifiers;
            self.held.retain(|code| !chord.keycodes.contains(code));
        }
        self.report()
    }

    fn report(&self) -> KeyboardReport {
        let mut keycodes = [0u8; 6];
        for (slot, &code) in keycodes.iter_mut().zip(self.held.iter()) {
            *slot = code;
        }
        KeyboardReport {
            modifier: self.modifiers,
            reserved: 0,
            leds: 0,
            keycodes,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::keycode::hid_usage::{ESCAPE, LANG2, SPACE};

    #[test]
    fn ime_escape_holds_lang2_and_escape() {
        let mut keys = MacroKeys::new(MacroKeysConfig::default());

        let report = keys.on_macro_key(MacroKey::ImeEscape, true);
        assert_eq!(report.modifier, 0);
        assert_eq!(report.keycodes, [LANG2, ESCAPE, 0, 0, 0, 0]);

        let report = keys.on_macro_key(MacroKey::ImeEscape, false);
        assert_eq!(report.modifier, 0);
        assert_eq!(report.keycodes, [0; 6]);
    }

    #[test]
    fn launcher_holds_alt_space_chord() {
        let mut keys = MacroKeys::new(MacroKeysConfig::default());

        let report = keys.on_macro_key(MacroKey::Launcher, true);
        assert_eq!(report.modifier, 1 << 2);
        assert_eq!(report.keycodes, [SPACE, LANG2, 0, 0, 0, 0]);

        let report = keys.on_macro_key(MacroKey::Launcher, false);
        assert_eq!(report.modifier, 0);
        assert_eq!(report.keycodes, [0; 6]);
    }

    #[test]
    fn releasing_one_chord_keeps_unrelated_codes() {
        let mut keys = MacroKeys::new(MacroKeysConfig::default());

        keys.on_macro_key(MacroKey::ImeEscape, true);
        keys.on_macro_key(MacroKey::Launcher, true);
        let report = keys.on_macro_key(MacroKey::ImeEscape, false);
        // LANG2 is shared between the chords, so it is released too; the
        // launcher-only codes survive.
        assert_eq!(report.keycodes, [SPACE, 0, 0, 0, 0, 0]);
        assert_eq!(report.modifier, 1 << 2);
    }
}
