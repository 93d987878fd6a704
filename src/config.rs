//! Tunable configuration for the engine. The defaults are the values the
//! original keyball layout shipped with.

use embassy_time::Duration;

use crate::indicator::{HSV_BLUE, HSV_WHITE, Hsv};
use crate::keycode::{MODIFIER_LALT, hid_usage};
use crate::macro_keys::Chord;

/// Configuration of the automatic mouse layer state machine.
#[derive(Clone, Copy, Debug)]
pub struct AutoMouseConfig {
    /// Layer activated while the engine is armed or clicking.
    pub layer: u8,
    /// Total `|dx| + |dy|` needed to arm the clickable layer. Filters
    /// sensor jitter; 0 arms on the first nonzero sample.
    pub activation_threshold: u16,
    /// How long the armed state survives without motion.
    pub armed_timeout: Duration,
    /// How long the accumulating state survives without motion.
    pub accumulate_timeout: Duration,
    /// Cadence of the no-motion tick supplied by the polling loop.
    pub tick_interval: Duration,
}

impl Default for AutoMouseConfig {
    fn default() -> Self {
        Self {
            layer: 4,
            activation_threshold: 2,
            armed_timeout: Duration::from_millis(800),
            accumulate_timeout: Duration::from_millis(50),
            tick_interval: Duration::from_millis(10),
        }
    }
}

/// Configuration of the layer indicator and scroll mode.
#[derive(Clone, Copy, Debug)]
pub struct IndicatorConfig {
    /// The clickable layer, lit with its own color.
    pub clickable_layer: u8,
    /// The symbol layer on which trackball motion scrolls.
    pub scroll_layer: u8,
    /// Indicator color while the clickable layer is the highest one.
    pub clickable_color: Hsv,
    /// Indicator color for every other layer.
    pub default_color: Hsv,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            clickable_layer: 4,
            scroll_layer: 3,
            clickable_color: HSV_WHITE,
            default_color: HSV_BLUE,
        }
    }
}

impl IndicatorConfig {
    /// Indicator color for the given highest active layer.
    pub fn color_for_layer(&self, layer: u8) -> Hsv {
        if layer == self.clickable_layer {
            self.clickable_color
        } else {
            self.default_color
        }
    }

    /// Whether trackball motion should scroll on the given highest active
    /// layer.
    pub fn scroll_mode_for_layer(&self, layer: u8) -> bool {
        layer == self.scroll_layer
    }
}

/// Chords held by the custom macro keys.
#[derive(Clone, Debug)]
pub struct MacroKeysConfig {
    /// Escape that also switches the IME off.
    pub ime_escape: Chord,
    /// IME-off launcher chord (alt-space).
    pub launcher: Chord,
}

impl Default for MacroKeysConfig {
    fn default() -> Self {
        Self {
            ime_escape: Chord::new(0, &[hid_usage::LANG2, hid_usage::ESCAPE]),
            launcher: Chord::new(MODIFIER_LALT, &[hid_usage::SPACE, hid_usage::LANG2]),
        }
    }
}
