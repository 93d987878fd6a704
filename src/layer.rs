//! The shared layer stack.
//!
//! The conception of layers is borrowed from QMK: a stack of activation
//! bits over the keymap, where the highest active layer wins. Only the
//! activation state lives here; the key-action tables stay in the host
//! firmware.

use crate::channel::send_layer_event;
use crate::event::LayerChangeEvent;

/// Layer side effects driven by input processors.
///
/// Both operations are level-triggered: enabling an already-active layer
/// (or disabling an inactive one) is a no-op.
pub trait LayerStack {
    fn layer_on(&mut self, layer: u8);
    fn layer_off(&mut self, layer: u8);
}

/// Activation state of each layer plus the default layer.
///
/// Publishes a [`LayerChangeEvent`] whenever the highest active layer
/// actually changes.
pub struct LayerState<const NUM_LAYER: usize> {
    layer_state: [bool; NUM_LAYER],
    /// Default layer number, max: 32
    default_layer: u8,
}

impl<const NUM_LAYER: usize> Default for LayerState<NUM_LAYER> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const NUM_LAYER: usize> LayerState<NUM_LAYER> {
    pub const fn new() -> Self {
        Self {
            layer_state: [false; NUM_LAYER],
            default_layer: 0,
        }
    }

    /// Whether the given layer is currently active.
    pub fn is_active(&self, layer: u8) -> bool {
        (layer as usize) < NUM_LAYER && self.layer_state[layer as usize]
    }

    /// The highest active layer, falling back to the default layer.
    pub fn get_activated_layer(&self) -> u8 {
        for layer_idx in (0..NUM_LAYER).rev() {
            if self.layer_state[layer_idx] || layer_idx as u8 == self.default_layer {
                return layer_idx as u8;
            }
        }

        self.default_layer
    }

    /// Activate given layer
    pub fn activate_layer(&mut self, layer_num: u8) {
        self.set_layer_state(layer_num, true);
    }

    /// Deactivate given layer
    pub fn deactivate_layer(&mut self, layer_num: u8) {
        self.set_layer_state(layer_num, false);
    }

    /// Toggle given layer
    pub fn toggle_layer(&mut self, layer_num: u8) {
        if layer_num as usize >= NUM_LAYER {
            warn!(
                "Not a valid layer {}, keyboard supports only {} layers",
                layer_num, NUM_LAYER
            );
            return;
        }
        self.set_layer_state(layer_num, !self.layer_state[layer_num as usize]);
    }

    fn set_layer_state(&mut self, layer_num: u8, active: bool) {
        if layer_num as usize >= NUM_LAYER {
            warn!(
                "Not a valid layer {}, keyboard supports only {} layers",
                layer_num, NUM_LAYER
            );
            return;
        }
        let before = self.get_activated_layer();
        self.layer_state[layer_num as usize] = active;
        let after = self.get_activated_layer();
        if before != after {
            send_layer_event(LayerChangeEvent { layer: after });
        }
    }
}

impl<const NUM_LAYER: usize> LayerStack for LayerState<NUM_LAYER> {
    fn layer_on(&mut self, layer: u8) {
        self.activate_layer(layer);
    }

    fn layer_off(&mut self, layer: u8) {
        self.deactivate_layer(layer);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn highest_active_layer_wins() {
        let mut layers: LayerState<6> = LayerState::new();
        assert_eq!(layers.get_activated_layer(), 0);

        layers.activate_layer(2);
        layers.activate_layer(4);
        assert_eq!(layers.get_activated_layer(), 4);
        assert!(layers.is_active(2));

        layers.deactivate_layer(4);
        assert_eq!(layers.get_activated_layer(), 2);
    }

    #[test]
    fn deactivating_inactive_layer_is_a_noop() {
        let mut layers: LayerState<6> = LayerState::new();
        layers.deactivate_layer(3);
        assert_eq!(layers.get_activated_layer(), 0);
        assert!(!layers.is_active(3));
    }

    #[test]
    fn toggling_flips_activation() {
        let mut layers: LayerState<6> = LayerState::new();
        layers.toggle_layer(5);
        assert!(layers.is_active(5));
        layers.toggle_layer(5);
        assert!(!layers.is_active(5));
    }

    #[test]
    fn out_of_range_layer_is_ignored() {
        let mut layers: LayerState<6> = LayerState::new();
        layers.activate_layer(6);
        layers.activate_layer(255);
        assert_eq!(layers.get_activated_layer(), 0);
        assert!(!layers.is_active(255));
    }
}
