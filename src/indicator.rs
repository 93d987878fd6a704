//! Layer indicator: the scroll-mode flag and the underglow color derived
//! from the highest active layer.

use crate::channel::LayerSub;
use crate::config::IndicatorConfig;
use crate::controller::Controller;
use crate::event::LayerChangeEvent;
use crate::processor::Runnable;
use crate::state::set_scroll_mode;

/// HSV color triple, 0-255 per component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsv {
    pub hue: u8,
    pub sat: u8,
    pub val: u8,
}

pub const HSV_WHITE: Hsv = Hsv {
    hue: 0,
    sat: 0,
    val: 255,
};
pub const HSV_BLUE: Hsv = Hsv {
    hue: 170,
    sat: 255,
    val: 255,
};

/// Driver for the indicator light (usually the underglow strip).
pub trait RgbIndicator {
    fn set_color(&mut self, color: Hsv);
}

/// Controller reacting to layer changes: updates the scroll-mode flag and
/// pushes the layer color to the indicator driver.
pub struct IndicatorController<R: RgbIndicator> {
    sub: LayerSub,
    rgb: R,
    config: IndicatorConfig,
}

impl<R: RgbIndicator> IndicatorController<R> {
    pub fn new(sub: LayerSub, rgb: R, config: IndicatorConfig) -> Self {
        Self { sub, rgb, config }
    }
}

impl<R: RgbIndicator> Controller for IndicatorController<R> {
    type Event = LayerChangeEvent;

    async fn next_event(&mut self) -> Self::Event {
        self.sub.next_message_pure().await
    }

    async fn process_event(&mut self, event: Self::Event) {
        let scroll = self.config.scroll_mode_for_layer(event.layer);
        set_scroll_mode(scroll);
        let color = self.config.color_for_layer(event.layer);
        info!("Layer {}: scroll mode {}, indicator {:?}", event.layer, scroll, color);
        self.rgb.set_color(color);
    }
}

impl<R: RgbIndicator> Runnable for IndicatorController<R> {
    async fn run(&mut self) -> ! {
        self.event_loop().await
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clickable_layer_gets_its_own_color() {
        let config = IndicatorConfig::default();
        assert_eq!(config.color_for_layer(4), HSV_WHITE);
        for layer in [0, 1, 2, 3, 5] {
            assert_eq!(config.color_for_layer(layer), HSV_BLUE);
        }
    }

    #[test]
    fn scroll_mode_only_on_symbol_layer() {
        let config = IndicatorConfig::default();
        assert!(config.scroll_mode_for_layer(3));
        for layer in [0, 1, 2, 4, 5] {
            assert!(!config.scroll_mode_for_layer(layer));
        }
    }
}
