//! The automatic mouse layer state machine and its input processor.
//!
//! Rolling the trackball arms a temporary "clickable" layer so the keys
//! under the fingers become pointer buttons; the layer drops again after
//! an idle timeout, and any ordinary key press cancels it immediately.
//! Small motions are summed first so sensor jitter alone never arms the
//! layer.

use core::cell::RefCell;

use embassy_time::{Duration, Instant};
use usbd_hid::descriptor::MouseReport;

use crate::clock::{Clock, EmbassyClock};
use crate::config::{AutoMouseConfig, MacroKeysConfig};
use crate::event::{Event, KeyEvent, PointerEvent};
use crate::hid::Report;
use crate::keycode::{KeyCode, PointerButton, PointerButtons};
use crate::layer::{LayerStack, LayerState};
use crate::macro_keys::MacroKeys;
use crate::processor::{InputProcessor, PollingProcessor, Runnable};

/// Click-input acceptance states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AutoMouseState {
    /// No motion tracked, the clickable layer is off.
    #[default]
    Idle,
    /// Summing small motions until the activation threshold is crossed.
    Accumulating,
    /// The clickable layer is on and click input is accepted.
    Armed,
    /// A synthetic pointer button is held.
    Clicking,
    /// Corrupted state word. Never produced by the transitions themselves;
    /// every dispatch treats it like `Idle` and resynchronizes.
    Unknown,
}

/// The auto mouse layer state machine.
///
/// Owns every mutable field of the feature. The layer stack and the
/// clock are injected, so the machine runs against fakes in tests and
/// stays free of hardware calls.
pub struct AutoMouseLayer<C: Clock = EmbassyClock> {
    state: AutoMouseState,
    /// Timestamp of the last state-relevant event.
    last_event: Instant,
    /// Accumulated `|dx| + |dy|` while `Accumulating`.
    movement: u16,
    /// Synthetic pointer buttons currently held.
    buttons: PointerButtons,
    config: AutoMouseConfig,
    clock: C,
}

impl AutoMouseLayer<EmbassyClock> {
    pub fn new(config: AutoMouseConfig) -> Self {
        Self::with_clock(config, EmbassyClock)
    }
}

impl<C: Clock> AutoMouseLayer<C> {
    pub fn with_clock(config: AutoMouseConfig, clock: C) -> Self {
        let last_event = clock.now();
        Self {
            state: AutoMouseState::Idle,
            last_event,
            movement: 0,
            buttons: PointerButtons::new(),
            config,
            clock,
        }
    }

    pub fn state(&self) -> AutoMouseState {
        self.state
    }

    /// Synthetic buttons currently merged into outgoing pointer reports.
    pub fn buttons(&self) -> PointerButtons {
        self.buttons
    }

    pub fn config(&self) -> &AutoMouseConfig {
        &self.config
    }

    /// Feed one motion sample. A tick without motion is fed as `(0, 0)`
    /// and drives the idle timeouts.
    ///
    /// Returns the deltas unchanged: the engine decides about the layer,
    /// it never filters reported motion.
    pub fn on_motion(&mut self, layers: &mut impl LayerStack, dx: i16, dy: i16) -> (i16, i16) {
        if dx != 0 || dy != 0 {
            match self.state {
                AutoMouseState::Armed => {
                    // Continued motion extends the armed window.
                    self.last_event = self.clock.now();
                }
                AutoMouseState::Clicking => {}
                AutoMouseState::Accumulating => {
                    self.accumulate(layers, dx, dy);
                }
                AutoMouseState::Idle | AutoMouseState::Unknown => {
                    self.movement = 0;
                    self.last_event = self.clock.now();
                    self.state = AutoMouseState::Accumulating;
                    // The entering sample already counts toward the
                    // threshold.
                    self.accumulate(layers, dx, dy);
                }
            }
        } else {
            match self.state {
                AutoMouseState::Clicking => {}
                AutoMouseState::Armed => {
                    if self.elapsed() > self.config.armed_timeout {
                        self.disarm(layers);
                    }
                }
                AutoMouseState::Accumulating => {
                    if self.elapsed() > self.config.accumulate_timeout {
                        self.movement = 0;
                        self.state = AutoMouseState::Idle;
                    }
                }
                AutoMouseState::Idle | AutoMouseState::Unknown => {
                    self.movement = 0;
                    self.state = AutoMouseState::Idle;
                }
            }
        }

        (dx, dy)
    }

    /// Apply a synthetic pointer button edge. Press holds the click
    /// without touching the layer; release re-arms, whatever the previous
    /// state was. The caller flushes the pointer report right after.
    pub fn on_pointer_button(
        &mut self,
        layers: &mut impl LayerStack,
        button: PointerButton,
        pressed: bool,
    ) {
        if pressed {
            self.buttons |= button.bit();
            self.state = AutoMouseState::Clicking;
        } else {
            self.buttons &= !button.bit();
            self.arm(layers);
        }
    }

    /// A key outside the synthetic buttons was pressed or released.
    /// Typing cancels pointer mode on press; releases are ignored.
    pub fn on_other_key(&mut self, layers: &mut impl LayerStack, pressed: bool) {
        if pressed {
            self.disarm(layers);
        }
    }

    /// Sum the sample into the accumulator and arm once the threshold is
    /// crossed.
    fn accumulate(&mut self, layers: &mut impl LayerStack, dx: i16, dy: i16) {
        self.movement = self
            .movement
            .saturating_add(dx.unsigned_abs())
            .saturating_add(dy.unsigned_abs());
        if self.movement >= self.config.activation_threshold {
            self.movement = 0;
            self.arm(layers);
        }
    }

    /// Enable the clickable layer and accept clicks.
    fn arm(&mut self, layers: &mut impl LayerStack) {
        debug!("automouse: arming layer {}", self.config.layer);
        layers.layer_on(self.config.layer);
        self.last_event = self.clock.now();
        self.state = AutoMouseState::Armed;
    }

    /// Disable the clickable layer and fall back to `Idle`.
    fn disarm(&mut self, layers: &mut impl LayerStack) {
        self.state = AutoMouseState::Idle;
        layers.layer_off(self.config.layer);
    }

    fn elapsed(&self) -> Duration {
        self.clock.now().duration_since(self.last_event)
    }

    #[cfg(test)]
    fn set_state(&mut self, state: AutoMouseState) {
        self.state = state;
    }
}

/// Input processor tying the state machine to the shared layer stack, the
/// macro keys and the report channel.
///
/// `update()` supplies the periodic no-motion tick, so the timeouts fire
/// even while the sensor stays quiet.
pub struct AutoMouseProcessor<'a, const NUM_LAYER: usize, C: Clock = EmbassyClock> {
    automouse: AutoMouseLayer<C>,
    macro_keys: MacroKeys,
    layers: &'a RefCell<LayerState<NUM_LAYER>>,
}

impl<'a, const NUM_LAYER: usize> AutoMouseProcessor<'a, NUM_LAYER, EmbassyClock> {
    pub fn new(
        layers: &'a RefCell<LayerState<NUM_LAYER>>,
        config: AutoMouseConfig,
        macro_config: MacroKeysConfig,
    ) -> Self {
        Self::with_clock(layers, config, macro_config, EmbassyClock)
    }
}

impl<'a, const NUM_LAYER: usize, C: Clock> AutoMouseProcessor<'a, NUM_LAYER, C> {
    pub fn with_clock(
        layers: &'a RefCell<LayerState<NUM_LAYER>>,
        config: AutoMouseConfig,
        macro_config: MacroKeysConfig,
        clock: C,
    ) -> Self {
        Self {
            automouse: AutoMouseLayer::with_clock(config, clock),
            macro_keys: MacroKeys::new(macro_config),
            layers,
        }
    }

    fn mouse_report(&self, dx: i16, dy: i16) -> MouseReport {
        MouseReport {
            buttons: self.automouse.buttons().into_bits(),
            x: dx.clamp(i8::MIN as i16, i8::MAX as i16) as i8,
            y: dy.clamp(i8::MIN as i16, i8::MAX as i16) as i8,
            wheel: 0,
            pan: 0,
        }
    }
}

impl<'a, const NUM_LAYER: usize, C: Clock> InputProcessor for AutoMouseProcessor<'a, NUM_LAYER, C> {
    async fn process(&mut self, event: Event) {
        match event {
            Event::Pointer(PointerEvent { dx, dy }) => {
                let (dx, dy) = self
                    .automouse
                    .on_motion(&mut *self.layers.borrow_mut(), dx, dy);
                self.send_report(Report::MouseReport(self.mouse_report(dx, dy)))
                    .await;
            }
            Event::Key(KeyEvent { code, pressed }) => match code {
                KeyCode::PointerButton(button) => {
                    self.automouse
                        .on_pointer_button(&mut *self.layers.borrow_mut(), button, pressed);
                    // Flush the updated buttons right away instead of
                    // waiting for the next motion report.
                    self.send_report(Report::MouseReport(self.mouse_report(0, 0)))
                        .await;
                }
                KeyCode::Macro(key) => {
                    // Macro keys bypass the state machine: holding one
                    // must not cancel an armed layer.
                    let report = self.macro_keys.on_macro_key(key, pressed);
                    self.send_report(Report::KeyboardReport(report)).await;
                }
                KeyCode::Hid(_) => {
                    self.automouse
                        .on_other_key(&mut *self.layers.borrow_mut(), pressed);
                }
            },
        }
    }
}

impl<'a, const NUM_LAYER: usize, C: Clock> PollingProcessor
    for AutoMouseProcessor<'a, NUM_LAYER, C>
{
    fn interval(&self) -> Duration {
        self.automouse.config().tick_interval
    }

    async fn update(&mut self) {
        // Periodic no-motion tick: drives the armed/accumulating timeouts.
        self.automouse
            .on_motion(&mut *self.layers.borrow_mut(), 0, 0);
    }
}

impl<'a, const NUM_LAYER: usize, C: Clock> Runnable for AutoMouseProcessor<'a, NUM_LAYER, C> {
    async fn run(&mut self) -> ! {
        self.polling_loop().await
    }
}
