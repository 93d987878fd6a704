use core::cell::RefCell;
use core::future::Future;
use core::task::{Context, Poll, Waker};

use automouse::channel::KEYBOARD_REPORT_CHANNEL;
use automouse::event::{Event, KeyEvent, PointerEvent};
use automouse::hid::Report;
use automouse::input_device::InputDevice;
use automouse::keycode::KeyCode;
use automouse::layer::LayerState;
use embassy_time::{Duration, MockDriver, Timer};
use usbd_hid::descriptor::{KeyboardReport, MouseReport};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const NUM_LAYERS: usize = 6;

/// Poll the future to completion, advancing the embassy mock clock by one
/// millisecond whenever nothing is ready. Timers fire deterministically
/// and no test ever waits on wall-clock time.
pub fn test_block_on<F: Future>(fut: F) -> F::Output {
    // Simulated upper bound; a test stuck beyond this is a bug.
    const MAX_TEST_TIMEOUT_MS: u64 = 600_000;

    let mut fut = core::pin::pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    for _ in 0..MAX_TEST_TIMEOUT_MS {
        if let Poll::Ready(output) = fut.as_mut().poll(&mut cx) {
            return output;
        }
        MockDriver::get().advance(Duration::from_millis(1));
    }
    panic!("Test timeout reached");
}

pub fn wrap_layers() -> &'static RefCell<LayerState<NUM_LAYERS>> {
    // Leaking is fine in tests, every rusty_fork test runs in its own
    // process.
    Box::leak(Box::new(RefCell::new(LayerState::new())))
}

pub fn key(code: KeyCode, pressed: bool) -> Event {
    Event::Key(KeyEvent { code, pressed })
}

pub fn motion(dx: i16, dy: i16) -> Event {
    Event::Pointer(PointerEvent { dx, dy })
}

/// Input device replaying a fixed script of (delay ms, event) pairs, then
/// pending forever.
pub struct ScriptedDevice {
    script: std::vec::IntoIter<(u64, Event)>,
}

impl ScriptedDevice {
    pub fn new(script: Vec<(u64, Event)>) -> Self {
        Self {
            script: script.into_iter(),
        }
    }
}

impl InputDevice for ScriptedDevice {
    async fn read_event(&mut self) -> Event {
        match self.script.next() {
            Some((delay, event)) => {
                Timer::after(Duration::from_millis(delay)).await;
                event
            }
            None => core::future::pending().await,
        }
    }
}

/// Receive the next mouse report, skipping any other report type.
pub async fn next_mouse_report() -> MouseReport {
    loop {
        if let Report::MouseReport(report) = KEYBOARD_REPORT_CHANNEL.receive().await {
            return report;
        }
    }
}

/// Receive the next keyboard report, skipping any other report type.
pub async fn next_keyboard_report() -> KeyboardReport {
    loop {
        if let Report::KeyboardReport(report) = KEYBOARD_REPORT_CHANNEL.receive().await {
            return report;
        }
    }
}
