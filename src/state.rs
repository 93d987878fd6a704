//! Process-wide flags shared with the host firmware.

use core::sync::atomic::{AtomicBool, Ordering};

/// Whether trackball motion should be converted to scrolling. Written by
/// the indicator controller on layer changes, read by the host's pointing
/// pipeline.
static SCROLL_MODE: AtomicBool = AtomicBool::new(false);

pub fn scroll_mode_enabled() -> bool {
    SCROLL_MODE.load(Ordering::Acquire)
}

pub(crate) fn set_scroll_mode(enabled: bool) {
    SCROLL_MODE.store(enabled, Ordering::Release);
}
