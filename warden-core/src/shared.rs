//! State shared between the tick context and the foreground
//!
//! Every field has exactly one writer:
//!
//! | Field | Writer | Reader |
//! |---|---|---|
//! | `accept`, `cancel` | tick | foreground |
//! | `max_line_length` | foreground | tick |
//! | `scroll_requests` | foreground sets bits, tick drains | tick |
//!
//! No field needs a lock. Readers of the two button flags may see one flag
//! before and one after a flip; debouncing keeps each flag stable for at
//! least one debounce interval, which is all the workflow relies on.

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use crate::input::{Button, ButtonSnapshot, Buttons};

/// Foreground asked for a scroll reset (display was cleared)
const REQUEST_RESET: u8 = 1 << 0;
/// Foreground asked for a scroll pause (text was written)
const REQUEST_PAUSE: u8 = 1 << 1;

/// Scroll requests drained in one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollRequests {
    pub reset: bool,
    pub pause: bool,
}

/// Cross-context UI state
///
/// Designed to live in a `static` so both contexts can reach it.
#[derive(Debug, Default)]
pub struct SharedState {
    /// Debounced accept flag (tick writes)
    accept: AtomicBool,
    /// Debounced cancel flag (tick writes)
    cancel: AtomicBool,
    /// Longest line on screen (foreground writes)
    max_line_length: AtomicU8,
    /// Pending RESET / PAUSE bits (foreground sets, tick drains)
    scroll_requests: AtomicU8,
}

impl SharedState {
    /// Both buttons released, empty screen, nothing pending
    pub const fn new() -> Self {
        Self {
            accept: AtomicBool::new(false),
            cancel: AtomicBool::new(false),
            max_line_length: AtomicU8::new(0),
            scroll_requests: AtomicU8::new(0),
        }
    }

    /// Debounced accept state
    pub fn accept_pressed(&self) -> bool {
        self.accept.load(Ordering::Acquire)
    }

    /// Debounced cancel state
    pub fn cancel_pressed(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    /// Publish a debounced state (tick context only)
    pub fn publish(&self, button: Button, pressed: bool) {
        let flag = match button {
            Button::Accept => &self.accept,
            Button::Cancel => &self.cancel,
        };
        flag.store(pressed, Ordering::Release);
    }

    /// Longest line written since the last clear
    pub fn max_line_length(&self) -> u8 {
        self.max_line_length.load(Ordering::Acquire)
    }

    /// Record the longest line (foreground only)
    pub fn set_max_line_length(&self, len: u8) {
        self.max_line_length.store(len, Ordering::Release);
    }

    /// Ask the tick to reset the scroll state
    pub fn request_scroll_reset(&self) {
        self.scroll_requests.fetch_or(REQUEST_RESET, Ordering::AcqRel);
    }

    /// Ask the tick to hold scrolling for the pause delay
    pub fn request_scroll_pause(&self) {
        self.scroll_requests.fetch_or(REQUEST_PAUSE, Ordering::AcqRel);
    }

    /// Drain pending scroll requests (tick context only)
    pub fn take_scroll_requests(&self) -> ScrollRequests {
        let bits = self.scroll_requests.swap(0, Ordering::AcqRel);
        ScrollRequests {
            reset: bits & REQUEST_RESET != 0,
            pause: bits & REQUEST_PAUSE != 0,
        }
    }
}

impl Buttons for SharedState {
    fn snapshot(&self) -> ButtonSnapshot {
        ButtonSnapshot {
            accept: self.accept_pressed(),
            cancel: self.cancel_pressed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_are_drained_once() {
        let shared = SharedState::new();
        shared.request_scroll_reset();
        shared.request_scroll_pause();
        shared.request_scroll_pause();

        assert_eq!(
            shared.take_scroll_requests(),
            ScrollRequests {
                reset: true,
                pause: true
            }
        );
        assert_eq!(shared.take_scroll_requests(), ScrollRequests::default());
    }

    #[test]
    fn test_button_snapshot() {
        let shared = SharedState::new();
        assert!(shared.snapshot().is_released());

        shared.publish(Button::Cancel, true);
        assert_eq!(shared.snapshot(), ButtonSnapshot::pressed(Button::Cancel));

        shared.publish(Button::Cancel, false);
        shared.publish(Button::Accept, true);
        assert_eq!(shared.snapshot(), ButtonSnapshot::pressed(Button::Accept));
    }
}
