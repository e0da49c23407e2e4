//! Fixed-rate UI tick
//!
//! Called every `tick_period_ms` from an interrupt-like context. Each call
//! runs to completion without blocking and depends only on the current
//! samples, so a late tick delays a response but never corrupts state.
//!
//! # Usage
//!
//! ```ignore
//! let mut scheduler = Scheduler::new(accept_pin, cancel_pin, UiConfig::default());
//!
//! // Every 5 ms:
//! if let Some(direction) = scheduler.tick(&SHARED) {
//!     bus.command(display::shift_command(direction));
//! }
//! ```

use warden_hal::InputPin;

use crate::config::UiConfig;
use crate::input::{Button, ButtonChannel};
use crate::scroll::{ScrollDirection, ScrollState};
use crate::shared::SharedState;

/// Debounce and autoscroll scheduler
///
/// Owns the button counters and the scroll state outright; the foreground
/// only sees what is published through [`SharedState`].
pub struct Scheduler<A, C> {
    /// Raw accept line
    accept_pin: A,
    /// Raw cancel line
    cancel_pin: C,
    /// Debounce state of the accept line
    accept: ButtonChannel,
    /// Debounce state of the cancel line
    cancel: ButtonChannel,
    /// Autoscroll of the current screen
    scroll: ScrollState,
    /// Timing and geometry, validated by the caller
    config: UiConfig,
}

impl<A: InputPin, C: InputPin> Scheduler<A, C> {
    /// Create a scheduler with both buttons released
    pub fn new(accept_pin: A, cancel_pin: C, config: UiConfig) -> Self {
        Self {
            accept_pin,
            cancel_pin,
            accept: ButtonChannel::new(config.debounce_samples),
            cancel: ButtonChannel::new(config.debounce_samples),
            scroll: ScrollState::new(config.initial_scroll_delay_ticks),
            config,
        }
    }

    /// Run one tick
    ///
    /// Returns the display shift the caller must issue, if any.
    pub fn tick(&mut self, shared: &SharedState) -> Option<ScrollDirection> {
        let requests = shared.take_scroll_requests();
        if requests.reset {
            self.scroll.reset(self.config.scroll_interval_ticks);
        }
        if requests.pause {
            self.scroll.pause(self.config.scroll_pause_ticks);
        }

        let shift = self.scroll.step(
            shared.max_line_length(),
            self.config.visible_columns,
            self.config.scroll_interval_ticks,
        );

        let level = self.config.button_level;
        let accept_raw = level.is_active(self.accept_pin.is_high());
        let cancel_raw = level.is_active(self.cancel_pin.is_high());

        if self.accept.sample(accept_raw) {
            #[cfg(feature = "defmt")]
            defmt::trace!("accept -> {}", self.accept.is_pressed());
        }
        if self.cancel.sample(cancel_raw) {
            #[cfg(feature = "defmt")]
            defmt::trace!("cancel -> {}", self.cancel.is_pressed());
        }

        shared.publish(Button::Accept, self.accept.is_pressed());
        shared.publish(Button::Cancel, self.cancel.is_pressed());

        shift
    }

    /// Current scroll state
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Debounce channel for a button
    pub fn channel(&self, button: Button) -> &ButtonChannel {
        match button {
            Button::Accept => &self.accept,
            Button::Cancel => &self.cancel,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &UiConfig {
        &self.config
    }
}
