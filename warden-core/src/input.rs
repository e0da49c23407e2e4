//! Button input: debouncing and the foreground view of button state
//!
//! [`ButtonChannel`] runs in the tick context and filters raw samples.
//! The foreground never sees raw samples or counters, only the debounced
//! booleans through [`Buttons`].

/// One of the two physical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Approve / continue
    Accept,
    /// Deny / abort
    Cancel,
}

/// Debounced state of both buttons, read at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSnapshot {
    /// Debounced accept flag
    pub accept: bool,
    /// Debounced cancel flag
    pub cancel: bool,
}

impl ButtonSnapshot {
    /// Neither button pressed
    pub const RELEASED: Self = Self {
        accept: false,
        cancel: false,
    };

    /// Snapshot with only `button` pressed
    pub const fn pressed(button: Button) -> Self {
        match button {
            Button::Accept => Self {
                accept: true,
                cancel: false,
            },
            Button::Cancel => Self {
                accept: false,
                cancel: true,
            },
        }
    }

    /// Check that neither button is held
    pub fn is_released(&self) -> bool {
        !self.accept && !self.cancel
    }

    /// The button this snapshot counts as a press of
    ///
    /// Only a snapshot with exactly one button held is a press; both held
    /// at once is ambiguous and counts as nothing.
    pub fn press(&self) -> Option<Button> {
        match (self.accept, self.cancel) {
            (true, false) => Some(Button::Accept),
            (false, true) => Some(Button::Cancel),
            _ => None,
        }
    }
}

/// Source of debounced button state for the foreground
pub trait Buttons {
    /// Read both debounced flags
    ///
    /// Callers branch on one snapshot rather than reading the flags
    /// separately, so a flip between two reads cannot be acted on.
    fn snapshot(&self) -> ButtonSnapshot;
}

impl<T: Buttons + ?Sized> Buttons for &T {
    fn snapshot(&self) -> ButtonSnapshot {
        (**self).snapshot()
    }
}

/// Debounce filter for one button line
///
/// The debounced state only flips after `threshold` consecutive samples
/// disagree with it. A single agreeing sample resets the count.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonChannel {
    /// Debounced state (true = pressed)
    pressed: bool,
    /// Consecutive samples that disagreed with `pressed`
    counter: u8,
    /// Disagreeing samples needed to flip `pressed`
    threshold: u8,
}

impl ButtonChannel {
    /// Create a released channel
    pub const fn new(threshold: u8) -> Self {
        Self {
            pressed: false,
            counter: 0,
            threshold,
        }
    }

    /// Feed one raw sample (true = pressed)
    ///
    /// Returns true if the debounced state flipped on this sample.
    pub fn sample(&mut self, raw_pressed: bool) -> bool {
        if raw_pressed == self.pressed {
            self.counter = 0;
            return false;
        }

        self.counter += 1;
        if self.counter >= self.threshold {
            self.pressed = !self.pressed;
            self.counter = 0;
            return true;
        }
        false
    }

    /// Debounced state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Consecutive disagreeing samples seen so far
    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Samples required for a flip
    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}
