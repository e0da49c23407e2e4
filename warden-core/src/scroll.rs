//! Autoscroll state
//!
//! Lines longer than the visible width pan back and forth: the view walks
//! right one column per step until the end of the longest line is visible,
//! then walks back to column 0, and so on.

/// Direction the view moves in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    /// View moves towards column 0 (text appears to move right)
    Left,
    /// View moves towards the line end (text appears to move left)
    Right,
}

/// Horizontal scroll position of the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollState {
    /// Columns the view has moved right of column 0
    position: u8,
    /// Direction of the next step
    direction: ScrollDirection,
    /// Ticks left until the next step is considered
    countdown: u16,
}

impl ScrollState {
    /// Create a state that waits `countdown` ticks before its first step
    pub const fn new(countdown: u16) -> Self {
        Self {
            position: 0,
            direction: ScrollDirection::Right,
            countdown,
        }
    }

    /// Return to column 0, moving right, after `interval` ticks
    pub fn reset(&mut self, interval: u16) {
        self.position = 0;
        self.direction = ScrollDirection::Right;
        self.countdown = interval;
    }

    /// Hold still for `pause` ticks
    pub fn pause(&mut self, pause: u16) {
        self.countdown = pause;
    }

    /// Advance by one tick
    ///
    /// Returns the direction the display must be shifted in, if a step was
    /// taken. Reaching either end flips the direction for the next step
    /// instead of moving.
    pub fn step(
        &mut self,
        max_line_length: u8,
        visible_columns: u8,
        interval: u16,
    ) -> Option<ScrollDirection> {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown != 0 {
            return None;
        }
        self.countdown = interval;

        if max_line_length <= visible_columns {
            return None;
        }

        // Position only ever moves together with a shift; a view left past
        // a shrunk limit turns around and walks back
        let limit = max_line_length - visible_columns;

        match self.direction {
            ScrollDirection::Right if self.position >= limit => {
                self.direction = ScrollDirection::Left;
                None
            }
            ScrollDirection::Right => {
                self.position += 1;
                Some(ScrollDirection::Right)
            }
            ScrollDirection::Left if self.position == 0 => {
                self.direction = ScrollDirection::Right;
                None
            }
            ScrollDirection::Left => {
                self.position -= 1;
                Some(ScrollDirection::Left)
            }
        }
    }

    /// Current offset in columns (0 = leftmost)
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Direction of the next step
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Ticks until the next step is considered
    pub fn countdown(&self) -> u16 {
        self.countdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_never_scrolls() {
        let mut scroll = ScrollState::new(1);
        for _ in 0..1000 {
            assert_eq!(scroll.step(16, 16, 1), None);
        }
        assert_eq!(scroll.position(), 0);
    }

    #[test]
    fn test_steps_only_when_countdown_expires() {
        let mut scroll = ScrollState::new(3);
        assert_eq!(scroll.step(20, 16, 3), None);
        assert_eq!(scroll.step(20, 16, 3), None);
        assert_eq!(scroll.step(20, 16, 3), Some(ScrollDirection::Right));
        assert_eq!(scroll.position(), 1);
        assert_eq!(scroll.countdown(), 3);
    }

    #[test]
    fn test_bounces_between_ends() {
        let mut scroll = ScrollState::new(1);
        // 18 columns on a 16 column display: limit is 2
        let steps: [Option<ScrollDirection>; 6] =
            core::array::from_fn(|_| scroll.step(18, 16, 1));
        assert_eq!(
            steps,
            [
                Some(ScrollDirection::Right),
                Some(ScrollDirection::Right),
                None,
                Some(ScrollDirection::Left),
                Some(ScrollDirection::Left),
                None,
            ]
        );
        assert_eq!(scroll.position(), 0);
        assert_eq!(scroll.direction(), ScrollDirection::Right);
    }

    #[test]
    fn test_reset_and_pause() {
        let mut scroll = ScrollState::new(1);
        scroll.step(30, 16, 1);
        scroll.step(30, 16, 1);
        assert_eq!(scroll.position(), 2);

        scroll.pause(450);
        assert_eq!(scroll.countdown(), 450);
        assert_eq!(scroll.position(), 2);

        scroll.reset(150);
        assert_eq!(scroll.position(), 0);
        assert_eq!(scroll.direction(), ScrollDirection::Right);
        assert_eq!(scroll.countdown(), 150);
    }

    #[test]
    fn test_shrunk_limit_walks_back_with_shifts() {
        let mut scroll = ScrollState::new(1);
        for _ in 0..3 {
            assert_eq!(scroll.step(30, 16, 1), Some(ScrollDirection::Right));
        }
        assert_eq!(scroll.position(), 3);

        // Longest line shrinks to a limit of 1 without a reset
        assert_eq!(scroll.step(17, 16, 1), None);
        assert_eq!(scroll.position(), 3);
        assert_eq!(scroll.direction(), ScrollDirection::Left);

        let mut shifts_left = 0;
        while let Some(direction) = scroll.step(17, 16, 1) {
            assert_eq!(direction, ScrollDirection::Left);
            shifts_left += 1;
        }
        // Display and position agree: three shifts back to column 0
        assert_eq!(shifts_left, 3);
        assert_eq!(scroll.position(), 0);
    }
}
