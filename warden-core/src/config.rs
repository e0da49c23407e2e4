//! UI timing and geometry configuration
//!
//! All durations are expressed in scheduler ticks so the tick context never
//! has to do time arithmetic. The defaults match the reference board: a
//! 16x2 HD44780 module and a 200 Hz tick.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bytes of display RAM per line on an HD44780
pub const MAX_LINE_CAPACITY: u8 = 40;

/// Electrical level at which a button reads as pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActiveLevel {
    /// Pressed pulls the line to ground (internal pull-up fitted)
    #[default]
    Low,
    /// Pressed drives the line high
    High,
}

impl ActiveLevel {
    /// Translate a raw pin level into "pressed"
    pub const fn is_active(self, pin_high: bool) -> bool {
        match self {
            ActiveLevel::Low => !pin_high,
            ActiveLevel::High => pin_high,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick period must be at least 1 ms
    ZeroTickPeriod,
    /// At least one sample is needed to register a press
    ZeroDebounceSamples,
    /// Scroll interval must be at least one tick
    ZeroScrollInterval,
    /// Visible width is zero or wider than the line capacity
    InvalidVisibleColumns,
    /// Line capacity exceeds the controller's display RAM
    LineCapacityTooLarge,
}

/// UI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UiConfig {
    /// Columns visible at once on one line
    pub visible_columns: u8,
    /// Characters stored per line; anything beyond is dropped
    pub line_capacity: u8,
    /// Scheduler tick period in milliseconds
    pub tick_period_ms: u8,
    /// Ticks between autoscroll steps
    pub scroll_interval_ticks: u16,
    /// Ticks to hold still after new text is written
    pub scroll_pause_ticks: u16,
    /// Ticks before the first scroll step after power-on
    pub initial_scroll_delay_ticks: u16,
    /// Consecutive disagreeing samples needed to flip a button state
    pub debounce_samples: u8,
    /// Wait after a clear-display command, in microseconds
    pub clear_settle_us: u32,
    /// Level at which the buttons read as pressed
    pub button_level: ActiveLevel,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl UiConfig {
    /// Reference configuration (usable in `const`/`static` context)
    pub const fn new() -> Self {
        Self {
            visible_columns: 16,
            line_capacity: MAX_LINE_CAPACITY,
            tick_period_ms: 5,
            scroll_interval_ticks: 150,
            scroll_pause_ticks: 450,
            initial_scroll_delay_ticks: 1000,
            debounce_samples: 8,
            // Datasheet says 1.52 ms; clones are slower
            clear_settle_us: 10_000,
            button_level: ActiveLevel::Low,
        }
    }

    /// Check the configuration for values the UI cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.debounce_samples == 0 {
            return Err(ConfigError::ZeroDebounceSamples);
        }
        if self.scroll_interval_ticks == 0 {
            return Err(ConfigError::ZeroScrollInterval);
        }
        if self.line_capacity > MAX_LINE_CAPACITY {
            return Err(ConfigError::LineCapacityTooLarge);
        }
        if self.visible_columns == 0 || self.visible_columns > self.line_capacity {
            return Err(ConfigError::InvalidVisibleColumns);
        }
        Ok(())
    }

    /// Time a button must be held steady before it registers, in ms
    pub fn debounce_ms(&self) -> u32 {
        self.debounce_samples as u32 * self.tick_period_ms as u32
    }

    /// Tick rate in Hz
    pub fn tick_hz(&self) -> u32 {
        1000 / self.tick_period_ms.max(1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = UiConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.debounce_ms(), 40);
        assert_eq!(config.tick_hz(), 200);
    }

    #[test]
    fn test_rejects_zero_debounce() {
        let config = UiConfig {
            debounce_samples: 0,
            ..UiConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounceSamples));
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let too_wide = UiConfig {
            visible_columns: 41,
            ..UiConfig::default()
        };
        assert_eq!(too_wide.validate(), Err(ConfigError::InvalidVisibleColumns));

        let too_long = UiConfig {
            line_capacity: 80,
            ..UiConfig::default()
        };
        assert_eq!(too_long.validate(), Err(ConfigError::LineCapacityTooLarge));

        let zero_interval = UiConfig {
            scroll_interval_ticks: 0,
            ..UiConfig::default()
        };
        assert_eq!(zero_interval.validate(), Err(ConfigError::ZeroScrollInterval));
    }

    #[test]
    fn test_active_level() {
        assert!(ActiveLevel::Low.is_active(false));
        assert!(!ActiveLevel::Low.is_active(true));
        assert!(ActiveLevel::High.is_active(true));
        assert!(!ActiveLevel::High.is_active(false));
    }
}
