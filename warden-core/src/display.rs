//! Display line driver
//!
//! Turns "clear", "go to line start" and "write this text" into HD44780
//! instruction and data bytes, and keeps track of where the cursor is and
//! how long the longest line on screen has become. The scheduler uses that
//! length to decide whether the screen needs to scroll.

use warden_hal::LcdBus;

use crate::config::UiConfig;
use crate::scroll::ScrollDirection;
use crate::shared::SharedState;

/// HD44780 instruction bytes
pub mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    /// Entry mode: increment address, no display shift
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// Shift the whole display one column left (view moves right)
    pub const SHIFT_DISPLAY_LEFT: u8 = 0x18;
    /// Shift the whole display one column right (view moves left)
    pub const SHIFT_DISPLAY_RIGHT: u8 = 0x1C;
    /// Function set: 4-bit interface, 2 lines, 5x8 font
    pub const FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
    /// Set DDRAM address (OR with the address)
    pub const SET_DDRAM_ADDR: u8 = 0x80;
    /// DDRAM address of the second line
    pub const LINE_1_OFFSET: u8 = 0x40;
}

/// Display line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    Top,
    Bottom,
}

impl Line {
    /// Set-DDRAM-address instruction for column 0 of this line
    pub const fn start_command(self) -> u8 {
        match self {
            Line::Top => cmd::SET_DDRAM_ADDR,
            Line::Bottom => cmd::SET_DDRAM_ADDR | cmd::LINE_1_OFFSET,
        }
    }
}

/// Instruction that moves the view one column in `direction`
pub const fn shift_command(direction: ScrollDirection) -> u8 {
    match direction {
        ScrollDirection::Right => cmd::SHIFT_DISPLAY_LEFT,
        ScrollDirection::Left => cmd::SHIFT_DISPLAY_RIGHT,
    }
}

/// Cursor bookkeeping for the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CursorState {
    /// Column the next character lands in
    pub current_column: u8,
    /// Longest line written since the last clear
    pub max_line_length: u8,
}

/// Two-line character display
///
/// Owned by the foreground. Autoscroll bookkeeping is handed to the
/// scheduler through [`SharedState`].
pub struct Lcd<'a, B> {
    /// Transport to the controller
    bus: B,
    /// Cursor bookkeeping since the last clear
    cursor: CursorState,
    /// Scroll handoff to the scheduler
    shared: &'a SharedState,
    config: UiConfig,
}

impl<'a, B: LcdBus> Lcd<'a, B> {
    /// Wrap an initialised display bus
    pub fn new(bus: B, shared: &'a SharedState, config: UiConfig) -> Self {
        Self {
            bus,
            cursor: CursorState::default(),
            shared,
            config,
        }
    }

    /// Clear both lines and return the cursor and scroll to the origin
    ///
    /// Blocks for the controller's clear settle time.
    pub fn clear(&mut self) {
        self.cursor = CursorState::default();
        self.shared.set_max_line_length(0);
        self.shared.request_scroll_reset();
        self.bus.command(cmd::CLEAR_DISPLAY);
        self.bus.delay_us(self.config.clear_settle_us);
    }

    /// Move the cursor to column 0 of `line`
    ///
    /// The longest-line length is kept, so scrolling covers both lines.
    pub fn goto_line_start(&mut self, line: Line) {
        self.bus.command(line.start_command());
        self.cursor.current_column = 0;
    }

    /// Write text at the cursor
    ///
    /// Stops at a NUL byte or at the line capacity; the rest is dropped.
    pub fn write_text(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    /// Write raw character codes at the cursor
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if byte == 0 || self.cursor.current_column >= self.config.line_capacity {
                break;
            }
            self.bus.data(byte);
            self.cursor.current_column += 1;
            if self.cursor.current_column > self.cursor.max_line_length {
                self.cursor.max_line_length = self.cursor.current_column;
            }
        }
        self.shared.set_max_line_length(self.cursor.max_line_length);
        self.shared.request_scroll_pause();
    }

    /// Cursor bookkeeping
    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    /// Active configuration
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Access the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{BusOp, RecordingBus};
    use warden_hal::RegisterSelect;

    fn lcd(shared: &SharedState) -> Lcd<'_, RecordingBus> {
        Lcd::new(RecordingBus::new(), shared, UiConfig::default())
    }

    #[test]
    fn test_clear_resets_state_and_settles() {
        let shared = SharedState::new();
        let mut lcd = lcd(&shared);

        lcd.write_text("Hello");
        lcd.clear();

        assert_eq!(lcd.cursor(), CursorState::default());
        assert_eq!(shared.max_line_length(), 0);
        assert!(shared.take_scroll_requests().reset);

        let ops = lcd.bus().ops();
        assert_eq!(
            &ops[ops.len() - 2..],
            &[
                BusOp::Write(RegisterSelect::Instruction, cmd::CLEAR_DISPLAY),
                BusOp::Delay(10_000),
            ]
        );
    }

    #[test]
    fn test_goto_line_start() {
        let shared = SharedState::new();
        let mut lcd = lcd(&shared);

        lcd.write_text("abcdef");
        lcd.goto_line_start(Line::Bottom);
        assert_eq!(lcd.cursor().current_column, 0);
        assert_eq!(lcd.cursor().max_line_length, 6);

        lcd.goto_line_start(Line::Top);
        assert_eq!(
            lcd.bus().ops().last(),
            Some(&BusOp::Write(RegisterSelect::Instruction, 0x80))
        );
        assert_eq!(lcd.bus().display().line(1), "");
    }

    #[test]
    fn test_write_tracks_longest_line() {
        let shared = SharedState::new();
        let mut lcd = lcd(&shared);

        lcd.goto_line_start(Line::Top);
        lcd.write_text("Sending ");
        lcd.write_text("0.5");
        lcd.write_text(" BTC to");
        lcd.goto_line_start(Line::Bottom);
        lcd.write_text("1abc");

        assert_eq!(lcd.cursor().current_column, 4);
        assert_eq!(lcd.cursor().max_line_length, 18);
        assert_eq!(shared.max_line_length(), 18);
        assert!(shared.take_scroll_requests().pause);
        assert_eq!(lcd.bus().display().line(0), "Sending 0.5 BTC to");
        assert_eq!(lcd.bus().display().line(1), "1abc");
    }

    #[test]
    fn test_write_truncates_at_capacity() {
        let shared = SharedState::new();
        let mut lcd = lcd(&shared);

        lcd.goto_line_start(Line::Top);
        lcd.write_text("0123456789012345678901234567890123456789EXTRA");
        lcd.write_text("more");

        assert_eq!(lcd.cursor().current_column, 40);
        assert_eq!(lcd.bus().data_bytes().len(), 40);
    }

    #[test]
    fn test_write_stops_at_nul() {
        let shared = SharedState::new();
        let mut lcd = lcd(&shared);

        lcd.write_bytes(b"ab\0cd");
        assert_eq!(lcd.bus().data_bytes(), b"ab");
        assert_eq!(lcd.cursor().current_column, 2);
    }

    #[test]
    fn test_shift_commands() {
        assert_eq!(shift_command(ScrollDirection::Right), 0x18);
        assert_eq!(shift_command(ScrollDirection::Left), 0x1C);
    }
}
