//! Seed backup presenter
//!
//! Shows a secret as lower-case hex on the display, twelve bytes per page:
//!
//! ```text
//!  0123 4567 89ab
//!  cdef 0123 4567
//! ```
//!
//! The user confirms every page; cancel at any checkpoint abandons the rest.

use warden_hal::LcdBus;

use crate::display::Line;
use crate::input::{Button, Buttons};
use crate::workflow::Ui;

/// Length of the wallet seed the firmware backs up
pub const SEED_LENGTH: usize = 64;

/// Bytes shown per page (two lines)
pub const BYTES_PER_PAGE: usize = 12;

/// Bytes shown per line
pub const BYTES_PER_LINE: usize = 6;

/// The only supported destination: this display
pub const DISPLAY_DESTINATION: u32 = 0;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Backup errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BackupError {
    /// Destination is not the display; nothing was shown
    UnsupportedDestination(u32),
    /// User pressed cancel at a checkpoint
    Cancelled,
}

impl<'a, B: LcdBus, K: Buttons> Ui<'a, B, K> {
    /// Show `seed` to the user for backup
    ///
    /// `destination` selects the output device; only
    /// [`DISPLAY_DESTINATION`] is supported.
    pub fn write_backup_seed(
        &mut self,
        seed: &[u8],
        is_encrypted: bool,
        destination: u32,
    ) -> Result<(), BackupError> {
        if destination != DISPLAY_DESTINATION {
            return Err(BackupError::UnsupportedDestination(destination));
        }

        self.lcd.clear();
        self.wait_for_release();
        self.lcd.goto_line_start(Line::Top);
        self.lcd.write_text("Backup is");
        self.lcd.goto_line_start(Line::Bottom);
        self.lcd
            .write_text(if is_encrypted { "encrypted" } else { "not encrypted" });
        self.checkpoint()?;

        for page in seed.chunks(BYTES_PER_PAGE) {
            self.lcd.clear();
            self.render_page(page);
            self.wait_for_release();
            self.checkpoint()?;
        }

        self.lcd.clear();
        Ok(())
    }

    /// Wait for a press; cancel clears the screen and aborts
    fn checkpoint(&mut self) -> Result<(), BackupError> {
        match self.wait_for_press() {
            Button::Accept => Ok(()),
            Button::Cancel => {
                self.lcd.clear();
                Err(BackupError::Cancelled)
            }
        }
    }

    fn render_page(&mut self, page: &[u8]) {
        for (index, &byte) in page.iter().enumerate() {
            match index {
                0 => self.lcd.goto_line_start(Line::Top),
                BYTES_PER_LINE => self.lcd.goto_line_start(Line::Bottom),
                _ => {}
            }
            // " xx" for even bytes, "xx" for odd ones
            let cell = [
                b' ',
                HEX_DIGITS[(byte >> 4) as usize],
                HEX_DIGITS[(byte & 0x0f) as usize],
            ];
            let start = index % 2;
            self.lcd.write_bytes(&cell[start..]);
        }
    }
}
