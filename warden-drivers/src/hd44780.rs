//! HD44780 character display over a 4-bit parallel bus
//!
//! Six GPIO lines: register select, enable, and the upper data nibble
//! D4..D7. Every byte goes out as two nibbles, high nibble first.
//!
//! # Timing
//!
//! Enable pulses and post-write waits are twice the datasheet minimums:
//!
//! | Step                    | Wait    |
//! |-------------------------|---------|
//! | Data setup, E low/high  | 2 µs    |
//! | After each nibble       | 74 µs   |
//! | Power-on                | 80 ms   |
//! | First 0x3 nibble        | 8.2 ms  |
//! | Second 0x3 nibble       | 200 µs  |
//!
//! There is no busy-flag readback: R/W is tied low.

use embedded_hal::delay::DelayNs;
use warden_core::display::cmd;
use warden_core::UiConfig;
use warden_hal::{LcdBus, OutputPin, RegisterSelect};

/// Enable pulse setup/hold time
const PULSE_US: u32 = 2;

/// Execution time of a normal instruction, doubled
const EXECUTION_US: u32 = 74;

/// Wait after power-on before the first nibble
const POWER_ON_MS: u32 = 80;

/// Nibble that selects the 8-bit interface, sent three times to resync
const RESYNC_NIBBLE: u8 = 0x3;

/// Nibble that switches the controller to the 4-bit interface
const FOUR_BIT_NIBBLE: u8 = 0x2;

/// 4-bit parallel HD44780 bus
///
/// `data` holds D4, D5, D6, D7 in that order.
pub struct FourBitBus<RS, E, D, DELAY> {
    rs: RS,
    enable: E,
    data: [D; 4],
    delay: DELAY,
}

impl<RS, E, D, DELAY> FourBitBus<RS, E, D, DELAY>
where
    RS: OutputPin,
    E: OutputPin,
    D: OutputPin,
    DELAY: DelayNs,
{
    /// Take ownership of the bus pins
    ///
    /// Drives E and RS low. Call [`init`](Self::init) before writing.
    pub fn new(mut rs: RS, mut enable: E, data: [D; 4], delay: DELAY) -> Self {
        enable.set_low();
        rs.set_low();
        Self {
            rs,
            enable,
            data,
            delay,
        }
    }

    /// Run the power-on initialisation sequence
    ///
    /// Resyncs the controller into 4-bit mode, then sets two lines with
    /// a 5x8 font, turns the display on without a cursor, clears it and
    /// selects left-to-right entry.
    pub fn init(&mut self, config: &UiConfig) {
        self.enable.set_low();
        self.rs.set_low();
        self.delay.delay_ms(POWER_ON_MS);

        self.write_nibble(RESYNC_NIBBLE);
        self.delay.delay_us(8_200);
        self.write_nibble(RESYNC_NIBBLE);
        self.delay.delay_us(200);
        self.write_nibble(RESYNC_NIBBLE);
        self.write_nibble(FOUR_BIT_NIBBLE);

        self.command(cmd::FUNCTION_SET_4BIT_2LINE);
        self.command(cmd::DISPLAY_ON);
        self.command(cmd::CLEAR_DISPLAY);
        self.delay.delay_us(config.clear_settle_us);
        self.command(cmd::ENTRY_MODE_INCREMENT);

        #[cfg(feature = "defmt")]
        defmt::debug!("HD44780 initialised");
    }

    /// Release the pins and delay source
    pub fn release(self) -> (RS, E, [D; 4], DELAY) {
        (self.rs, self.enable, self.data, self.delay)
    }

    /// Clock out the low four bits of `nibble`
    fn write_nibble(&mut self, nibble: u8) {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(nibble & (1 << bit) != 0);
        }
        self.delay.delay_us(PULSE_US);
        self.enable.set_low();
        self.delay.delay_us(PULSE_US);
        self.enable.set_high();
        self.delay.delay_us(PULSE_US);
        self.enable.set_low();
        self.delay.delay_us(PULSE_US);
        self.delay.delay_us(EXECUTION_US);
    }
}

impl<RS, E, D, DELAY> LcdBus for FourBitBus<RS, E, D, DELAY>
where
    RS: OutputPin,
    E: OutputPin,
    D: OutputPin,
    DELAY: DelayNs,
{
    fn write(&mut self, register: RegisterSelect, byte: u8) {
        self.rs.set_state(register == RegisterSelect::Data);
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}
