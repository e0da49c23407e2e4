//! Character display bus abstraction
//!
//! The display controller is reached through some transport (4-bit
//! parallel GPIO, an I2C expander, a host-side recorder in tests). All the
//! UI needs from it is "send this byte to the instruction or data register"
//! plus a way to wait out slow commands.

/// Which controller register a byte is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterSelect {
    /// Instruction register (RS low)
    Instruction,
    /// Data register (RS high), i.e. a character
    Data,
}

/// Byte sink for an HD44780-style character display
///
/// Writes are fire-and-forget: the transport is assumed to always be
/// present, so there is no error path.
pub trait LcdBus {
    /// Write one byte to the given register
    ///
    /// Implementations must wait out the controller's normal execution
    /// time (37 µs on the HD44780) before returning.
    fn write(&mut self, register: RegisterSelect, byte: u8);

    /// Busy-wait for the given number of microseconds
    fn delay_us(&mut self, us: u32);

    /// Write to the instruction register
    fn command(&mut self, byte: u8) {
        self.write(RegisterSelect::Instruction, byte);
    }

    /// Write a character to the data register
    fn data(&mut self, byte: u8) {
        self.write(RegisterSelect::Data, byte);
    }
}

impl<T: LcdBus + ?Sized> LcdBus for &mut T {
    fn write(&mut self, register: RegisterSelect, byte: u8) {
        (**self).write(register, byte);
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us);
    }
}
