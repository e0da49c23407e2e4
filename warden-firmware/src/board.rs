//! Board wiring
//!
//! Pin assignments for a Raspberry Pi Pico with an HD44780 module and two
//! push buttons to ground (internal pull-ups, active low):
//!
//! | Signal  | GPIO |
//! |---------|------|
//! | UART TX | 0    |
//! | UART RX | 1    |
//! | LCD RS  | 10   |
//! | LCD E   | 11   |
//! | LCD D4  | 12   |
//! | LCD D5  | 13   |
//! | LCD D6  | 14   |
//! | LCD D7  | 15   |
//! | Accept  | 16   |
//! | Cancel  | 17   |

use embassy_rp::gpio::{Input, Output};
use embassy_time::Delay;
use warden_core::{ActiveLevel, UiConfig};
use warden_drivers::FourBitBus;

/// Button line wired to a `warden_hal` input
pub struct ButtonPin(pub Input<'static>);

impl warden_hal::InputPin for ButtonPin {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Display bus line wired to a `warden_hal` output
pub struct BusPin(pub Output<'static>);

impl warden_hal::OutputPin for BusPin {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}

/// The display bus as wired on this board
pub type DisplayBus = FourBitBus<BusPin, BusPin, BusPin, Delay>;

/// UI settings for this board
pub const UI_CONFIG: UiConfig = UiConfig {
    button_level: ActiveLevel::Low,
    ..UiConfig::new()
};
