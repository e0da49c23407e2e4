//! Display bus shared between the foreground and the tick
//!
//! The foreground writes screens; the tick issues shift commands while
//! text is scrolling. Each byte transfer runs inside a critical section so
//! nibble pairs from the two contexts never interleave. Long waits (clear
//! settle) run outside it.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{block_for, Duration};
use warden_hal::{LcdBus, RegisterSelect};

use crate::board::DisplayBus;

static DISPLAY_BUS: Mutex<CriticalSectionRawMutex, RefCell<Option<DisplayBus>>> =
    Mutex::new(RefCell::new(None));

/// Hand the initialised bus over to shared ownership
pub fn install(bus: DisplayBus) {
    DISPLAY_BUS.lock(|cell| *cell.borrow_mut() = Some(bus));
}

/// Handle to the shared display bus
///
/// Writes before [`install`] are dropped.
#[derive(Clone, Copy)]
pub struct SharedBus;

impl LcdBus for SharedBus {
    fn write(&mut self, register: RegisterSelect, byte: u8) {
        DISPLAY_BUS.lock(|cell| {
            if let Some(bus) = cell.borrow_mut().as_mut() {
                bus.write(register, byte);
            }
        });
    }

    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(u64::from(us)));
    }
}
