//! Warden - Hardware Wallet Confirmation Firmware
//!
//! Main firmware binary for RP2040 boards with a two-line character
//! display and accept/cancel buttons. The host stages transactions, asks
//! for approval and requests seed backups over UART; the user answers on
//! the device.
//!
//! Two execution contexts:
//! - Thread mode (foreground): the blocking request loop, which draws
//!   screens and waits on debounced buttons
//! - `SWI_IRQ_1` interrupt executor: the 200 Hz UI tick, which must keep
//!   running while the foreground busy-waits

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::InterruptExecutor;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use warden_core::{Lcd, Scheduler, SharedState, Staging, Ui, UiConfig};
use warden_drivers::FourBitBus;

use crate::board::{BusPin, ButtonPin};
use crate::bus::SharedBus;

mod board;
mod bus;
mod host;
mod tasks;

/// State shared between the tick and the foreground
static SHARED: SharedState = SharedState::new();

static TICK_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    TICK_EXECUTOR.on_interrupt()
}

/// Main entry point
#[entry]
fn main() -> ! {
    info!("Warden firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_ui_config();

    // Display: RS, E, D4..D7 (see board.rs)
    let mut display = FourBitBus::new(
        BusPin(Output::new(p.PIN_10, Level::Low)),
        BusPin(Output::new(p.PIN_11, Level::Low)),
        [
            BusPin(Output::new(p.PIN_12, Level::Low)),
            BusPin(Output::new(p.PIN_13, Level::Low)),
            BusPin(Output::new(p.PIN_14, Level::Low)),
            BusPin(Output::new(p.PIN_15, Level::Low)),
        ],
        Delay,
    );
    display.init(&config);
    bus::install(display);
    info!("Display initialized");

    let scheduler = Scheduler::new(
        ButtonPin(Input::new(p.PIN_16, Pull::Up)),
        ButtonPin(Input::new(p.PIN_17, Pull::Up)),
        config,
    );

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = TICK_EXECUTOR.start(interrupt::SWI_IRQ_1);
    spawner.spawn(tasks::tick_task(scheduler, &SHARED)).unwrap();

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let mut link = host::UartLink(uart);
    info!("UART initialized for host link");

    let lcd = Lcd::new(SharedBus, &SHARED, config);
    let mut ui = Ui::new(lcd, &SHARED);
    // Filled and cleared by the host's staging requests
    let mut staging = Staging::new();

    host::serve(&mut link, &mut ui, &mut staging)
}

/// Board UI settings, or the defaults if they do not validate
fn load_ui_config() -> UiConfig {
    match board::UI_CONFIG.validate() {
        Ok(()) => board::UI_CONFIG,
        Err(e) => {
            error!("Invalid board UI config: {:?}", e);
            warn!("Using default UI config");
            UiConfig::default()
        }
    }
}
