//! UI tick task
//!
//! Runs the debounce and autoscroll scheduler at the configured rate and
//! forwards any scroll step to the display as a shift command.

use defmt::*;
use embassy_time::{Duration, Ticker};
use warden_core::display::shift_command;
use warden_core::{Scheduler, SharedState};
use warden_hal::LcdBus;

use crate::board::ButtonPin;
use crate::bus::SharedBus;

/// Tick task - samples buttons and advances the scroll animation
#[embassy_executor::task]
pub async fn tick_task(
    mut scheduler: Scheduler<ButtonPin, ButtonPin>,
    shared: &'static SharedState,
) {
    let period_ms = u64::from(scheduler.config().tick_period_ms);
    info!(
        "Tick task started ({} Hz, debounce {} ms)",
        scheduler.config().tick_hz(),
        scheduler.config().debounce_ms()
    );

    let mut ticker = Ticker::every(Duration::from_millis(period_ms));
    let mut bus = SharedBus;

    loop {
        ticker.next().await;

        if let Some(direction) = scheduler.tick(shared) {
            trace!("Scroll {:?} to {}", direction, scheduler.scroll().position());
            bus.command(shift_command(direction));
        }
    }
}
