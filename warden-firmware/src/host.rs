//! Host request loop
//!
//! Requests and replies are framed by `warden_core::link`. Link errors
//! put the stream-error notice on screen and the loop carries on.

use defmt::*;
use embassy_rp::uart::{Blocking, Error as UartError, Uart};
use warden_core::{Buttons, HostLink, RequestError, Staging, Ui};
use warden_hal::LcdBus;

/// Host link over a blocking UART
pub struct UartLink(pub Uart<'static, Blocking>);

impl HostLink for UartLink {
    type Error = UartError;

    fn read_byte(&mut self) -> Result<u8, UartError> {
        let mut byte = [0u8; 1];
        self.0.blocking_read(&mut byte)?;
        Ok(byte[0])
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), UartError> {
        self.0.blocking_write(&[byte])
    }
}

/// Serve requests forever
pub fn serve<B: LcdBus, K: Buttons>(
    link: &mut UartLink,
    ui: &mut Ui<'_, B, K>,
    staging: &mut Staging,
) -> ! {
    info!("Host link ready");
    loop {
        match ui.serve_request(link, staging) {
            Ok(request) => debug!("Served {:?}", request),
            Err(RequestError::Link(e)) => {
                warn!("Host link error: {:?}", e);
                ui.stream_error();
            }
            Err(e) => warn!("Rejected request: {:?}", e),
        }
    }
}
