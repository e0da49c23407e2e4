//! Host request link
//!
//! The host drives the front end one request at a time over a byte stream.
//! The first byte selects the request:
//!
//! ```text
//! ┌──────┬────────────────┬──────────────────────────────────────────┐
//! │ Byte │ Request        │ Payload                                  │
//! ├──────┼────────────────┼──────────────────────────────────────────┤
//! │ 0xA0 │ stage output   │ [len][amount...] [len][address...]       │
//! │ 0xA1 │ stage fee      │ [len][amount...]                         │
//! │ 0xA2 │ reset staging  │ -                                        │
//! │ 0xA3 │ backup seed    │ [flags][destination][len][seed...]       │
//! │ else │ confirm        │ - (the byte is the command tag)          │
//! └──────┴────────────────┴──────────────────────────────────────────┘
//! ```
//!
//! Every request is answered with one byte: [`REPLY_OK`] when it was
//! carried out or approved, [`REPLY_DENIED`] otherwise. A malformed payload
//! is read to its end and denied, so the stream stays in step.

use heapless::{String, Vec};
use warden_hal::LcdBus;

use crate::backup::SEED_LENGTH;
use crate::input::Buttons;
use crate::staging::Staging;
use crate::workflow::{AskUser, Ui, Verdict};

pub const REQ_STAGE_OUTPUT: u8 = 0xA0;
pub const REQ_STAGE_FEE: u8 = 0xA1;
pub const REQ_RESET_STAGING: u8 = 0xA2;
pub const REQ_BACKUP_SEED: u8 = 0xA3;

/// Request carried out or approved
pub const REPLY_OK: u8 = 0;
/// Request denied, cancelled or rejected
pub const REPLY_DENIED: u8 = 1;

/// Backup flags bit: the seed is encrypted
pub const FLAG_ENCRYPTED: u8 = 0x01;

/// Longest text field kept; staging truncates further
pub const MAX_TEXT_LEN: usize = 40;

pub type FieldText = String<MAX_TEXT_LEN>;

/// Byte stream to the host
pub trait HostLink {
    type Error;

    /// Block until one byte arrives
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Send one byte
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;
}

impl<T: HostLink + ?Sized> HostLink for &mut T {
    type Error = T::Error;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).write_byte(byte)
    }
}

/// Request errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError<E> {
    /// The link itself failed
    Link(E),
    /// Text field is not UTF-8
    InvalidText,
    /// Seed longer than [`SEED_LENGTH`]
    SeedTooLong(u8),
}

/// One decoded host request
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// Ask the user to approve a command
    Confirm(AskUser),
    /// Stage the next transaction output
    StageOutput { amount: FieldText, address: FieldText },
    /// Stage the transaction fee
    StageFee(FieldText),
    /// Forget the staged transaction
    ResetStaging,
    /// Show a seed for backup
    BackupSeed {
        is_encrypted: bool,
        destination: u8,
        seed: Vec<u8, SEED_LENGTH>,
    },
}

impl Request {
    /// Read one request from the link
    pub fn read<L: HostLink>(link: &mut L) -> Result<Self, RequestError<L::Error>> {
        let request = match read_byte(link)? {
            REQ_STAGE_OUTPUT => {
                // Both fields are consumed before either is judged
                let amount = read_text(link)?;
                let address = read_text(link)?;
                match (amount, address) {
                    (Some(amount), Some(address)) => Request::StageOutput { amount, address },
                    _ => return Err(RequestError::InvalidText),
                }
            }
            REQ_STAGE_FEE => {
                Request::StageFee(read_text(link)?.ok_or(RequestError::InvalidText)?)
            }
            REQ_RESET_STAGING => Request::ResetStaging,
            REQ_BACKUP_SEED => {
                let flags = read_byte(link)?;
                let destination = read_byte(link)?;
                let len = read_byte(link)?;
                let mut seed = Vec::new();
                let mut overflow = false;
                for _ in 0..len {
                    overflow |= seed.push(read_byte(link)?).is_err();
                }
                if overflow {
                    return Err(RequestError::SeedTooLong(len));
                }
                Request::BackupSeed {
                    is_encrypted: flags & FLAG_ENCRYPTED != 0,
                    destination,
                    seed,
                }
            }
            tag => Request::Confirm(AskUser::from_tag(tag)),
        };
        Ok(request)
    }
}

fn read_byte<L: HostLink>(link: &mut L) -> Result<u8, RequestError<L::Error>> {
    link.read_byte().map_err(RequestError::Link)
}

/// Read a length-prefixed text field
///
/// `None` if the bytes are not UTF-8. Bytes past [`MAX_TEXT_LEN`] are read
/// and dropped.
fn read_text<L: HostLink>(link: &mut L) -> Result<Option<FieldText>, RequestError<L::Error>> {
    let len = read_byte(link)?;
    let mut bytes: Vec<u8, MAX_TEXT_LEN> = Vec::new();
    for _ in 0..len {
        let byte = read_byte(link)?;
        let _ = bytes.push(byte);
    }
    Ok(String::from_utf8(bytes).ok())
}

/// Reply byte for a verdict
pub fn reply_byte(verdict: Verdict) -> u8 {
    if verdict.is_approved() {
        REPLY_OK
    } else {
        REPLY_DENIED
    }
}

impl<'a, B: LcdBus, K: Buttons> Ui<'a, B, K> {
    /// Read one request from `link`, carry it out and reply
    ///
    /// A malformed payload is denied and reported; only link failures
    /// leave the request unanswered.
    pub fn serve_request<L: HostLink>(
        &mut self,
        link: &mut L,
        staging: &mut Staging,
    ) -> Result<Request, RequestError<L::Error>> {
        let request = match Request::read(link) {
            Ok(request) => request,
            Err(RequestError::Link(e)) => return Err(RequestError::Link(e)),
            Err(e) => {
                link.write_byte(REPLY_DENIED).map_err(RequestError::Link)?;
                return Err(e);
            }
        };

        let reply = match &request {
            Request::Confirm(command) => reply_byte(self.confirm(*command, staging)),
            Request::StageOutput { amount, address } => {
                match staging.stage_output(amount, address) {
                    Ok(()) => REPLY_OK,
                    Err(_) => REPLY_DENIED,
                }
            }
            Request::StageFee(amount) => {
                staging.stage_fee(amount);
                REPLY_OK
            }
            Request::ResetStaging => {
                staging.reset();
                REPLY_OK
            }
            Request::BackupSeed {
                is_encrypted,
                destination,
                seed,
            } => match self.write_backup_seed(seed, *is_encrypted, u32::from(*destination)) {
                Ok(()) => REPLY_OK,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("backup failed: {}", _e);
                    REPLY_DENIED
                }
            },
        };

        link.write_byte(reply).map_err(RequestError::Link)?;
        Ok(request)
    }
}
