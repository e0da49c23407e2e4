//! Board-agnostic confirmation front end for the hardware wallet
//!
//! This crate contains all user-interaction logic that does not depend on
//! a specific board:
//!
//! - Display line driver for HD44780-style two-line displays
//! - Button debouncing and autoscroll, driven by a fixed-rate tick
//! - Staging store for transaction outputs awaiting review
//! - Confirmation workflow (one verdict per request)
//! - Seed backup presenter
//! - Host request link (staging, confirmation and backup over a byte stream)
//! - UI timing configuration
//!
//! # Execution contexts
//!
//! The [`scheduler::Scheduler`] runs from a periodic, interrupt-like
//! context. Everything else runs in the foreground and talks to the
//! scheduler only through [`shared::SharedState`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backup;
pub mod config;
pub mod display;
pub mod input;
pub mod link;
pub mod scheduler;
pub mod scroll;
pub mod shared;
pub mod staging;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use backup::{BackupError, SEED_LENGTH};
pub use config::{ActiveLevel, ConfigError, UiConfig};
pub use display::{Lcd, Line};
pub use input::{Button, ButtonChannel, ButtonSnapshot, Buttons};
pub use link::{HostLink, Request, RequestError};
pub use scheduler::Scheduler;
pub use scroll::{ScrollDirection, ScrollState};
pub use shared::SharedState;
pub use staging::{Staging, StagingError, MAX_OUTPUTS};
pub use workflow::{AskUser, Ui, Verdict};
