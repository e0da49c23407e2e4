//! Warden Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the confirmation front end is
//! written against. Chip-specific code (the RP2040 firmware, host test
//! mocks) implements them so the same UI logic runs everywhere.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  warden-firmware (pins, tick, host link)│
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  warden-core  │       │warden-drivers │
//! │ (UI, workflow)│       │  (HD44780)    │
//! └───────────────┘       └───────────────┘
//!         │                       │
//!         └───────────┬───────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  warden-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`lcd::LcdBus`] - Byte sink for a character display controller

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod lcd;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use lcd::{LcdBus, RegisterSelect};
