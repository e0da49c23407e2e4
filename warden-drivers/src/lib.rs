//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in warden-hal for the display hardware:
//!
//! - HD44780 character display over a 4-bit parallel GPIO bus

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod hd44780;

pub use hd44780::FourBitBus;
