//! Library side of the zone-receiver firmware.
//!
//! Everything that decides *what* the unit does - identity codec,
//! storage record, display frames, gesture recognition, the settings
//! menu and the top-level loop - lives here and runs on the host.
//!
//! Usage: `cargo test --lib` or `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and only adds the hardware drivers on top of this crate.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod display;
pub mod error;
pub mod identity;
pub mod radio;
pub mod receiver;
pub mod storage;
pub mod ui;

pub use error::{Error, RadioError};
pub use identity::{derive_address, Identity, ReceiverAddress};
pub use receiver::Receiver;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
