//! BLE HID gamepad for nRF52840.
//!
//! The pure logic (report map, button store, report encoder, connection
//! state and the gamepad facade) builds for the host and is covered by
//! `cargo test`. The SoftDevice transport in [`ble`] needs the
//! `embedded` feature and an nRF52840 target.
//!
//! Note: The embedded binary in main.rs is `#![no_std]` / `#![no_main]`
//! and links against this library.

#![cfg_attr(not(test), no_std)]

pub mod bonds;
pub mod config;
pub mod connection;
pub mod error;
pub mod gamepad;
pub mod hid;
pub mod profile;
pub mod transport;

#[cfg(feature = "embedded")]
pub mod ble;

pub use connection::{ConnectionState, ConnectionStatus};
pub use error::{Error, TransportError};
pub use gamepad::BleGamepad;
pub use hid::{Axes, GamepadReport, Hat};
pub use profile::{DeviceIdentity, ServiceProfile};
pub use transport::HidTransport;
