//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **GATT server** - HID (0x1812), Battery (0x180F) and Device
//!    Information (0x180A) services.
//! 2. **Advertising** - connectable, scannable advertising carrying the
//!    HID Gamepad appearance and the service list.
//! 3. **Link task** - applies the profile on start, advertises, serves
//!    one host at a time, re-advertises after a disconnect, and tears the
//!    link down on stop.
//!
//! The gamepad talks to the link task through
//! [`peripheral::SoftdeviceTransport`].

pub mod advertising;
pub mod bonder;
pub mod peripheral;
pub mod server;

use crate::profile::ServiceProfile;

/// Lifecycle commands from the gamepad to the link task.
#[derive(Clone, defmt::Format)]
pub enum LinkCommand {
    /// Apply the profile and start advertising.
    Start(ServiceProfile),
    /// Stop advertising and disconnect.
    Stop,
}
