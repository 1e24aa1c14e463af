//! The seam between the gamepad and a BLE HID peripheral stack.
//!
//! The firmware implements this on the Nordic SoftDevice
//! (`ble::peripheral::SoftdeviceTransport`); host tests use a recorder.

use crate::error::Error;
use crate::hid::GAMEPAD_REPORT_SIZE;
use crate::profile::ServiceProfile;

pub trait HidTransport {
    /// Register the profile and start advertising.
    fn start(&mut self, profile: &ServiceProfile) -> Result<(), Error>;

    /// Stop advertising and drop any active connection.
    fn stop(&mut self) -> Result<(), Error>;

    /// Update the input report characteristic for `report_id` and
    /// notify the connected host.
    fn send_input_report(
        &mut self,
        report_id: u8,
        report: &[u8; GAMEPAD_REPORT_SIZE],
    ) -> Result<(), Error>;

    /// Update the Battery Level characteristic (0..=100).
    fn set_battery_level(&mut self, level: u8) -> Result<(), Error>;
}
