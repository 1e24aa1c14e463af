//! GATT server definition for the gamepad.
//!
//! The `#[nrf_softdevice::gatt_service]` macro generates `*_set`,
//! `*_get` and `*_notify` helpers for every characteristic below.

use crate::config::MAX_MANUFACTURER_LEN;
use crate::hid::descriptor::GAMEPAD_REPORT_DESCRIPTOR_LEN;
use crate::hid::GAMEPAD_REPORT_SIZE;

/// HID-over-GATT service.
#[nrf_softdevice::gatt_service(uuid = "1812")]
pub struct HidService {
    /// Input report, Report ID 1. Report Reference = [id, 1 (input)].
    #[characteristic(
        uuid = "2a4d",
        security = "justworks",
        read,
        notify,
        descriptor(uuid = "2908", security = "justworks", value = "[1, 1]")
    )]
    pub input_report: [u8; GAMEPAD_REPORT_SIZE],

    /// Report Map - written from the profile when the service starts.
    #[characteristic(uuid = "2a4b", security = "justworks", read)]
    pub report_map: [u8; GAMEPAD_REPORT_DESCRIPTOR_LEN],

    /// HID Information - bcdHID, country code, flags.
    #[characteristic(uuid = "2a4a", security = "justworks", read)]
    pub hid_info: [u8; 4],

    /// HID Control Point - 0 = suspend, 1 = exit suspend.
    #[characteristic(uuid = "2a4c", security = "justworks", write_without_response)]
    pub control_point: u8,

    /// Protocol Mode - report protocol only.
    #[characteristic(
        uuid = "2a4e",
        security = "justworks",
        read,
        write_without_response,
        value = "[1u8]"
    )]
    pub protocol_mode: [u8; 1],
}

#[nrf_softdevice::gatt_service(uuid = "180f")]
pub struct BatteryService {
    #[characteristic(uuid = "2a19", read, notify)]
    pub battery_level: u8,
}

#[nrf_softdevice::gatt_service(uuid = "180a")]
pub struct DeviceInformationService {
    #[characteristic(uuid = "2a29", read)]
    pub manufacturer_name: heapless::Vec<u8, MAX_MANUFACTURER_LEN>,

    #[characteristic(uuid = "2a50", read)]
    pub pnp_id: [u8; 7],
}

#[nrf_softdevice::gatt_server]
pub struct GamepadServer {
    pub bas: BatteryService,
    pub dis: DeviceInformationService,
    pub hid: HidService,
}
