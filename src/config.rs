//! Application-wide constants and compile-time configuration.
//!
//! Identity defaults, HID/GATT protocol constants, and BLE timing
//! parameters live here so they can be tuned in one place.

// Identity

/// Default GAP device name (also the advertised complete local name).
pub const DEFAULT_DEVICE_NAME: &str = "BLE Gamepad";

/// Default Device Information manufacturer string.
pub const DEFAULT_MANUFACTURER: &str = "Espressif";

/// Default battery level reported at start-up (percent).
pub const DEFAULT_BATTERY_LEVEL: u8 = 100;

/// Longest device name we accept. A 31-byte legacy advertising payload
/// also carries flags (3), the 16-bit service list (6) and appearance (4).
pub const MAX_DEVICE_NAME_LEN: usize = 16;

/// Longest manufacturer string stored in the Device Information service.
pub const MAX_MANUFACTURER_LEN: usize = 32;

// HID

/// Report ID of the gamepad input report.
pub const GAMEPAD_REPORT_ID: u8 = 1;

/// GAP appearance: HID Gamepad (category 0x00F, sub-type 0x04).
pub const APPEARANCE_HID_GAMEPAD: u16 = 0x03C4;

/// PnP ID: vendor ID source (0x01 = Bluetooth SIG assigned).
pub const PNP_VENDOR_ID_SOURCE: u8 = 0x01;
pub const PNP_VENDOR_ID: u16 = 0x02E5;
pub const PNP_PRODUCT_ID: u16 = 0xABCD;
pub const PNP_PRODUCT_VERSION: u16 = 0x0110;

/// HID Information: HID class specification release 1.11.
pub const HID_INFO_BCD_HID: u16 = 0x0111;
pub const HID_INFO_COUNTRY_CODE: u8 = 0x00;
/// Bit 0 = RemoteWake, bit 1 = NormallyConnectable.
pub const HID_INFO_FLAGS: u8 = 0x01;

// BLE

/// Advertising interval (in 0.625 ms units). 50 = 31.25 ms.
pub const BLE_ADV_INTERVAL: u32 = 50;

/// BLE connection interval range (in 1.25 ms units).
/// 6 = 7.5 ms (lowest latency for HID).
pub const BLE_CONN_INTERVAL_MIN: u16 = 6;
pub const BLE_CONN_INTERVAL_MAX: u16 = 12;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 0;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;

/// Maximum number of bonded hosts kept in RAM.
pub const MAX_BONDED_HOSTS: usize = 4;

// Demo firmware (nRF52840-DK)
//
//   Button 1 → P0.11 → gamepad button 1
//   Button 2 → P0.12 → gamepad button 2
//   Button 3 → P0.24 → gamepad button 3
//   Button 4 → P0.25 → gamepad button 4

/// Input poll period of the demo control loop (ms).
pub const DEMO_POLL_MS: u64 = 10;

/// Number of poll ticks between axis sweeps.
pub const DEMO_AXIS_EVERY_TICKS: u32 = 5;
