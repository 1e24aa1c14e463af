//! Values the transport registers when the gamepad service starts.

use heapless::String;

use crate::config;
use crate::hid::GAMEPAD_REPORT_DESCRIPTOR;

pub type DeviceName = String<{ config::MAX_DEVICE_NAME_LEN }>;
pub type Manufacturer = String<{ config::MAX_MANUFACTURER_LEN }>;

/// Copy `src` into a bounded string, truncating on a char boundary.
fn bounded<const N: usize>(src: &str) -> String<N> {
    let mut out = String::new();
    for c in src.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Name and manufacturer shown to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceIdentity {
    /// GAP device name / advertised local name.
    pub name: DeviceName,
    /// Device Information "Manufacturer Name String".
    pub manufacturer: Manufacturer,
}

impl DeviceIdentity {
    /// Build an identity; overlong strings are truncated.
    pub fn new(name: &str, manufacturer: &str) -> Self {
        Self {
            name: bounded(name),
            manufacturer: bounded(manufacturer),
        }
    }
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self::new(config::DEFAULT_DEVICE_NAME, config::DEFAULT_MANUFACTURER)
    }
}

/// PnP ID characteristic (0x2A50).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PnpId {
    /// 0x01 = Bluetooth SIG, 0x02 = USB-IF.
    pub vendor_id_source: u8,
    pub vendor_id: u16,
    pub product_id: u16,
    pub product_version: u16,
}

impl PnpId {
    pub fn to_bytes(&self) -> [u8; 7] {
        let v = self.vendor_id.to_le_bytes();
        let p = self.product_id.to_le_bytes();
        let r = self.product_version.to_le_bytes();
        [self.vendor_id_source, v[0], v[1], p[0], p[1], r[0], r[1]]
    }
}

impl Default for PnpId {
    fn default() -> Self {
        Self {
            vendor_id_source: config::PNP_VENDOR_ID_SOURCE,
            vendor_id: config::PNP_VENDOR_ID,
            product_id: config::PNP_PRODUCT_ID,
            product_version: config::PNP_PRODUCT_VERSION,
        }
    }
}

/// HID Information characteristic (0x2A4A).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidInformation {
    pub bcd_hid: u16,
    pub country_code: u8,
    pub flags: u8,
}

impl HidInformation {
    pub fn to_bytes(&self) -> [u8; 4] {
        let bcd = self.bcd_hid.to_le_bytes();
        [bcd[0], bcd[1], self.country_code, self.flags]
    }
}

impl Default for HidInformation {
    fn default() -> Self {
        Self {
            bcd_hid: config::HID_INFO_BCD_HID,
            country_code: config::HID_INFO_COUNTRY_CODE,
            flags: config::HID_INFO_FLAGS,
        }
    }
}

/// Everything `begin()` hands to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServiceProfile {
    pub identity: DeviceIdentity,
    pub battery_level: u8,
    pub appearance: u16,
    pub pnp_id: PnpId,
    pub hid_info: HidInformation,
    pub report_map: &'static [u8],
}

impl ServiceProfile {
    pub fn new(identity: DeviceIdentity, battery_level: u8) -> Self {
        Self {
            identity,
            battery_level,
            appearance: config::APPEARANCE_HID_GAMEPAD,
            pnp_id: PnpId::default(),
            hid_info: HidInformation::default(),
            report_map: GAMEPAD_REPORT_DESCRIPTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_truncates_long_name() {
        let id = DeviceIdentity::new("An Extremely Long Gamepad Name", "Acme");
        assert_eq!(id.name.len(), config::MAX_DEVICE_NAME_LEN);
        assert_eq!(id.name.as_str(), "An Extremely Lon");
        assert_eq!(id.manufacturer.as_str(), "Acme");
    }

    #[test]
    fn identity_truncates_on_char_boundary() {
        // 15 ASCII bytes + a 2-byte 'é' would be 17 bytes.
        let id = DeviceIdentity::new("abcdefghijklmnoé", "x");
        assert_eq!(id.name.as_str(), "abcdefghijklmno");
    }

    #[test]
    fn pnp_id_bytes_are_little_endian() {
        assert_eq!(
            PnpId::default().to_bytes(),
            [0x01, 0xE5, 0x02, 0xCD, 0xAB, 0x10, 0x01]
        );
    }

    #[test]
    fn hid_information_bytes() {
        assert_eq!(HidInformation::default().to_bytes(), [0x11, 0x01, 0x00, 0x01]);
    }

    #[test]
    fn profile_carries_gamepad_appearance_and_map() {
        let profile = ServiceProfile::new(DeviceIdentity::default(), 80);
        assert_eq!(profile.appearance, 0x03C4);
        assert_eq!(profile.battery_level, 80);
        assert_eq!(profile.report_map, GAMEPAD_REPORT_DESCRIPTOR);
    }
}
