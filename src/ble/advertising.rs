//! Advertising payloads built from the service profile.

use nrf_softdevice::ble::advertisement_builder::{
    AdvertisementDataType, Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload,
    ServiceList, ServiceUuid16,
};

use crate::profile::ServiceProfile;

/// Flags, HID + Battery service list, appearance and the complete name.
///
/// The name is bounded by `MAX_DEVICE_NAME_LEN` so the whole payload
/// fits a 31-byte legacy advertisement.
pub fn advertising_data(profile: &ServiceProfile) -> LegacyAdvertisementPayload {
    LegacyAdvertisementBuilder::new()
        .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
        .services_16(
            ServiceList::Complete,
            &[ServiceUuid16::HUMAN_INTERFACE_DEVICE, ServiceUuid16::BATTERY],
        )
        .raw(AdvertisementDataType::APPEARANCE, &profile.appearance.to_le_bytes())
        .full_name(profile.identity.name.as_str())
        .build()
}

pub fn scan_response_data() -> LegacyAdvertisementPayload {
    LegacyAdvertisementBuilder::new()
        .services_16(
            ServiceList::Incomplete,
            &[ServiceUuid16::DEVICE_INFORMATION],
        )
        .build()
}
