//! Unified error type for ble-gamepad.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (with the `defmt` feature) for efficient
//! on-target logging.

/// Top-level error type used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Gamepad state
    /// Button index outside the documented 1..=128 range.
    InvalidButton(u8),

    /// Battery level above 100 %.
    InvalidBatteryLevel(u8),

    // Lifecycle
    /// `begin()` was called while the service is already running.
    AlreadyStarted,

    // Transport
    /// The BLE transport failed.
    Transport(TransportError),
}

/// Subset of transport errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// GAP / GATT raw error code from the SoftDevice.
    Raw(u32),
    /// Registering the profile (name, appearance, DIS values) failed.
    ServiceSetup,
    /// Updating a characteristic value failed.
    SetValueFailed,
    /// Sending a notification to the connected host failed.
    NotifyFailed,
    /// The transport has no input report characteristic with this ID.
    UnknownReportId(u8),
}

// Convenience conversions

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}
