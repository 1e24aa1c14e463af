//! HID report descriptor ("report map") for the gamepad.
//!
//! Input report (Report ID 1, 27 bytes after the ID):
//! ```text
//! Byte 0-15:  Buttons 1..128, one bit each (byte 0 bit 0 = button 1)
//! Byte 16-25: X, Y, Z, Rx, Ry, Rz, Slider, Slider, Dial, Wheel
//!             (signed, -127..127)
//! Byte 26:    Hat 1 (low nibble), Hat 2 (high nibble), 1..8, 0 = null
//! ```

/// Length of the descriptor in bytes.
pub const GAMEPAD_REPORT_DESCRIPTOR_LEN: usize = 76;

/// HID Report Descriptor registered as the HID service Report Map.
pub const GAMEPAD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x04, // Usage (Joystick)
    0xA1, 0x01, // Collection (Application)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    0x85, 0x01, //     Report ID (1)
    //
    //     - Buttons 1..128 -
    0x05, 0x09, //     Usage Page (Button)
    0x19, 0x01, //     Usage Minimum (Button 1)
    0x29, 0x80, //     Usage Maximum (Button 128)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x75, 0x01, //     Report Size (1)
    0x95, 0x80, //     Report Count (128)
    0x81, 0x02, //     Input (Data, Variable, Absolute) - 16 bytes
    //
    //     - Ten 8-bit axes -
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x09, 0x32, //     Usage (Z)
    0x09, 0x33, //     Usage (Rx)
    0x09, 0x34, //     Usage (Ry)
    0x09, 0x35, //     Usage (Rz)
    0x09, 0x36, //     Usage (Slider)
    0x09, 0x36, //     Usage (Slider)
    0x09, 0x37, //     Usage (Dial)
    0x09, 0x38, //     Usage (Wheel)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x0A, //     Report Count (10)
    0x81, 0x02, //     Input (Data, Variable, Absolute) - 10 bytes
    //
    //     - Two hat switches, one nibble each -
    0x09, 0x39, //     Usage (Hat switch)
    0x09, 0x39, //     Usage (Hat switch)
    0x15, 0x01, //     Logical Minimum (1)
    0x25, 0x08, //     Logical Maximum (8)
    0x75, 0x04, //     Report Size (4)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x42, //     Input (Data, Variable, Absolute, Null State) - 1 byte
    //
    0xC0, //   End Collection (Physical)
    0xC0, // End Collection (Application)
];
