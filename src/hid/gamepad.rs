//! Gamepad input report encoder.
//!
//! Layout (27 bytes, sent under Report ID 1):
//! ```text
//! Byte 0-7:   Buttons 1..64   (u64, little-endian)
//! Byte 8-15:  Buttons 65..128 (u64, little-endian)
//! Byte 16-25: X, Y, a1..a8    (signed, -127..127)
//! Byte 26:    Hat byte        (low nibble = hat 1, high nibble = hat 2)
//! ```

use super::buttons::{ButtonSet, BUTTON_BYTES};

/// Gamepad report size in bytes (excluding the Report ID).
pub const GAMEPAD_REPORT_SIZE: usize = 27;

/// Number of analog axes in the report.
pub const AXIS_COUNT: usize = 10;

/// Smallest axis value the descriptor admits.
pub const AXIS_MIN: i8 = -127;

/// Offset of the hat byte.
const HAT_OFFSET: usize = BUTTON_BYTES + AXIS_COUNT;

/// Ten signed axis values, in report order.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axes {
    pub x: i8,
    pub y: i8,
    /// Auxiliary analog inputs a1..a8.
    pub analog: [i8; 8],
}

impl Axes {
    /// All axes centred.
    pub const fn centered() -> Self {
        Self {
            x: 0,
            y: 0,
            analog: [0; 8],
        }
    }

    pub const fn new(x: i8, y: i8, analog: [i8; 8]) -> Self {
        Self { x, y, analog }
    }

    /// Axis values in report order (X, Y, a1..a8).
    pub fn to_array(&self) -> [i8; AXIS_COUNT] {
        let mut out = [0i8; AXIS_COUNT];
        out[0] = self.x;
        out[1] = self.y;
        out[2..].copy_from_slice(&self.analog);
        out
    }
}

/// Hat switch directions. `Centered` is the descriptor's null value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Hat {
    #[default]
    Centered = 0,
    Up = 1,
    UpRight = 2,
    Right = 3,
    DownRight = 4,
    Down = 5,
    DownLeft = 6,
    Left = 7,
    UpLeft = 8,
}

impl Hat {
    /// Pack two hats into the report's hat byte.
    pub const fn pack(hat1: Hat, hat2: Hat) -> u8 {
        (hat1 as u8) | ((hat2 as u8) << 4)
    }
}

impl From<u8> for Hat {
    /// Decode one nibble; anything outside 1..8 is treated as centred.
    fn from(nibble: u8) -> Self {
        match nibble {
            1 => Hat::Up,
            2 => Hat::UpRight,
            3 => Hat::Right,
            4 => Hat::DownRight,
            5 => Hat::Down,
            6 => Hat::DownLeft,
            7 => Hat::Left,
            8 => Hat::UpLeft,
            _ => Hat::Centered,
        }
    }
}

/// One gamepad input report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadReport {
    pub buttons: ButtonSet,
    pub axes: Axes,
    /// Raw hat byte (see [`Hat::pack`]).
    pub hat: u8,
}

impl GamepadReport {
    pub const fn new(buttons: ButtonSet, axes: Axes, hat: u8) -> Self {
        Self { buttons, axes, hat }
    }

    /// Serialise into a byte slice for HID transmission.
    /// Returns the number of bytes written (always 27).
    ///
    /// Axis values of -128 are sent as -127, the descriptor's logical minimum.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < GAMEPAD_REPORT_SIZE {
            return 0;
        }
        self.buttons.serialize(&mut buf[..BUTTON_BYTES]);
        for (slot, value) in buf[BUTTON_BYTES..HAT_OFFSET]
            .iter_mut()
            .zip(self.axes.to_array())
        {
            *slot = value.max(AXIS_MIN) as u8;
        }
        buf[HAT_OFFSET] = self.hat;
        GAMEPAD_REPORT_SIZE
    }

    /// Serialise into a fresh fixed-size buffer.
    pub fn to_bytes(&self) -> [u8; GAMEPAD_REPORT_SIZE] {
        let mut buf = [0u8; GAMEPAD_REPORT_SIZE];
        self.serialize(&mut buf);
        buf
    }

    /// Parse a 27-byte report (e.g. one captured from the wire).
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < GAMEPAD_REPORT_SIZE {
            return None;
        }
        let mut word0 = [0u8; 8];
        let mut word1 = [0u8; 8];
        word0.copy_from_slice(&data[0..8]);
        word1.copy_from_slice(&data[8..16]);

        let axis = |i: usize| data[BUTTON_BYTES + i] as i8;
        let mut analog = [0i8; 8];
        for (i, a) in analog.iter_mut().enumerate() {
            *a = axis(2 + i);
        }

        Some(Self {
            buttons: ButtonSet::from_words([u64::from_le_bytes(word0), u64::from_le_bytes(word1)]),
            axes: Axes::new(axis(0), axis(1), analog),
            hat: data[HAT_OFFSET],
        })
    }
}
