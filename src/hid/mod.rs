//! HID report map, button store and input report encoding.

pub mod buttons;
pub mod descriptor;
pub mod gamepad;
pub mod report_protocol;


pub use buttons::ButtonSet;
pub use descriptor::GAMEPAD_REPORT_DESCRIPTOR;
pub use gamepad::{Axes, GamepadReport, Hat, GAMEPAD_REPORT_SIZE};
