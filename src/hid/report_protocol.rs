//! HID Report Descriptor inspector.
//!
//! Walks the items of a report map and summarises what a host HID
//! parser will see: the application collection's usage, the report ID,
//! how many input bits follow it, and how those bits split into
//! buttons, axes and hat switches. The gamepad descriptor is a static
//! table; a mistake in it only shows up as a host that refuses to
//! enumerate the device, so the tests run it through here instead.
//!
//! ## Limitations
//!
//! This implementation handles the items a gamepad map uses:
//! - Only Input main items contribute to the summary
//! - Push/Pop state is not supported
//! - Delimiter tags are ignored

#[cfg(feature = "defmt")]
use defmt::debug;

/// Usage page codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsagePage {
    /// Generic Desktop (mouse, keyboard, joystick).
    GenericDesktop,
    /// Button.
    Button,
    /// Unknown/unsupported.
    Unknown(u16),
}

impl From<u16> for UsagePage {
    fn from(code: u16) -> Self {
        match code {
            0x01 => UsagePage::GenericDesktop,
            0x09 => UsagePage::Button,
            other => UsagePage::Unknown(other),
        }
    }
}

/// Generic Desktop usage codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DesktopUsage {
    Pointer,
    Joystick,
    Gamepad,
    /// X, Y, Z, Rx, Ry, Rz, Slider, Dial, Wheel (0x30..=0x38).
    Axis(u16),
    HatSwitch,
    Unknown(u16),
}

impl From<u16> for DesktopUsage {
    fn from(code: u16) -> Self {
        match code {
            0x01 => DesktopUsage::Pointer,
            0x04 => DesktopUsage::Joystick,
            0x05 => DesktopUsage::Gamepad,
            0x30..=0x38 => DesktopUsage::Axis(code),
            0x39 => DesktopUsage::HatSwitch,
            other => DesktopUsage::Unknown(other),
        }
    }
}

/// Input item flag: Null State (bit 6).
const INPUT_NULL_STATE: u32 = 0x40;

/// Most local usages we track before an Input item.
const MAX_LOCAL_USAGES: usize = 16;

/// Summary of a parsed report map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DescriptorSummary {
    /// Usage of the outermost Application collection.
    pub application_usage: Option<DesktopUsage>,
    /// First Report ID declared, when present.
    pub report_id: Option<u8>,
    /// Total input bits following the Report ID.
    pub input_bits: u32,
    /// Number of one-bit button fields.
    pub buttons: u32,
    /// Number of Generic Desktop axis fields.
    pub axes: u32,
    /// Number of hat switch fields.
    pub hats: u32,
    /// Logical range declared for the axes.
    pub axis_range: Option<(i32, i32)>,
    /// Logical range declared for the hat switches.
    pub hat_range: Option<(i32, i32)>,
    /// Whether the hat Input item sets the Null State flag.
    pub hat_null_state: bool,
    /// Every Collection has a matching End Collection.
    pub balanced: bool,
}

impl DescriptorSummary {
    /// Input report length in bytes, rounded up.
    pub fn input_report_len(&self) -> usize {
        self.input_bits.div_ceil(8) as usize
    }
}

/// Sign-extend a 1, 2 or 4 byte item value.
fn signed(value: u32, size: usize) -> i32 {
    match size {
        1 => value as u8 as i8 as i32,
        2 => value as u16 as i16 as i32,
        _ => value as i32,
    }
}

/// Parse a HID Report Descriptor.
///
/// Returns `None` when an item runs past the end of the table or an
/// End Collection has no matching Collection.
pub fn parse(data: &[u8]) -> Option<DescriptorSummary> {
    let mut summary = DescriptorSummary {
        application_usage: None,
        report_id: None,
        input_bits: 0,
        buttons: 0,
        axes: 0,
        hats: 0,
        axis_range: None,
        hat_range: None,
        hat_null_state: false,
        balanced: false,
    };

    // Global state.
    let mut usage_page = UsagePage::Unknown(0);
    let mut logical_min: i32 = 0;
    let mut logical_max: i32 = 0;
    let mut report_size: u32 = 0;
    let mut report_count: u32 = 0;

    // Local state (cleared after every main item).
    let mut usages = [0u16; MAX_LOCAL_USAGES];
    let mut usage_len = 0usize;
    let mut usage_min: Option<u16> = None;

    let mut depth: u32 = 0;

    let mut i = 0;
    while i < data.len() {
        let prefix = data[i];
        let tag = (prefix >> 4) & 0x0F;
        let item_type = (prefix >> 2) & 0x03;
        let size = match prefix & 0x03 {
            0 => 0,
            1 => 1,
            2 => 2,
            _ => 4,
        };

        if i + 1 + size > data.len() {
            return None;
        }

        let value: u32 = match size {
            0 => 0,
            1 => data[i + 1] as u32,
            2 => u16::from_le_bytes([data[i + 1], data[i + 2]]) as u32,
            _ => u32::from_le_bytes([data[i + 1], data[i + 2], data[i + 3], data[i + 4]]),
        };

        match item_type {
            // Main items
            0 => {
                match tag {
                    // Input
                    0x08 => {
                        let bits = report_size.checked_mul(report_count)?;
                        summary.input_bits = summary.input_bits.checked_add(bits)?;
                        match usage_page {
                            UsagePage::Button => {
                                summary.buttons = summary.buttons.checked_add(report_count)?;
                            }
                            UsagePage::GenericDesktop => {
                                let first = usages.get(..usage_len).and_then(|u| u.first());
                                match first.map(|&u| DesktopUsage::from(u)) {
                                    Some(DesktopUsage::HatSwitch) => {
                                        summary.hats = summary.hats.checked_add(report_count)?;
                                        summary.hat_range = Some((logical_min, logical_max));
                                        summary.hat_null_state = value & INPUT_NULL_STATE != 0;
                                    }
                                    Some(DesktopUsage::Axis(_)) => {
                                        summary.axes = summary.axes.checked_add(report_count)?;
                                        summary.axis_range = Some((logical_min, logical_max));
                                    }
                                    _ => {}
                                }
                            }
                            UsagePage::Unknown(_) => {}
                        }
                    }
                    // Collection
                    0x0A => {
                        // Application collection at the top level.
                        if depth == 0
                            && value == 0x01
                            && usage_page == UsagePage::GenericDesktop
                            && usage_len > 0
                            && summary.application_usage.is_none()
                        {
                            summary.application_usage = Some(DesktopUsage::from(usages[0]));
                        }
                        depth += 1;
                    }
                    // End Collection
                    0x0C => {
                        depth = depth.checked_sub(1)?;
                    }
                    _ => {}
                }
                usage_len = 0;
                usage_min = None;
            }
            // Global items
            1 => match tag {
                // Usage Page
                0x00 => usage_page = UsagePage::from(value as u16),
                // Logical Minimum
                0x01 => logical_min = signed(value, size),
                // Logical Maximum
                0x02 => logical_max = signed(value, size),
                // Report Size
                0x07 => report_size = value,
                // Report ID
                0x08 => {
                    let id = u8::try_from(value).ok()?;
                    if summary.report_id.is_none() {
                        summary.report_id = Some(id);
                    }
                }
                // Report Count
                0x09 => report_count = value,
                _ => {}
            },
            // Local items
            2 => match tag {
                // Usage
                0x00 => {
                    if usage_len < MAX_LOCAL_USAGES {
                        usages[usage_len] = value as u16;
                        usage_len += 1;
                    }
                }
                // Usage Minimum
                0x01 => usage_min = Some(value as u16),
                // Usage Maximum
                0x02 => {
                    if let Some(min) = usage_min {
                        if usage_len < MAX_LOCAL_USAGES {
                            usages[usage_len] = min;
                            usage_len += 1;
                        }
                    }
                }
                _ => {}
            },
            _ => {}
        }

        i += 1 + size;
    }

    summary.balanced = depth == 0;

    #[cfg(feature = "defmt")]
    debug!(
        "report map: id={} input_bits={} buttons={} axes={} hats={}",
        summary.report_id, summary.input_bits, summary.buttons, summary.axes, summary.hats
    );

    Some(summary)
}
