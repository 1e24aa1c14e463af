//! Gamepad service facade.
//!
//! Owns the button state and the transport. Every mutator updates local
//! state first; a report is only encoded and sent while the service is
//! started and a host is connected. Nothing is queued while disconnected:
//! after a reconnect the host sees the next change, not the history.

#[cfg(feature = "defmt")]
use defmt::{debug, info, warn};

use crate::config::GAMEPAD_REPORT_ID;
use crate::connection::ConnectionStatus;
use crate::error::Error;
use crate::hid::{Axes, ButtonSet, GamepadReport};
use crate::profile::{DeviceIdentity, ServiceProfile};
use crate::transport::HidTransport;

/// Highest battery level accepted by `set_battery_level`.
pub const MAX_BATTERY_LEVEL: u8 = 100;

pub struct BleGamepad<'a, T: HidTransport> {
    identity: DeviceIdentity,
    battery_level: u8,
    buttons: ButtonSet,
    status: &'a ConnectionStatus,
    transport: T,
    started: bool,
}

impl<'a, T: HidTransport> BleGamepad<'a, T> {
    /// Create a stopped gamepad. `battery_level` is clamped to 100.
    ///
    /// `status` is the cell the transport's connection callbacks write.
    pub fn new(
        identity: DeviceIdentity,
        battery_level: u8,
        status: &'a ConnectionStatus,
        transport: T,
    ) -> Self {
        Self {
            identity,
            battery_level: battery_level.min(MAX_BATTERY_LEVEL),
            buttons: ButtonSet::new(),
            status,
            transport,
            started: false,
        }
    }

    /// Register the HID, battery and device information services and
    /// start advertising. Valid again after [`end`](Self::end).
    pub fn begin(&mut self) -> Result<(), Error> {
        if self.started {
            return Err(Error::AlreadyStarted);
        }
        let profile = ServiceProfile::new(self.identity.clone(), self.battery_level);
        self.transport.start(&profile)?;
        self.started = true;

        #[cfg(feature = "defmt")]
        info!("Gamepad: started as {}", self.identity.name.as_str());

        Ok(())
    }

    /// Stop advertising and drop the connection. No-op when stopped.
    pub fn end(&mut self) -> Result<(), Error> {
        if !self.started {
            return Ok(());
        }
        self.transport.stop()?;
        self.started = false;

        #[cfg(feature = "defmt")]
        info!("Gamepad: stopped");

        Ok(())
    }

    /// Send the current buttons together with `axes` and the raw `hat`
    /// byte (see [`Hat::pack`](crate::hid::Hat::pack)).
    pub fn set_axes(&mut self, axes: &Axes, hat: u8) -> Result<(), Error> {
        if !self.can_send() {
            return Ok(());
        }
        let report = GamepadReport::new(self.buttons, *axes, hat).to_bytes();

        #[cfg(feature = "defmt")]
        debug!("Gamepad: report {:x}", report);

        self.transport
            .send_input_report(GAMEPAD_REPORT_ID, &report)
            .inspect_err(|_e| {
                #[cfg(feature = "defmt")]
                warn!("Gamepad: report send failed: {}", _e);
            })
    }

    /// Press `button` (1..=128). A change sends a report with centred
    /// axes and hat.
    pub fn press(&mut self, button: u8) -> Result<(), Error> {
        if self.buttons.press(button)? {
            self.send_buttons()?;
        }
        Ok(())
    }

    /// Release `button` (1..=128). A change sends a report with centred
    /// axes and hat.
    pub fn release(&mut self, button: u8) -> Result<(), Error> {
        if self.buttons.release(button)? {
            self.send_buttons()?;
        }
        Ok(())
    }

    /// Release every button, sending one report if anything was held.
    pub fn release_all(&mut self) -> Result<(), Error> {
        if self.buttons.clear() {
            self.send_buttons()?;
        }
        Ok(())
    }

    /// Whether `button` is held. Out-of-range numbers are never pressed.
    pub fn is_pressed(&self, button: u8) -> bool {
        self.buttons.is_pressed(button).unwrap_or(false)
    }

    pub fn is_connected(&self) -> bool {
        self.status.is_connected()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Update the battery service (0..=100). No gamepad report is sent.
    pub fn set_battery_level(&mut self, level: u8) -> Result<(), Error> {
        if level > MAX_BATTERY_LEVEL {
            return Err(Error::InvalidBatteryLevel(level));
        }
        self.battery_level = level;
        if self.started {
            self.transport.set_battery_level(level)?;
        }
        Ok(())
    }

    pub fn battery_level(&self) -> u8 {
        self.battery_level
    }

    pub fn buttons(&self) -> ButtonSet {
        self.buttons
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn can_send(&self) -> bool {
        self.started && self.status.is_connected()
    }

    fn send_buttons(&mut self) -> Result<(), Error> {
        self.set_axes(&Axes::centered(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::hid::GAMEPAD_REPORT_SIZE;

    #[derive(Default)]
    struct Recorder {
        starts: Vec<ServiceProfile>,
        stops: usize,
        reports: Vec<(u8, [u8; GAMEPAD_REPORT_SIZE])>,
        battery: Vec<u8>,
        fail_notify: bool,
    }

    impl HidTransport for Recorder {
        fn start(&mut self, profile: &ServiceProfile) -> Result<(), Error> {
            self.starts.push(profile.clone());
            Ok(())
        }

        fn stop(&mut self) -> Result<(), Error> {
            self.stops += 1;
            Ok(())
        }

        fn send_input_report(
            &mut self,
            report_id: u8,
            report: &[u8; GAMEPAD_REPORT_SIZE],
        ) -> Result<(), Error> {
            if self.fail_notify {
                return Err(TransportError::NotifyFailed.into());
            }
            self.reports.push((report_id, *report));
            Ok(())
        }

        fn set_battery_level(&mut self, level: u8) -> Result<(), Error> {
            self.battery.push(level);
            Ok(())
        }
    }

    fn started(status: &ConnectionStatus) -> BleGamepad<'_, Recorder> {
        let mut pad = BleGamepad::new(DeviceIdentity::default(), 100, status, Recorder::default());
        pad.begin().unwrap();
        pad
    }

    #[test]
    fn new_clamps_battery_level() {
        let status = ConnectionStatus::new();
        let pad = BleGamepad::new(DeviceIdentity::default(), 250, &status, Recorder::default());
        assert_eq!(pad.battery_level(), 100);
    }

    #[test]
    fn begin_hands_profile_to_transport() {
        let status = ConnectionStatus::new();
        let identity = DeviceIdentity::new("Pad", "Acme");
        let mut pad = BleGamepad::new(identity.clone(), 42, &status, Recorder::default());
        pad.begin().unwrap();

        let starts = &pad.transport().starts;
        assert_eq!(starts.len(), 1);
        assert_eq!(starts[0].identity, identity);
        assert_eq!(starts[0].battery_level, 42);
        assert_eq!(starts[0].report_map, crate::hid::GAMEPAD_REPORT_DESCRIPTOR);
    }

    #[test]
    fn begin_twice_is_rejected() {
        let status = ConnectionStatus::new();
        let mut pad = started(&status);
        assert_eq!(pad.begin(), Err(Error::AlreadyStarted));
        assert_eq!(pad.transport().starts.len(), 1);
    }

    #[test]
    fn begin_after_end_restarts() {
        let status = ConnectionStatus::new();
        let mut pad = started(&status);
        pad.end().unwrap();
        assert!(!pad.is_started());
        pad.begin().unwrap();
        assert_eq!(pad.transport().starts.len(), 2);
        assert_eq!(pad.transport().stops, 1);
    }

    #[test]
    fn end_when_stopped_is_noop() {
        let status = ConnectionStatus::new();
        let mut pad = BleGamepad::new(DeviceIdentity::default(), 100, &status, Recorder::default());
        pad.end().unwrap();
        assert_eq!(pad.transport().stops, 0);
    }

    #[test]
    fn press_sends_once_per_change() {
        let status = ConnectionStatus::new();
        status.on_connect();
        let mut pad = started(&status);

        pad.press(5).unwrap();
        pad.press(5).unwrap();
        assert_eq!(pad.transport().reports.len(), 1);

        pad.release(5).unwrap();
        pad.release(5).unwrap();
        assert_eq!(pad.transport().reports.len(), 2);
    }

    #[test]
    fn press_report_has_centered_axes_and_hat() {
        let status = ConnectionStatus::new();
        status.on_connect();
        let mut pad = started(&status);

        pad.press(1).unwrap();
        let (id, report) = pad.transport().reports[0];
        assert_eq!(id, 1);
        assert_eq!(report[0], 0x01);
        assert!(report[16..].iter().all(|&b| b == 0));
    }

    #[test]
    fn set_axes_carries_held_buttons() {
        let status = ConnectionStatus::new();
        status.on_connect();
        let mut pad = started(&status);

        pad.press(66).unwrap();
        pad.set_axes(&Axes::new(10, -10, [1, 2, 3, 4, 5, 6, 7, 8]), 0x21)
            .unwrap();

        let (_, report) = pad.transport().reports[1];
        assert_eq!(report[8], 0x02);
        assert_eq!(report[16], 10);
        assert_eq!(report[17] as i8, -10);
        assert_eq!(report[25], 8);
        assert_eq!(report[26], 0x21);
    }

    #[test]
    fn disconnected_updates_state_without_sending() {
        let status = ConnectionStatus::new();
        let mut pad = started(&status);

        pad.press(9).unwrap();
        pad.set_axes(&Axes::centered(), 1).unwrap();
        assert!(pad.is_pressed(9));
        pad.release(9).unwrap();
        assert!(!pad.is_pressed(9));
        assert!(pad.transport().reports.is_empty());
    }

    #[test]
    fn not_started_sends_nothing_even_when_connected() {
        let status = ConnectionStatus::new();
        status.on_connect();
        let mut pad = BleGamepad::new(DeviceIdentity::default(), 100, &status, Recorder::default());

        pad.press(2).unwrap();
        assert!(pad.is_pressed(2));
        assert!(pad.transport().reports.is_empty());
    }

    #[test]
    fn reconnect_sends_only_the_next_change() {
        let status = ConnectionStatus::new();
        let mut pad = started(&status);

        pad.press(1).unwrap();
        pad.press(2).unwrap();
        status.on_connect();
        pad.press(3).unwrap();

        let reports = &pad.transport().reports;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].1[0], 0b0000_0111);
    }

    #[test]
    fn invalid_button_is_an_error() {
        let status = ConnectionStatus::new();
        status.on_connect();
        let mut pad = started(&status);

        assert_eq!(pad.press(0), Err(Error::InvalidButton(0)));
        assert_eq!(pad.release(129), Err(Error::InvalidButton(129)));
        assert!(!pad.is_pressed(0));
        assert!(pad.transport().reports.is_empty());
    }

    #[test]
    fn release_all_sends_one_report() {
        let status = ConnectionStatus::new();
        status.on_connect();
        let mut pad = started(&status);

        pad.press(1).unwrap();
        pad.press(100).unwrap();
        pad.release_all().unwrap();
        pad.release_all().unwrap();

        let reports = &pad.transport().reports;
        assert_eq!(reports.len(), 3);
        assert!(reports[2].1[..16].iter().all(|&b| b == 0));
        assert!(pad.buttons().is_empty());
    }

    #[test]
    fn battery_level_goes_to_battery_service_only() {
        let status = ConnectionStatus::new();
        status.on_connect();
        let mut pad = started(&status);

        for level in [0, 50, 100] {
            pad.set_battery_level(level).unwrap();
            assert_eq!(pad.battery_level(), level);
        }
        assert_eq!(pad.transport().battery, vec![0, 50, 100]);
        assert!(pad.transport().reports.is_empty());
    }

    #[test]
    fn battery_level_above_100_is_rejected() {
        let status = ConnectionStatus::new();
        let mut pad = started(&status);
        assert_eq!(pad.set_battery_level(101), Err(Error::InvalidBatteryLevel(101)));
        assert_eq!(pad.battery_level(), 100);
    }

    #[test]
    fn battery_level_before_begin_is_used_at_start() {
        let status = ConnectionStatus::new();
        let mut pad = BleGamepad::new(DeviceIdentity::default(), 100, &status, Recorder::default());
        pad.set_battery_level(30).unwrap();
        assert!(pad.transport().battery.is_empty());
        pad.begin().unwrap();
        assert_eq!(pad.transport().starts[0].battery_level, 30);
    }

    #[test]
    fn transport_failure_propagates_but_state_sticks() {
        let status = ConnectionStatus::new();
        status.on_connect();
        let mut pad = started(&status);
        pad.transport.fail_notify = true;

        assert_eq!(
            pad.press(4),
            Err(Error::Transport(TransportError::NotifyFailed))
        );
        assert!(pad.is_pressed(4));
    }
}
