//! Peripheral link: advertising, the single host connection and the
//! [`HidTransport`] implementation the gamepad sends through.
//!
//! The gamepad runs outside the SoftDevice event loop, so it only ever
//! signals [`LinkCommand`]s and pushes characteristic values. The link
//! task owns advertising and the GATT event loop.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use defmt::{error, info, warn};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use nrf_softdevice::ble::{gatt_server, peripheral, Connection};
use nrf_softdevice::{raw, RawError, Softdevice};

use crate::ble::server::{
    BatteryServiceEvent, GamepadServer, GamepadServerEvent, HidServiceEvent,
};
use crate::ble::{advertising, bonder, LinkCommand};
use crate::config;
use crate::connection::ConnectionStatus;
use crate::error::{Error, TransportError};
use crate::hid::GAMEPAD_REPORT_SIZE;
use crate::profile::ServiceProfile;
use crate::transport::HidTransport;

/// Back-off after a failed advertising attempt.
const ADVERTISE_RETRY_MS: u64 = 500;

/// State shared between the link task and [`SoftdeviceTransport`].
pub struct GamepadLink {
    status: ConnectionStatus,
    commands: Signal<CriticalSectionRawMutex, LinkCommand>,
    connection: Mutex<CriticalSectionRawMutex, RefCell<Option<Connection>>>,
    input_notify: AtomicBool,
    battery_notify: AtomicBool,
}

impl GamepadLink {
    pub const fn new() -> Self {
        Self {
            status: ConnectionStatus::new(),
            commands: Signal::new(),
            connection: Mutex::new(RefCell::new(None)),
            input_notify: AtomicBool::new(false),
            battery_notify: AtomicBool::new(false),
        }
    }

    /// Connection cell to hand to the gamepad.
    pub fn status(&self) -> &ConnectionStatus {
        &self.status
    }

    fn attach(&self, conn: &Connection) {
        self.connection
            .lock(|c| *c.borrow_mut() = Some(conn.clone()));
        self.status.on_connect();
    }

    fn detach(&self) -> Option<Connection> {
        let conn = self.connection.lock(|c| c.borrow_mut().take());
        self.input_notify.store(false, Ordering::Relaxed);
        self.battery_notify.store(false, Ordering::Relaxed);
        self.status.on_disconnect();
        conn
    }

    /// Run `f` against the live connection if `subscribed` is set.
    fn with_subscriber<R>(
        &self,
        subscribed: &AtomicBool,
        f: impl FnOnce(&Connection) -> R,
    ) -> Option<R> {
        if !subscribed.load(Ordering::Relaxed) {
            return None;
        }
        self.connection.lock(|c| c.borrow().as_ref().map(f))
    }
}

impl Default for GamepadLink {
    fn default() -> Self {
        Self::new()
    }
}

/// [`HidTransport`] backed by the SoftDevice GATT server.
pub struct SoftdeviceTransport {
    server: &'static GamepadServer,
    link: &'static GamepadLink,
}

impl SoftdeviceTransport {
    pub fn new(server: &'static GamepadServer, link: &'static GamepadLink) -> Self {
        Self { server, link }
    }
}

impl HidTransport for SoftdeviceTransport {
    fn start(&mut self, profile: &ServiceProfile) -> Result<(), Error> {
        self.link.commands.signal(LinkCommand::Start(profile.clone()));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Error> {
        self.link.commands.signal(LinkCommand::Stop);
        Ok(())
    }

    fn send_input_report(
        &mut self,
        report_id: u8,
        report: &[u8; GAMEPAD_REPORT_SIZE],
    ) -> Result<(), Error> {
        if report_id != config::GAMEPAD_REPORT_ID {
            return Err(TransportError::UnknownReportId(report_id).into());
        }

        let hid = &self.server.hid;
        hid.input_report_set(report)
            .map_err(|_| TransportError::SetValueFailed)?;

        match self
            .link
            .with_subscriber(&self.link.input_notify, |conn| {
                hid.input_report_notify(conn, report)
            }) {
            Some(Err(e)) => {
                warn!("BLE: input report notify failed: {}", e);
                Err(TransportError::NotifyFailed.into())
            }
            _ => Ok(()),
        }
    }

    fn set_battery_level(&mut self, level: u8) -> Result<(), Error> {
        let bas = &self.server.bas;
        bas.battery_level_set(&level)
            .map_err(|_| TransportError::SetValueFailed)?;

        match self
            .link
            .with_subscriber(&self.link.battery_notify, |conn| {
                bas.battery_level_notify(conn, &level)
            }) {
            Some(Err(e)) => {
                warn!("BLE: battery notify failed: {}", e);
                Err(TransportError::NotifyFailed.into())
            }
            _ => Ok(()),
        }
    }
}

/// Link task body. Waits for `Start`, serves hosts until the next
/// command, repeats. A `Start` that overwrites a pending `Stop` restarts
/// the service with the new profile.
pub async fn ble_task(
    sd: &'static Softdevice,
    server: &'static GamepadServer,
    link: &'static GamepadLink,
) -> ! {
    let bonder = bonder::bonder();
    let mut restart: Option<ServiceProfile> = None;

    loop {
        let profile = match restart.take() {
            Some(profile) => profile,
            None => match link.commands.wait().await {
                LinkCommand::Start(profile) => profile,
                LinkCommand::Stop => continue,
            },
        };

        if let Err(e) = apply_profile(server, &profile) {
            error!("BLE: profile setup failed: {}", e);
            continue;
        }
        info!("BLE: service started");

        if let Either::First(LinkCommand::Start(profile)) =
            select(link.commands.wait(), serve(sd, server, link, &profile, bonder)).await
        {
            restart = Some(profile);
        }

        if let Some(conn) = link.detach() {
            if let Err(e) = conn.disconnect() {
                warn!("BLE: disconnect on stop failed: {}", e);
            }
        }
        info!("BLE: service stopped");
    }
}

/// Advertise, serve one host, and re-advertise once it leaves.
async fn serve(
    sd: &'static Softdevice,
    server: &'static GamepadServer,
    link: &'static GamepadLink,
    profile: &ServiceProfile,
    bonder: &'static bonder::Bonder,
) {
    let adv_data = advertising::advertising_data(profile);
    let scan_data = advertising::scan_response_data();
    let adv_config = peripheral::Config {
        interval: config::BLE_ADV_INTERVAL,
        ..Default::default()
    };

    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &adv_data,
            scan_data: &scan_data,
        };

        info!("BLE: advertising as {}", profile.identity.name.as_str());
        let conn = match peripheral::advertise_pairable(sd, adv, &adv_config, bonder).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("BLE: advertising failed: {}", e);
                Timer::after(Duration::from_millis(ADVERTISE_RETRY_MS)).await;
                continue;
            }
        };

        info!("BLE: host connected");
        request_conn_params(&conn);
        link.attach(&conn);

        let reason = gatt_server::run(&conn, server, |event| on_gatt_event(link, event)).await;

        link.detach();
        warn!("BLE: host disconnected: {}", reason);
    }
}

fn on_gatt_event(link: &GamepadLink, event: GamepadServerEvent) {
    match event {
        GamepadServerEvent::Hid(HidServiceEvent::InputReportCccdWrite { notifications }) => {
            info!("BLE: input report notifications: {}", notifications);
            link.input_notify.store(notifications, Ordering::Relaxed);
        }
        GamepadServerEvent::Hid(HidServiceEvent::ControlPointWrite(value)) => {
            info!("BLE: HID control point: {}", value);
        }
        GamepadServerEvent::Bas(BatteryServiceEvent::BatteryLevelCccdWrite { notifications }) => {
            link.battery_notify.store(notifications, Ordering::Relaxed);
        }
        _ => {}
    }
}

/// Push the profile into GAP and the GATT characteristic values.
fn apply_profile(server: &GamepadServer, profile: &ServiceProfile) -> Result<(), TransportError> {
    let name = profile.identity.name.as_bytes();
    let sec_mode = raw::ble_gap_conn_sec_mode_t {
        _bitfield_1: raw::ble_gap_conn_sec_mode_t::new_bitfield_1(1, 1),
    };
    let ret = unsafe { raw::sd_ble_gap_device_name_set(&sec_mode, name.as_ptr(), name.len() as u16) };
    RawError::convert(ret).map_err(|e| TransportError::Raw(e as u32))?;

    let ret = unsafe { raw::sd_ble_gap_appearance_set(profile.appearance) };
    RawError::convert(ret).map_err(|e| TransportError::Raw(e as u32))?;

    let report_map = profile
        .report_map
        .try_into()
        .map_err(|_| TransportError::ServiceSetup)?;
    server
        .hid
        .report_map_set(&report_map)
        .map_err(|_| TransportError::ServiceSetup)?;
    server
        .hid
        .hid_info_set(&profile.hid_info.to_bytes())
        .map_err(|_| TransportError::ServiceSetup)?;

    let mut manufacturer = heapless::Vec::new();
    manufacturer
        .extend_from_slice(profile.identity.manufacturer.as_bytes())
        .map_err(|_| TransportError::ServiceSetup)?;
    server
        .dis
        .manufacturer_name_set(&manufacturer)
        .map_err(|_| TransportError::ServiceSetup)?;
    server
        .dis
        .pnp_id_set(&profile.pnp_id.to_bytes())
        .map_err(|_| TransportError::ServiceSetup)?;

    server
        .bas
        .battery_level_set(&profile.battery_level)
        .map_err(|_| TransportError::ServiceSetup)?;

    Ok(())
}

/// Ask the host for a short connection interval.
fn request_conn_params(conn: &Connection) {
    let Some(handle) = conn.handle() else {
        return;
    };
    let params = raw::ble_gap_conn_params_t {
        min_conn_interval: config::BLE_CONN_INTERVAL_MIN,
        max_conn_interval: config::BLE_CONN_INTERVAL_MAX,
        slave_latency: config::BLE_SLAVE_LATENCY,
        conn_sup_timeout: config::BLE_SUP_TIMEOUT,
    };
    let ret = unsafe { raw::sd_ble_gap_conn_param_update(handle, &params) };
    if let Err(e) = RawError::convert(ret) {
        warn!("BLE: connection parameter update failed: {}", e);
    }
}
