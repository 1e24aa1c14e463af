//! BLE gamepad demo firmware for the nRF52840-DK.
//!
//! Advertises as a HID gamepad; the four DK buttons map to gamepad
//! buttons 1-4 and the X/Y axes sweep while a host is connected.

#![no_std]
#![no_main]

use core::mem;

use ble_gamepad::ble::peripheral::{self, GamepadLink, SoftdeviceTransport};
use ble_gamepad::ble::server::GamepadServer;
use ble_gamepad::hid::{report_protocol, GAMEPAD_REPORT_DESCRIPTOR};
use ble_gamepad::{config, Axes, BleGamepad, DeviceIdentity, Hat};
use defmt::{error, info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::{interrupt, Peripherals};
use embassy_time::{Duration, Ticker};
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

/// Axis step per sweep tick.
const SWEEP_STEP: i8 = 4;

fn embassy_init() -> Peripherals {
    let mut config = embassy_nrf::config::Config::default();

    // The SoftDevice owns priorities 0, 1 and 4.
    config.gpiote_interrupt_priority = interrupt::Priority::P2;
    config.time_interrupt_priority = interrupt::Priority::P2;

    embassy_nrf::init(config)
}

fn softdevice_init() -> &'static mut Softdevice {
    info!("initializing softdevice...");

    let name = config::DEFAULT_DEVICE_NAME;
    let sd_config = nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: name.as_ptr() as _,
            current_len: name.len() as u16,
            max_len: config::MAX_DEVICE_NAME_LEN as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    };

    Softdevice::enable(&sd_config)
}

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn ble_task(
    sd: &'static Softdevice,
    server: &'static GamepadServer,
    link: &'static GamepadLink,
) -> ! {
    peripheral::ble_task(sd, server, link).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_init();

    info!("BLE gamepad demo starting");

    match report_protocol::parse(GAMEPAD_REPORT_DESCRIPTOR) {
        Some(map) => info!(
            "report map: {} buttons, {} axes, {} hats, {} byte input report",
            map.buttons,
            map.axes,
            map.hats,
            map.input_report_len()
        ),
        None => error!("report map is malformed"),
    }

    static LINK: GamepadLink = GamepadLink::new();
    static SERVER: StaticCell<GamepadServer> = StaticCell::new();

    let sd = softdevice_init();
    let server: &'static GamepadServer = SERVER.init(unwrap!(GamepadServer::new(sd)));
    let sd: &'static Softdevice = sd;

    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(ble_task(sd, server, &LINK)));

    let inputs = [
        Input::new(p.P0_11, Pull::Up),
        Input::new(p.P0_12, Pull::Up),
        Input::new(p.P0_24, Pull::Up),
        Input::new(p.P0_25, Pull::Up),
    ];

    let mut gamepad = BleGamepad::new(
        DeviceIdentity::default(),
        config::DEFAULT_BATTERY_LEVEL,
        LINK.status(),
        SoftdeviceTransport::new(server, &LINK),
    );
    if let Err(e) = gamepad.begin() {
        error!("gamepad start failed: {}", e);
    }

    let mut ticker = Ticker::every(Duration::from_millis(config::DEMO_POLL_MS));
    let mut tick: u32 = 0;
    let mut sweep: i8 = 0;
    let mut step = SWEEP_STEP;

    loop {
        ticker.next().await;

        for (index, input) in inputs.iter().enumerate() {
            let button = index as u8 + 1;
            let result = if input.is_low() {
                gamepad.press(button)
            } else {
                gamepad.release(button)
            };
            if let Err(e) = result {
                warn!("button {} update failed: {}", button, e);
            }
        }

        tick = tick.wrapping_add(1);
        if tick % config::DEMO_AXIS_EVERY_TICKS != 0 || !gamepad.is_connected() {
            continue;
        }

        sweep = sweep.saturating_add(step).clamp(-127, 127);
        if sweep >= 127 || sweep <= -127 {
            step = -step;
        }

        // Hat follows button 1.
        let hat = if gamepad.is_pressed(1) {
            Hat::Up
        } else {
            Hat::Centered
        };
        let axes = Axes::new(sweep, -sweep, [0; 8]);
        if let Err(e) = gamepad.set_axes(&axes, Hat::pack(hat, Hat::Centered)) {
            warn!("axis update failed: {}", e);
        }
    }
}
