//! Cadence - Periodic Maintenance Scheduler Firmware
//!
//! Main firmware binary for RP2040-based heater/motion controllers.
//! SysTick folds the hardware tick into 10ms, 250ms, 1s and 3s epochs;
//! the main task runs whatever epoch work is due and yields in between.

#![no_std]
#![no_main]

use cadence_core::status::MotionSnapshot;
use cadence_core::traits::HeaterChannel;
use cadence_core::{Dispatcher, PollReport};
use cadence_drivers::heater::{PsuSwitch, TargetBank};
use cadence_drivers::sensor::{Ntc100kSensor, ThermistorBank};
use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::watchdog::Watchdog;
use embassy_time::Duration;
use {defmt_rtt as _, panic_probe as _};

#[cfg(any(feature = "debug-position", feature = "intercom"))]
use embassy_rp::uart::{Config as UartConfig, UartTx};

mod board;
mod tick;

#[allow(dead_code)]
mod board_config {
    include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
}

use board_config::{BED_FITTED, PSU_ACTIVE_LOW, WATCHDOG_TIMEOUT_MS};

/// Heater targets, written by the command interface
static TARGETS: TargetBank = TargetBank::new();

/// Thermistor pull-up on the SKR Pico
const THERMISTOR_PULLUP_OHMS: u32 = 4700;

/// Move queue depth reported before the planner publishes anything
const MOVE_QUEUE_CAPACITY: u8 = 8;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Cadence firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let cp = unwrap!(cortex_m::Peripherals::take());
    info!("Peripherals initialized");

    let mut watchdog = Watchdog::new(p.WATCHDOG);
    watchdog.start(Duration::from_millis(WATCHDOG_TIMEOUT_MS));
    info!("Watchdog started: {} ms", WATCHDOG_TIMEOUT_MS);

    // Thermistors: TH0 (GPIO27) extruder, TH1 (GPIO26) bed
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let extruder = Channel::new_pin(p.PIN_27, Pull::None);
    let bed = BED_FITTED.then(|| Channel::new_pin(p.PIN_26, Pull::None));
    let fitted: &[HeaterChannel] = if BED_FITTED {
        &HeaterChannel::ALL
    } else {
        &[HeaterChannel::Extruder]
    };
    let sampler = ThermistorBank::new(
        board::BoardAdc::new(adc, extruder, bed),
        Ntc100kSensor::new(THERMISTOR_PULLUP_OHMS),
        fitted,
    );
    info!("Thermistors initialized (bed fitted: {})", BED_FITTED);

    // PSU enable on GPIO22
    let psu_pin = Output::new(p.PIN_22, Level::from(!PSU_ACTIVE_LOW));
    let psu = PsuSwitch::new(psu_pin, PSU_ACTIVE_LOW);
    if psu.faulted() {
        warn!("PSU enable pin write failed");
    }

    board::publish_motion(MotionSnapshot {
        queue_capacity: MOVE_QUEUE_CAPACITY,
        ..Default::default()
    });

    let dispatcher = Dispatcher::new(
        &tick::CLOCK,
        board::BoardWatchdog(watchdog),
        sampler,
        &TARGETS,
        psu,
    )
    .with_motion(board::SharedMotion);

    // HD44780 behind a PCF8574 on I2C0 (GPIO5 SCL, GPIO4 SDA)
    #[cfg(feature = "display")]
    let dispatcher = {
        use cadence_drivers::display::Hd44780;
        use embassy_rp::i2c::{Config as I2cConfig, I2c};

        let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, I2cConfig::default());
        let mut lcd = Hd44780::new(i2c);
        match lcd.init(&mut embassy_time::Delay) {
            Ok(()) => info!("Display initialized"),
            Err(e) => warn!("Display init failed: {:?}", e),
        }
        dispatcher.with_display(lcd)
    };

    // Status telemetry on UART0 TX (GPIO0)
    #[cfg(feature = "debug-position")]
    let dispatcher = {
        use cadence_drivers::telemetry::SerialTelemetry;

        let baudrate = board_config::TELEMETRY_BAUDRATE;
        let tx = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config(baudrate));
        info!("Telemetry on UART0 at {} baud", baudrate);
        dispatcher.with_telemetry(SerialTelemetry::new(tx))
    };

    // Inter-board link on UART1 TX (GPIO8)
    #[cfg(feature = "intercom")]
    let dispatcher = {
        use cadence_drivers::intercom::IntercomLink;

        let baudrate = board_config::INTERCOM_BAUDRATE;
        let tx = UartTx::new_blocking(p.UART1, p.PIN_8, uart_config(baudrate));
        info!("Intercom on UART1 at {} baud", baudrate);
        dispatcher.with_link(IntercomLink::new(tx, &TARGETS))
    };

    tick::start(cp.SYST);
    info!("Dispatcher running");

    let mut dispatcher = dispatcher;
    loop {
        let report = dispatcher.poll();
        log_report(&report);
        embassy_futures::yield_now().await;
    }
}

#[cfg(any(feature = "debug-position", feature = "intercom"))]
fn uart_config(baudrate: u32) -> UartConfig {
    let mut cfg = UartConfig::default();
    cfg.baudrate = baudrate;
    cfg
}

/// Log what a poll did
fn log_report(report: &PollReport) {
    if report.is_empty() {
        return;
    }
    trace!("Epochs: {}", report.epochs);

    if report.powered_off {
        warn!("All heaters idle for {} s, PSU off", cadence_core::config::IDLE_TIMEOUT_S);
    }
    if let Some(e) = report.display_error {
        warn!("Display: {} writes failed, last {:?}", report.display_faults, e);
    }
    if let Some(e) = report.telemetry_error {
        warn!("Telemetry: {} lines failed, last {:?}", report.telemetry_faults, e);
    }
}
