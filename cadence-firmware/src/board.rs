//! Board adapters
//!
//! Glue between embassy-rp peripherals and the cadence-core collaborator
//! traits. Pin assignments are board-specific (SKR Pico).

use core::cell::Cell;

use cadence_core::status::MotionSnapshot;
use cadence_core::traits::{HeaterChannel, MotionStatus, SensorError, Watchdog};
use cadence_drivers::sensor::AdcReader;
use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Hardware watchdog, fed on every 10ms epoch
pub struct BoardWatchdog(pub embassy_rp::watchdog::Watchdog);

impl Watchdog for BoardWatchdog {
    fn service(&mut self) {
        self.0.feed();
    }
}

/// RP2040 ADC with one input per heater channel
pub struct BoardAdc {
    adc: Adc<'static, Blocking>,
    inputs: [Option<Channel<'static>>; 2],
}

impl BoardAdc {
    /// Wrap the ADC and the thermistor inputs (TH0 extruder, TH1 bed)
    pub fn new(
        adc: Adc<'static, Blocking>,
        extruder: Channel<'static>,
        bed: Option<Channel<'static>>,
    ) -> Self {
        Self {
            adc,
            inputs: [Some(extruder), bed],
        }
    }
}

impl AdcReader for BoardAdc {
    fn read(&mut self, channel: HeaterChannel) -> Result<u16, SensorError> {
        let input = self.inputs[channel.index()]
            .as_mut()
            .ok_or(SensorError::ConversionError)?;
        self.adc
            .blocking_read(input)
            .map_err(|_| SensorError::ConversionError)
    }
}

/// Latest motion state, published by whatever runs the move queue
static MOTION: Mutex<CriticalSectionRawMutex, Cell<Option<MotionSnapshot>>> =
    Mutex::new(Cell::new(None));

/// Publish the current motion state for reporting
pub fn publish_motion(snapshot: MotionSnapshot) {
    MOTION.lock(|motion| motion.set(Some(snapshot)));
}

/// Motion status read from the shared snapshot
pub struct SharedMotion;

impl MotionStatus for SharedMotion {
    fn snapshot(&mut self) -> Option<MotionSnapshot> {
        MOTION.lock(|motion| motion.get())
    }
}
