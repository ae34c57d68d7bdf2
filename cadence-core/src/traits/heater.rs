//! Heater, temperature sensor and power supply traits

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor disconnected (open circuit)
    OpenCircuit,
    /// Sensor shorted to ground
    ShortCircuit,
    /// Reading out of expected range
    OutOfRange,
    /// ADC conversion error
    ConversionError,
}

/// Heater channels the controller may fit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaterChannel {
    /// Hot end
    Extruder,
    /// Heated bed
    Bed,
}

impl HeaterChannel {
    /// All channels, in display order
    pub const ALL: [HeaterChannel; 2] = [HeaterChannel::Extruder, HeaterChannel::Bed];

    /// Position of this channel in [`HeaterChannel::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Temperature sampling subsystem
///
/// Implementations handle the specific sensor type (NTC thermistor,
/// thermocouple, ...) and keep the last reading of each channel.
pub trait TemperatureSampler {
    /// Advance sensor sampling by one step
    ///
    /// Called once per 10ms epoch. Must not block.
    fn sample(&mut self);

    /// Last reading of a channel in 0.1°C units (455 = 45.5°C)
    ///
    /// `None` if the channel is not fitted.
    fn readout(&self, channel: HeaterChannel) -> Option<Result<i16, SensorError>>;
}

/// Heater target temperatures
pub trait HeaterBank {
    /// Check whether every heater has a zero target
    ///
    /// Queried once per 250ms epoch by the idle power-down logic.
    fn all_targets_zero(&self) -> bool;
}

/// Main power supply control
pub trait PowerControl {
    /// Switch the supply off
    ///
    /// Must be idempotent: calling it while already off is harmless. The
    /// device may be cutting its own supply.
    fn power_off(&mut self);
}

impl<T: HeaterBank + ?Sized> HeaterBank for &T {
    fn all_targets_zero(&self) -> bool {
        (**self).all_targets_zero()
    }
}
