//! NTC 100K thermistor sensor
//!
//! Common thermistor used on hot ends and heated beds. Uses a lookup table
//! for integer-only temperature calculation.

use cadence_core::traits::{HeaterChannel, SensorError};

/// NTC 100K thermistor temperature lookup table
///
/// Table format: (resistance_ohms, temperature_x10)
/// Generated using beta equation with:
/// - R0 = 100,000 ohms at T0 = 25°C
/// - Beta = 3950K
///
/// Temperature range: 0°C to 300°C
const TEMP_TABLE: &[(u32, i16)] = &[
    (327_000, 0),    // 0°C
    (100_000, 250),  // 25°C (R0)
    (53_000, 400),   // 40°C
    (31_000, 500),   // 50°C
    (19_000, 600),   // 60°C
    (7_800, 800),    // 80°C
    (3_500, 1000),   // 100°C
    (1_700, 1200),   // 120°C
    (890, 1400),     // 140°C
    (490, 1600),     // 160°C
    (280, 1800),     // 180°C
    (170, 2000),     // 200°C
    (105, 2200),     // 220°C
    (67, 2400),      // 240°C
    (44, 2600),      // 260°C
    (30, 2800),      // 280°C
    (21, 3000),      // 300°C
];

/// ADC access for platform abstraction
///
/// One converter usually serves every channel, so the channel is an
/// argument rather than part of the reader.
pub trait AdcReader {
    /// Read the raw ADC value (12-bit, 0-4095) of a channel
    fn read(&mut self, channel: HeaterChannel) -> Result<u16, SensorError>;
}

/// NTC 100K thermistor with B=3950 behind a pull-up divider
///
/// Uses lookup table with linear interpolation for temperature calculation.
#[derive(Debug, Clone, Copy)]
pub struct Ntc100kSensor {
    /// Pull-up resistor value in ohms
    pullup_ohms: u32,
    /// ADC resolution (typically 4096 for 12-bit)
    adc_max: u16,
}

impl Ntc100kSensor {
    /// Create a new NTC sensor curve
    ///
    /// # Arguments
    /// - `pullup_ohms`: Pull-up resistor value (typically 4700 for 3.3V systems)
    pub const fn new(pullup_ohms: u32) -> Self {
        Self {
            pullup_ohms,
            adc_max: 4096, // 12-bit ADC
        }
    }

    /// Convert ADC reading to resistance
    ///
    /// Circuit: VCC -- pullup -- ADC_PIN -- NTC -- GND
    /// R_ntc = R_pullup * adc_value / (adc_max - adc_value)
    pub fn adc_to_resistance(&self, adc_value: u16) -> Result<u32, SensorError> {
        // Check for open circuit (ADC at max)
        if adc_value >= self.adc_max - 10 {
            return Err(SensorError::OpenCircuit);
        }

        // Check for short circuit (ADC at zero)
        if adc_value < 10 {
            return Err(SensorError::ShortCircuit);
        }

        let numerator = self.pullup_ohms as u64 * adc_value as u64;
        let denominator = (self.adc_max - adc_value) as u64;

        Ok((numerator / denominator) as u32)
    }

    /// Calculate temperature from resistance using lookup table
    ///
    /// Returns temperature in 0.1°C units (e.g., 250 = 25.0°C).
    /// Uses linear interpolation between table entries.
    pub fn resistance_to_temp_x10(resistance: u32) -> Result<i16, SensorError> {
        let first = TEMP_TABLE[0].0;
        let last = TEMP_TABLE[TEMP_TABLE.len() - 1].0;
        if resistance > first || resistance < last {
            return Err(SensorError::OutOfRange);
        }

        // Table is sorted by decreasing resistance (increasing temperature)
        TEMP_TABLE
            .windows(2)
            .find(|w| resistance <= w[0].0 && resistance >= w[1].0)
            .map(|w| {
                let (r_high, t_low) = w[0];
                let (r_low, t_high) = w[1];
                let r_range = (r_high - r_low) as i32;
                let t_range = (t_high - t_low) as i32;
                let r_offset = (r_high - resistance) as i32;
                t_low + (t_range * r_offset / r_range) as i16
            })
            .ok_or(SensorError::OutOfRange)
    }

    /// Convert a raw ADC value straight to 0.1°C
    pub fn convert(&self, adc_value: u16) -> Result<i16, SensorError> {
        self.adc_to_resistance(adc_value)
            .and_then(Self::resistance_to_temp_x10)
    }
}
