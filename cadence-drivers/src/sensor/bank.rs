//! Thermistor bank
//!
//! Samples the fitted heater thermistors, one channel per 10ms step, and
//! keeps the last result of each. Sampling never blocks beyond a single
//! ADC conversion.

use cadence_core::traits::{HeaterChannel, SensorError, TemperatureSampler};

use super::ntc100k::{AdcReader, Ntc100kSensor};

/// Thermistors on every fitted heater channel
pub struct ThermistorBank<A> {
    adc: A,
    curve: Ntc100kSensor,
    fitted: [bool; 2],
    readings: [Result<i16, SensorError>; 2],
    next: usize,
}

impl<A: AdcReader> ThermistorBank<A> {
    /// Create a bank and take an initial reading of every fitted channel
    pub fn new(adc: A, curve: Ntc100kSensor, fitted: &[HeaterChannel]) -> Self {
        let mut bank = Self {
            adc,
            curve,
            fitted: [false; 2],
            readings: [Err(SensorError::ConversionError); 2],
            next: 0,
        };
        for channel in fitted {
            bank.fitted[channel.index()] = true;
        }
        for channel in HeaterChannel::ALL {
            if bank.fitted[channel.index()] {
                bank.read(channel);
            }
        }
        bank
    }

    fn read(&mut self, channel: HeaterChannel) {
        let curve = self.curve;
        self.readings[channel.index()] = self
            .adc
            .read(channel)
            .and_then(|raw| curve.convert(raw));
    }
}

impl<A: AdcReader> TemperatureSampler for ThermistorBank<A> {
    fn sample(&mut self) {
        // Round-robin over fitted channels
        for _ in 0..HeaterChannel::ALL.len() {
            let channel = HeaterChannel::ALL[self.next];
            self.next = (self.next + 1) % HeaterChannel::ALL.len();
            if self.fitted[channel.index()] {
                self.read(channel);
                return;
            }
        }
    }

    fn readout(&self, channel: HeaterChannel) -> Option<Result<i16, SensorError>> {
        self.fitted[channel.index()].then_some(self.readings[channel.index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ADC returning a fixed value per channel, counting reads
    struct FixedAdc {
        values: [Result<u16, SensorError>; 2],
        reads: [u32; 2],
    }

    impl AdcReader for FixedAdc {
        fn read(&mut self, channel: HeaterChannel) -> Result<u16, SensorError> {
            self.reads[channel.index()] += 1;
            self.values[channel.index()]
        }
    }

    fn adc(extruder: u16, bed: u16) -> FixedAdc {
        FixedAdc {
            values: [Ok(extruder), Ok(bed)],
            reads: [0; 2],
        }
    }

    fn bank(adc: FixedAdc, fitted: &[HeaterChannel]) -> ThermistorBank<FixedAdc> {
        ThermistorBank::new(adc, Ntc100kSensor::new(4700), fitted)
    }

    #[test]
    fn test_unfitted_channel_has_no_readout() {
        let bank = bank(adc(3912, 3912), &[HeaterChannel::Extruder]);

        assert!(bank.readout(HeaterChannel::Extruder).is_some());
        assert_eq!(bank.readout(HeaterChannel::Bed), None);
    }

    #[test]
    fn test_initial_reading_taken() {
        let bank = bank(adc(2048, 3912), &HeaterChannel::ALL);

        assert!(matches!(bank.readout(HeaterChannel::Bed), Some(Ok(_))));
        assert_eq!(bank.adc.reads, [1, 1]);
    }

    #[test]
    fn test_round_robin_sampling() {
        let mut bank = bank(adc(2048, 3912), &HeaterChannel::ALL);

        for _ in 0..10 {
            bank.sample();
        }
        assert_eq!(bank.adc.reads, [6, 6]);
    }

    #[test]
    fn test_single_channel_sampled_every_step() {
        let mut bank = bank(adc(2048, 0), &[HeaterChannel::Bed]);

        for _ in 0..4 {
            bank.sample();
        }
        assert_eq!(bank.adc.reads, [0, 5]);
    }

    #[test]
    fn test_sensor_fault_reported() {
        let mut bank = bank(adc(4095, 0), &HeaterChannel::ALL);
        bank.sample();

        assert_eq!(
            bank.readout(HeaterChannel::Extruder),
            Some(Err(SensorError::OpenCircuit))
        );
        assert_eq!(
            bank.readout(HeaterChannel::Bed),
            Some(Err(SensorError::ShortCircuit))
        );

        bank.adc.values[1] = Err(SensorError::ConversionError);
        bank.sample();
        assert_eq!(
            bank.readout(HeaterChannel::Bed),
            Some(Err(SensorError::ConversionError))
        );
    }
}
