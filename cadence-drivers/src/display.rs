//! HD44780 character LCD driver
//!
//! Driver for 20x4 HD44780 displays behind a PCF8574 I2C backpack, used in
//! 4-bit mode. Each status field owns a fixed label and value position.
//!
//! Expander pin mapping: P0=RS, P1=RW, P2=E, P3=backlight, P4-P7=D4-D7.

use cadence_core::traits::{DisplayError, DisplayField, StatusDisplay};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Default PCF8574 address (0x27, or 0x3F on PCF8574A boards)
pub const DEFAULT_ADDR: u8 = 0x27;

/// Characters reserved for an axis value (columns 1-8)
pub const AXIS_WIDTH: usize = 8;

/// Characters reserved for a temperature value (columns 13-19)
pub const TEMPERATURE_WIDTH: usize = 7;

/// HD44780 commands
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const ENTRY_MODE_INC: u8 = 0x06;
    pub const DISPLAY_ON: u8 = 0x0C;
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    pub const SET_DDRAM: u8 = 0x80;
}

/// PCF8574 expander bits
mod pin {
    pub const RS: u8 = 0x01;
    pub const E: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// Where a field is drawn
#[derive(Debug, Clone, Copy)]
struct Slot {
    /// DDRAM address of the label
    label: u8,
    /// DDRAM address of the value
    value: u8,
    /// Characters reserved for the value
    width: usize,
}

const fn layout(field: DisplayField) -> Slot {
    let (label, value, width) = match field {
        DisplayField::AxisX => (0x00, 0x01, AXIS_WIDTH),
        DisplayField::AxisY => (0x40, 0x41, AXIS_WIDTH),
        DisplayField::AxisZ => (0x14, 0x15, AXIS_WIDTH),
        DisplayField::Extruder => (0x09, 0x0D, TEMPERATURE_WIDTH),
        DisplayField::Bed => (0x49, 0x4D, TEMPERATURE_WIDTH),
    };
    Slot {
        label,
        value,
        width,
    }
}

/// HD44780 LCD behind a PCF8574
pub struct Hd44780<I> {
    i2c: I,
    address: u8,
    backlight: u8,
}

impl<I: I2c> Hd44780<I> {
    /// Create a driver at the default expander address
    pub fn new(i2c: I) -> Self {
        Self::with_address(i2c, DEFAULT_ADDR)
    }

    /// Create a driver at a specific expander address
    pub fn with_address(i2c: I, address: u8) -> Self {
        Self {
            i2c,
            address,
            backlight: pin::BACKLIGHT,
        }
    }

    /// Initialize the controller into 4-bit, 2-line mode and clear it
    ///
    /// Blocks for a few milliseconds; call once before the main loop.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        delay.delay_ms(50);

        // Reset by instruction: three 8-bit function sets, then 4-bit
        for wait_us in [4500, 150, 150] {
            self.nibble(0x03, 0)?;
            delay.delay_us(wait_us);
        }
        self.nibble(0x02, 0)?;
        delay.delay_us(150);

        self.command(cmd::FUNCTION_4BIT_2LINE)?;
        self.command(cmd::DISPLAY_ON)?;
        self.command(cmd::ENTRY_MODE_INC)?;
        self.command(cmd::CLEAR)?;
        delay.delay_ms(2);

        for field in [
            DisplayField::AxisX,
            DisplayField::AxisY,
            DisplayField::AxisZ,
            DisplayField::Extruder,
            DisplayField::Bed,
        ] {
            self.write_at(layout(field).label, field.label())?;
        }
        Ok(())
    }

    fn command(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.send(byte, 0)
    }

    fn write_at(&mut self, address: u8, text: &str) -> Result<(), DisplayError> {
        self.command(cmd::SET_DDRAM | address)?;
        for byte in text.bytes() {
            self.send(byte, pin::RS)?;
        }
        Ok(())
    }

    /// Send a full byte as two nibbles, high first
    fn send(&mut self, byte: u8, rs: u8) -> Result<(), DisplayError> {
        let high = (byte & 0xF0) | self.backlight | rs;
        let low = (byte << 4) | self.backlight | rs;
        self.expander(&[high | pin::E, high, low | pin::E, low])
    }

    fn nibble(&mut self, nibble: u8, rs: u8) -> Result<(), DisplayError> {
        let bits = (nibble << 4) | self.backlight | rs;
        self.expander(&[bits | pin::E, bits])
    }

    fn expander(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, bytes)
            .map_err(|_| DisplayError::Bus)
    }
}

impl<I: I2c> StatusDisplay for Hd44780<I> {
    fn render(&mut self, field: DisplayField, value: &str) -> Result<(), DisplayError> {
        let slot = layout(field);
        if value.len() > slot.width || !value.is_ascii() {
            return Err(DisplayError::Overflow);
        }

        self.write_at(slot.label, field.label())?;

        // Blank the whole field so shorter values leave no residue
        self.write_at(slot.value, value)?;
        for _ in value.len()..slot.width {
            self.send(b' ', pin::RS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use heapless::Vec;

    /// Records every byte written to the expander
    struct MockBus {
        bytes: Vec<u8, 1024>,
        fail: bool,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                bytes: Vec::new(),
                fail: false,
            }
        }

        /// Decode latched nibbles back into (rs, byte) pairs
        ///
        /// Only valid for traffic after `init`, where every transfer is a
        /// full byte.
        fn decode(&self) -> Vec<(bool, u8), 128> {
            let mut out = Vec::new();
            let mut strobes = self.bytes.iter().filter(|b| *b & pin::E != 0);
            while let (Some(high), Some(low)) = (strobes.next(), strobes.next()) {
                let byte = (high & 0xF0) | (low >> 4);
                out.push((high & pin::RS != 0, byte)).unwrap();
            }
            out
        }
    }

    impl ErrorType for MockBus {
        type Error = ErrorKind;
    }

    impl I2c for MockBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), ErrorKind> {
            assert_eq!(address, DEFAULT_ADDR);
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.bytes.extend_from_slice(bytes).unwrap();
                }
            }
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn ready() -> Hd44780<MockBus> {
        let mut lcd = Hd44780::new(MockBus::new());
        lcd.init(&mut NoDelay).unwrap();
        lcd.i2c.bytes.clear();
        lcd
    }

    /// Characters written after a DDRAM address command
    fn text_at(decoded: &[(bool, u8)], address: u8) -> Vec<u8, 32> {
        let start = decoded
            .iter()
            .position(|&(rs, b)| !rs && b == cmd::SET_DDRAM | address)
            .unwrap();
        decoded[start + 1..]
            .iter()
            .take_while(|(rs, _)| *rs)
            .map(|&(_, b)| b)
            .collect()
    }

    #[test]
    fn test_init_sequence() {
        let mut lcd = Hd44780::new(MockBus::new());
        lcd.init(&mut NoDelay).unwrap();

        let strobes: Vec<u8, 512> = lcd
            .i2c
            .bytes
            .iter()
            .filter(|b| *b & pin::E != 0)
            .map(|b| b >> 4)
            .collect();
        // Three 8-bit resets, switch to 4-bit, then function set 0x28
        assert_eq!(&strobes[..6], &[0x3, 0x3, 0x3, 0x2, 0x2, 0x8]);
    }

    #[test]
    fn test_render_writes_label_and_padded_value() {
        let mut lcd = ready();
        lcd.render(DisplayField::Extruder, "210.5").unwrap();

        let decoded = lcd.i2c.decode();
        assert_eq!(text_at(&decoded, 0x09).as_slice(), b"Ext:");
        assert_eq!(text_at(&decoded, 0x0D).as_slice(), b"210.5  ");
    }

    #[test]
    fn test_axis_positions() {
        let mut lcd = ready();
        lcd.render(DisplayField::AxisZ, "0.300").unwrap();

        let decoded = lcd.i2c.decode();
        assert_eq!(text_at(&decoded, 0x14).as_slice(), b"Z");
        assert_eq!(text_at(&decoded, 0x15).as_slice(), b"0.300   ");
    }

    #[test]
    fn test_axis_field_fits_eight_characters() {
        let mut lcd = ready();
        lcd.render(DisplayField::AxisY, "-100.000").unwrap();

        let decoded = lcd.i2c.decode();
        assert_eq!(text_at(&decoded, 0x41).as_slice(), b"-100.000");
    }

    #[test]
    fn test_backlight_kept_on_every_byte() {
        let mut lcd = ready();
        lcd.render(DisplayField::Bed, "60.0").unwrap();
        assert!(lcd.i2c.bytes.iter().all(|b| b & pin::BACKLIGHT != 0));
    }

    #[test]
    fn test_value_too_wide() {
        let mut lcd = ready();
        assert_eq!(
            lcd.render(DisplayField::AxisX, "-1234.567"),
            Err(DisplayError::Overflow)
        );
        assert_eq!(
            lcd.render(DisplayField::Extruder, "1234.567"),
            Err(DisplayError::Overflow)
        );
        assert!(lcd.i2c.bytes.is_empty());
    }

    #[test]
    fn test_bus_error() {
        let mut lcd = ready();
        lcd.i2c.fail = true;
        assert_eq!(
            lcd.render(DisplayField::AxisY, "1.000"),
            Err(DisplayError::Bus)
        );
    }
}
