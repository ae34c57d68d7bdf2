//! Serial status telemetry
//!
//! Writes status lines to a UART (or any byte sink), one per line.

use cadence_core::traits::{Telemetry, TelemetryError};
use embedded_io::Write;

/// Line-oriented telemetry over a byte sink
pub struct SerialTelemetry<W> {
    tx: W,
}

impl<W: Write> SerialTelemetry<W> {
    /// Wrap a transmitter
    pub fn new(tx: W) -> Self {
        Self { tx }
    }

    /// Release the transmitter
    pub fn release(self) -> W {
        self.tx
    }
}

impl<W: Write> Telemetry for SerialTelemetry<W> {
    fn emit(&mut self, line: &str) -> Result<(), TelemetryError> {
        self.tx
            .write_all(line.as_bytes())
            .and_then(|()| self.tx.write_all(b"\n"))
            .map_err(|_| TelemetryError::Write)
    }
}
