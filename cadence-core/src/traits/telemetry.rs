//! Telemetry output and motion status traits

use crate::status::MotionSnapshot;

/// Errors that can occur writing telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryError {
    /// Serial write failed
    Write,
    /// Line did not fit the output buffer
    Overflow,
}

/// Serial status output
pub trait Telemetry {
    /// Whether debug status output is compiled in
    const ENABLED: bool = true;

    /// Write one status line (without trailing newline)
    fn emit(&mut self, line: &str) -> Result<(), TelemetryError>;
}

/// Motion queue status, for reporting only
pub trait MotionStatus {
    /// Whether a motion subsystem is present
    const ENABLED: bool = true;

    /// Current position, queue tail destination and queue depth
    ///
    /// Takes `&mut self` because refreshing the current position may need
    /// to sample the step counters.
    fn snapshot(&mut self) -> Option<MotionSnapshot>;
}
