//! Placeholder for capabilities not built into this firmware

use super::display::{DisplayError, DisplayField, StatusDisplay};
use super::telemetry::{MotionStatus, Telemetry, TelemetryError};
use super::watchdog::CommsLink;
use crate::status::MotionSnapshot;

/// A capability that is not fitted
///
/// Implements every optional collaborator trait with `ENABLED = false`, so
/// the dispatcher's guarded branches fold away at compile time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Absent;

impl StatusDisplay for Absent {
    const ENABLED: bool = false;

    fn render(&mut self, _field: DisplayField, _value: &str) -> Result<(), DisplayError> {
        Ok(())
    }
}

impl Telemetry for Absent {
    const ENABLED: bool = false;

    fn emit(&mut self, _line: &str) -> Result<(), TelemetryError> {
        Ok(())
    }
}

impl CommsLink for Absent {
    const ENABLED: bool = false;

    fn start_send(&mut self) {}
}

impl MotionStatus for Absent {
    const ENABLED: bool = false;

    fn snapshot(&mut self) -> Option<MotionSnapshot> {
        None
    }
}
