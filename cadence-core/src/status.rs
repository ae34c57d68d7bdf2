//! Status reporting types and formatting
//!
//! Builds the telemetry lines and display values emitted on the 1s and 3s
//! epochs. Everything here is fixed-capacity; a value that does not fit
//! is reported as `fmt::Error` rather than truncated.

use core::fmt::{self, Write};

use heapless::String;

use crate::config::{FIELD_VALUE_LEN, STATUS_LINE_LEN};
use crate::traits::SensorError;

/// One telemetry line
pub type StatusLine = String<STATUS_LINE_LEN>;

/// One display field value
pub type FieldValue = String<FIELD_VALUE_LEN>;

/// Axis index into [`Position::axis`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
    E,
}

/// Machine position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    /// X, Y, Z, E in micrometres
    pub axis: [i32; 4],
    /// Feedrate in mm/min
    pub feedrate: u32,
}

impl Position {
    /// Position of a single axis in micrometres
    pub const fn get(&self, axis: Axis) -> i32 {
        self.axis[axis as usize]
    }
}

/// What the motion subsystem reports once per second
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSnapshot {
    /// Where the machine is now
    pub current: Position,
    /// Endpoint of the move at the queue tail
    pub destination: Position,
    /// Moves waiting in the queue
    pub queue_depth: u8,
    /// Queue capacity
    pub queue_capacity: u8,
}

impl MotionSnapshot {
    /// Check if no moves are queued
    pub const fn queue_empty(&self) -> bool {
        self.queue_depth == 0
    }
}

/// Micrometres, displayed as millimetres with three decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Micrometres(pub i32);

impl fmt::Display for Micrometres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:03}", sign, abs / 1000, abs % 1000)
    }
}

/// Tenths of a degree, displayed with one decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenths(pub i16);

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}

fn position_fields(line: &mut StatusLine, position: &Position) -> fmt::Result {
    for (i, value) in position.axis.iter().enumerate() {
        if i > 0 {
            line.push(',').map_err(|_| fmt::Error)?;
        }
        write!(line, "{}", Micrometres(*value))?;
    }
    write!(line, ",{}", position.feedrate)
}

/// `Pos: x,y,z,e,F`
pub fn position_line(position: &Position) -> Result<StatusLine, fmt::Error> {
    let mut line = StatusLine::new();
    line.push_str("Pos: ").map_err(|_| fmt::Error)?;
    position_fields(&mut line, position)?;
    Ok(line)
}

/// `Dst: x,y,z,e,F`
pub fn destination_line(destination: &Position) -> Result<StatusLine, fmt::Error> {
    let mut line = StatusLine::new();
    line.push_str("Dst: ").map_err(|_| fmt::Error)?;
    position_fields(&mut line, destination)?;
    Ok(line)
}

/// `Queue: depth/capacity`
pub fn queue_line(snapshot: &MotionSnapshot) -> Result<StatusLine, fmt::Error> {
    let mut line = StatusLine::new();
    write!(line, "Queue: {}/{}", snapshot.queue_depth, snapshot.queue_capacity)?;
    Ok(line)
}

/// Axis position display value (`12.500`)
pub fn axis_value(micrometres: i32) -> Result<FieldValue, fmt::Error> {
    let mut value = FieldValue::new();
    write!(value, "{}", Micrometres(micrometres))?;
    Ok(value)
}

/// Temperature display value (`45.5`, or `ERR` on a sensor fault)
pub fn temperature_value(reading: Result<i16, SensorError>) -> Result<FieldValue, fmt::Error> {
    let mut value = FieldValue::new();
    match reading {
        Ok(x10) => write!(value, "{}", Tenths(x10))?,
        Err(_) => value.push_str("ERR").map_err(|_| fmt::Error)?,
    }
    Ok(value)
}
