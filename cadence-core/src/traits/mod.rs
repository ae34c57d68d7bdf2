//! Collaborator traits
//!
//! These traits define the interface between the dispatcher and the
//! subsystems it services on each epoch. Required collaborators (watchdog,
//! sampler, heaters, power) are always present; optional ones carry an
//! `ENABLED` constant and can be replaced by [`Absent`].

pub mod absent;
pub mod display;
pub mod heater;
pub mod telemetry;
pub mod watchdog;

pub use absent::Absent;
pub use display::{DisplayError, DisplayField, StatusDisplay};
pub use heater::{HeaterBank, HeaterChannel, PowerControl, SensorError, TemperatureSampler};
pub use telemetry::{MotionStatus, Telemetry, TelemetryError};
pub use watchdog::{CommsLink, Watchdog};
