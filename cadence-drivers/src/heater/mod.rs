//! Heater targets and power supply control

pub mod psu;
pub mod targets;

pub use psu::PsuSwitch;
pub use targets::TargetBank;
