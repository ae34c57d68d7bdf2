//! Temperature sensors

pub mod bank;
pub mod ntc100k;

pub use bank::ThermistorBank;
pub use ntc100k::{AdcReader, Ntc100kSensor};
