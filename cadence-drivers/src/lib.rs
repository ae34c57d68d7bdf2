//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in cadence-core:
//!
//! - Temperature sensing (NTC 100K thermistor bank)
//! - Heater targets and PSU switching
//! - Character LCD status display (HD44780 behind a PCF8574)
//! - Serial status telemetry
//! - Inter-board link

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod heater;
pub mod intercom;
pub mod sensor;
pub mod telemetry;
