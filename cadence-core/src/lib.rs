//! Board-agnostic core logic for the Cadence maintenance scheduler
//!
//! This crate contains the two halves of the periodic scheduler, neither
//! of which depends on specific hardware:
//!
//! - Tick accumulator: folds hardware ticks into 10ms/250ms/1s/3s epochs
//!   (runs in the timer interrupt)
//! - Epoch dispatcher: consumes epoch boundaries and runs the maintenance
//!   actions for each tier (runs in the main loop)
//! - Collaborator traits (watchdog, sensors, heaters, display, telemetry)
//! - Status line and display value formatting
//! - Compile-time configuration constants

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod dispatch;
pub mod status;
pub mod traits;

pub use clock::{Cascade, Clock, Epoch, EpochFlags, EpochSet, TickDuration};
pub use dispatch::{Dispatcher, IdleAction, IdleState, IdleTimer, PollReport};
