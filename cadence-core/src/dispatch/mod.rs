//! Epoch dispatcher
//!
//! Consumes the epoch flags raised by the tick accumulator and runs the
//! maintenance actions scoped to each tier. Runs in the main loop.

pub mod dispatcher;
pub mod idle;

pub use dispatcher::{Dispatcher, PollReport};
pub use idle::{IdleAction, IdleState, IdleTimer};
