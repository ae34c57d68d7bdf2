//! Tick accumulator
//!
//! Folds hardware timer ticks into cascading epochs and raises a one-shot
//! flag at every epoch boundary. This is the only code that runs in
//! interrupt context.

pub mod accumulator;
pub mod cascade;
pub mod epoch;
pub mod flags;

pub use accumulator::{Clock, TickDuration};
pub use cascade::Cascade;
pub use epoch::{Epoch, EpochSet};
pub use flags::EpochFlags;
