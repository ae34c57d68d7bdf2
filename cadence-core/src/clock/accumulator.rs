//! Interrupt-side tick accumulator
//!
//! A [`Clock`] is meant to live in a `static` shared by the timer interrupt
//! and the main loop:
//!
//! ```ignore
//! static CLOCK: Clock = Clock::new(TickDuration::from_ms(2));
//!
//! #[exception]
//! fn SysTick() {
//!     CLOCK.tick();
//! }
//! ```
//!
//! The interrupt is the only writer of the cascade counters and the only
//! setter of flags. The main loop only ever clears flags through
//! [`Clock::take`].

use core::cell::Cell;

use critical_section::Mutex;

use super::cascade::Cascade;
use super::epoch::{Epoch, EpochSet};
use super::flags::EpochFlags;
use crate::config::MAX_TICK_MS;

/// Milliseconds represented by one hardware tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickDuration(u8);

impl TickDuration {
    /// Create a tick duration
    ///
    /// Evaluated in a `const` or `static` initializer, an out-of-range value
    /// fails the build.
    pub const fn from_ms(ms: u8) -> Self {
        assert!(ms > 0 && ms <= MAX_TICK_MS, "tick duration must be 1..=MAX_TICK_MS ms");
        Self(ms)
    }

    /// Duration in milliseconds
    pub const fn as_ms(self) -> u8 {
        self.0
    }
}

/// Tick accumulator: cascade counters plus epoch flags
pub struct Clock {
    tick: TickDuration,
    cascade: Mutex<Cell<Cascade>>,
    flags: EpochFlags,
}

impl Clock {
    /// Create a clock with all counters and flags at zero
    pub const fn new(tick: TickDuration) -> Self {
        Self {
            tick,
            cascade: Mutex::new(Cell::new(Cascade::new())),
            flags: EpochFlags::new(),
        }
    }

    /// Advance by one hardware tick
    ///
    /// Call from the timer interrupt, once per interrupt.
    pub fn tick(&self) -> EpochSet {
        self.advance(self.tick.as_ms())
    }

    /// Advance by an explicit number of milliseconds
    ///
    /// For timers that report elapsed time rather than firing at a fixed
    /// rate. `elapsed_ms` is clamped to [`MAX_TICK_MS`].
    pub fn advance(&self, elapsed_ms: u8) -> EpochSet {
        critical_section::with(|cs| {
            let cell = self.cascade.borrow(cs);
            let mut cascade = cell.get();
            let crossed = cascade.advance(elapsed_ms.min(MAX_TICK_MS));
            cell.set(cascade);
            self.flags.raise(crossed);
            crossed
        })
    }

    /// Atomically test and clear an epoch flag
    pub fn take(&self, epoch: Epoch) -> bool {
        self.flags.take(epoch)
    }

    /// Check an epoch flag without consuming it
    pub fn is_pending(&self, epoch: Epoch) -> bool {
        self.flags.is_pending(epoch)
    }

    /// Copy of the cascade counters, for diagnostics
    pub fn snapshot(&self) -> Cascade {
        critical_section::with(|cs| self.cascade.borrow(cs).get())
    }

    /// Configured tick duration
    pub const fn tick_duration(&self) -> TickDuration {
        self.tick
    }
}
