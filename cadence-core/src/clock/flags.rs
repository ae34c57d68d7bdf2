//! One-shot epoch flags
//!
//! Raised by the tick interrupt, consumed by the main loop. A flag raised
//! again before it is consumed stays raised: missed boundaries coalesce
//! instead of queueing.
//!
//! `take` is a read-modify-write. On cores without native RMW atomics
//! (thumbv6m) portable-atomic implements it inside a critical section,
//! which requires its `critical-section` feature in the final binary.

use portable_atomic::{AtomicBool, Ordering};

use super::epoch::{Epoch, EpochSet};

/// One flag per epoch tier
#[derive(Debug)]
pub struct EpochFlags {
    flags: [AtomicBool; 4],
}

impl Default for EpochFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl EpochFlags {
    /// All flags clear
    pub const fn new() -> Self {
        Self {
            flags: [
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
            ],
        }
    }

    /// Raise the flag of every epoch in `epochs`, finest tier first
    pub fn raise(&self, epochs: EpochSet) {
        for epoch in epochs.iter() {
            self.flags[epoch.index()].store(true, Ordering::Release);
        }
    }

    /// Atomically test and clear a flag
    ///
    /// Returns `true` exactly once per raise.
    pub fn take(&self, epoch: Epoch) -> bool {
        self.flags[epoch.index()].swap(false, Ordering::AcqRel)
    }

    /// Check a flag without consuming it
    pub fn is_pending(&self, epoch: Epoch) -> bool {
        self.flags[epoch.index()].load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(epoch: Epoch) -> EpochSet {
        [epoch].into_iter().collect()
    }

    #[test]
    fn test_flag_persists_until_taken() {
        let flags = EpochFlags::new();
        flags.raise(only(Epoch::Second));

        for _ in 0..5 {
            assert!(flags.is_pending(Epoch::Second));
        }
        assert!(flags.take(Epoch::Second));
        assert!(!flags.is_pending(Epoch::Second));
    }

    #[test]
    fn test_take_consumes_once() {
        let flags = EpochFlags::new();
        flags.raise(only(Epoch::TenMs));

        assert!(flags.take(Epoch::TenMs));
        assert!(!flags.take(Epoch::TenMs));
        assert!(!flags.take(Epoch::TenMs));
    }

    #[test]
    fn test_repeated_raise_coalesces() {
        let flags = EpochFlags::new();
        flags.raise(only(Epoch::QuarterSecond));
        flags.raise(only(Epoch::QuarterSecond));

        assert!(flags.take(Epoch::QuarterSecond));
        assert!(!flags.take(Epoch::QuarterSecond));
    }

    #[test]
    fn test_flags_are_independent() {
        let flags = EpochFlags::new();
        let set: EpochSet = [Epoch::TenMs, Epoch::ThreeSeconds].into_iter().collect();
        flags.raise(set);

        assert!(!flags.take(Epoch::QuarterSecond));
        assert!(flags.take(Epoch::ThreeSeconds));
        assert!(flags.is_pending(Epoch::TenMs));
    }
}
