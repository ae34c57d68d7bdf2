//! Cascade counters
//!
//! Pure carry arithmetic behind the tick accumulator. Each tier's overflow
//! is resolved by subtracting its rollover threshold, never by resetting to
//! zero, so a tick length that does not divide 10ms still averages out to
//! the exact period with no long-run drift.

use super::epoch::{Epoch, EpochSet};

/// The four tier counters
///
/// After every [`Cascade::advance`] each counter is strictly below its
/// tier's [`Epoch::rollover`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cascade {
    /// Milliseconds toward the next 10ms boundary
    ten_ms: u8,
    /// 10ms epochs toward the next 250ms boundary
    quarter_s: u8,
    /// 250ms epochs toward the next 1s boundary
    second: u8,
    /// 250ms epochs toward the next 3s boundary
    three_s: u8,
}

impl Cascade {
    /// All counters at zero
    pub const fn new() -> Self {
        Self {
            ten_ms: 0,
            quarter_s: 0,
            second: 0,
            three_s: 0,
        }
    }

    /// Advance by `elapsed_ms` and return the boundaries crossed
    ///
    /// A long enough step may cross every tier at once. `elapsed_ms` must
    /// not exceed [`MAX_TICK_MS`](crate::config::MAX_TICK_MS).
    pub fn advance(&mut self, elapsed_ms: u8) -> EpochSet {
        let mut crossed = EpochSet::empty();

        self.ten_ms += elapsed_ms;
        while self.ten_ms >= Epoch::TenMs.rollover() {
            self.ten_ms -= Epoch::TenMs.rollover();
            crossed.insert(Epoch::TenMs);
            self.quarter_s += 1;
        }

        while self.quarter_s >= Epoch::QuarterSecond.rollover() {
            self.quarter_s -= Epoch::QuarterSecond.rollover();
            crossed.insert(Epoch::QuarterSecond);
            self.second += 1;
            self.three_s += 1;
        }

        while self.second >= Epoch::Second.rollover() {
            self.second -= Epoch::Second.rollover();
            crossed.insert(Epoch::Second);
        }

        while self.three_s >= Epoch::ThreeSeconds.rollover() {
            self.three_s -= Epoch::ThreeSeconds.rollover();
            crossed.insert(Epoch::ThreeSeconds);
        }

        crossed
    }

    /// Current count of a tier
    pub const fn counter(&self, epoch: Epoch) -> u8 {
        match epoch {
            Epoch::TenMs => self.ten_ms,
            Epoch::QuarterSecond => self.quarter_s,
            Epoch::Second => self.second,
            Epoch::ThreeSeconds => self.three_s,
        }
    }
}
