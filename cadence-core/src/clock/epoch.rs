//! Epoch tiers and epoch sets

/// Epoch tiers, finest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Epoch {
    /// 10ms: watchdog, sensor sampling, intercom
    TenMs,
    /// 250ms: idle power-down
    QuarterSecond,
    /// 1s: status display and telemetry
    Second,
    /// 3s: slow display fields
    ThreeSeconds,
}

impl Epoch {
    /// All tiers in cascade order
    pub const ALL: [Epoch; 4] = [
        Epoch::TenMs,
        Epoch::QuarterSecond,
        Epoch::Second,
        Epoch::ThreeSeconds,
    ];

    /// Position of this tier in [`Epoch::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Epoch length in milliseconds
    pub const fn period_ms(self) -> u32 {
        match self {
            Epoch::TenMs => 10,
            Epoch::QuarterSecond => 250,
            Epoch::Second => 1000,
            Epoch::ThreeSeconds => 3000,
        }
    }

    /// Counter value at which this tier rolls over
    ///
    /// The 10ms tier counts milliseconds; the 250ms tier counts 10ms
    /// epochs; the 1s and 3s tiers both count 250ms epochs.
    pub const fn rollover(self) -> u8 {
        match self {
            Epoch::TenMs => 10,
            Epoch::QuarterSecond => 25,
            Epoch::Second => 4,
            Epoch::ThreeSeconds => 12,
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A set of epoch boundaries
///
/// Returned by an accumulation step (boundaries crossed) and by a
/// dispatcher poll (boundaries consumed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EpochSet(u8);

impl EpochSet {
    /// The empty set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Add an epoch to the set
    pub fn insert(&mut self, epoch: Epoch) {
        self.0 |= epoch.bit();
    }

    /// Check whether an epoch is in the set
    pub const fn contains(self, epoch: Epoch) -> bool {
        self.0 & epoch.bit() != 0
    }

    /// Check if no epoch is in the set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of epochs in the set
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the contained epochs, finest first
    pub fn iter(self) -> impl Iterator<Item = Epoch> {
        Epoch::ALL.into_iter().filter(move |e| self.contains(*e))
    }
}

impl FromIterator<Epoch> for EpochSet {
    fn from_iter<I: IntoIterator<Item = Epoch>>(iter: I) -> Self {
        let mut set = Self::empty();
        for epoch in iter {
            set.insert(epoch);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollovers_compose_to_periods() {
        assert_eq!(
            Epoch::QuarterSecond.period_ms(),
            Epoch::TenMs.period_ms() * Epoch::QuarterSecond.rollover() as u32
        );
        assert_eq!(
            Epoch::Second.period_ms(),
            Epoch::QuarterSecond.period_ms() * Epoch::Second.rollover() as u32
        );
        assert_eq!(
            Epoch::ThreeSeconds.period_ms(),
            Epoch::QuarterSecond.period_ms() * Epoch::ThreeSeconds.rollover() as u32
        );
    }

    #[test]
    fn test_epoch_set() {
        let mut set = EpochSet::empty();
        assert!(set.is_empty());

        set.insert(Epoch::Second);
        set.insert(Epoch::TenMs);
        set.insert(Epoch::TenMs);

        assert_eq!(set.len(), 2);
        assert!(set.contains(Epoch::TenMs));
        assert!(!set.contains(Epoch::QuarterSecond));

        let mut order = set.iter();
        assert_eq!(order.next(), Some(Epoch::TenMs));
        assert_eq!(order.next(), Some(Epoch::Second));
        assert_eq!(order.next(), None);
    }

    #[test]
    fn test_epoch_set_from_iter() {
        let set: EpochSet = [Epoch::ThreeSeconds, Epoch::QuarterSecond].into_iter().collect();
        assert!(set.contains(Epoch::ThreeSeconds));
        assert!(set.contains(Epoch::QuarterSecond));
        assert!(!set.contains(Epoch::Second));
    }
}
