//! Heater target temperatures
//!
//! Targets are written by whatever receives commands (host link, UI) and
//! read by the dispatcher's idle check and the inter-board link. Each
//! target is a single atomic, so no lock is needed on either side.

use cadence_core::traits::{HeaterBank, HeaterChannel};
use portable_atomic::{AtomicI16, Ordering};

/// Target temperature per heater channel, in 0.1°C
#[derive(Debug)]
pub struct TargetBank {
    targets: [AtomicI16; 2],
}

impl Default for TargetBank {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetBank {
    /// All heaters off
    pub const fn new() -> Self {
        Self {
            targets: [AtomicI16::new(0), AtomicI16::new(0)],
        }
    }

    /// Set a channel's target (0.1°C, 0 = off)
    ///
    /// Negative targets are treated as off.
    pub fn set_target(&self, channel: HeaterChannel, target_x10: i16) {
        self.targets[channel.index()].store(target_x10.max(0), Ordering::Release);
    }

    /// A channel's current target
    pub fn target(&self, channel: HeaterChannel) -> i16 {
        self.targets[channel.index()].load(Ordering::Acquire)
    }

    /// Switch every heater off
    pub fn clear(&self) {
        for channel in HeaterChannel::ALL {
            self.set_target(channel, 0);
        }
    }
}

impl HeaterBank for TargetBank {
    fn all_targets_zero(&self) -> bool {
        HeaterChannel::ALL
            .iter()
            .all(|&channel| self.target(channel) == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let bank = TargetBank::new();
        assert!(bank.all_targets_zero());
    }

    #[test]
    fn test_any_target_is_demand() {
        let bank = TargetBank::new();

        bank.set_target(HeaterChannel::Bed, 600);
        assert!(!bank.all_targets_zero());
        assert_eq!(bank.target(HeaterChannel::Bed), 600);
        assert_eq!(bank.target(HeaterChannel::Extruder), 0);

        bank.clear();
        assert!(bank.all_targets_zero());
    }

    #[test]
    fn test_negative_target_is_off() {
        let bank = TargetBank::new();
        bank.set_target(HeaterChannel::Extruder, -50);
        assert_eq!(bank.target(HeaterChannel::Extruder), 0);
        assert!(bank.all_targets_zero());
    }

    #[test]
    fn test_shared_reference_is_a_bank() {
        static TARGETS: TargetBank = TargetBank::new();
        fn idle(heaters: impl HeaterBank) -> bool {
            heaters.all_targets_zero()
        }

        TARGETS.set_target(HeaterChannel::Extruder, 2100);
        assert!(!idle(&TARGETS));
    }
}
