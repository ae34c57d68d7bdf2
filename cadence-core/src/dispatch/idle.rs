//! Idle power-down
//!
//! Counts consecutive 250ms epochs in which no heater demands power and
//! asks for the supply to be switched off once the count passes
//! [`IDLE_POWER_OFF_EPOCHS`].

use crate::config::IDLE_POWER_OFF_EPOCHS;

/// Idle power-down state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdleState {
    /// Some heater has a nonzero target; count held at zero
    Active,
    /// Every target is zero; counting toward power-off
    Armed {
        /// Consecutive idle epochs so far
        epochs: u8,
    },
    /// Power-off has been issued; held until a heater demands power again
    PoweredOff,
}

/// What the caller must do after an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdleAction {
    /// Nothing to do
    Hold,
    /// Switch the supply off
    PowerOff,
}

/// Idle power-down timer
#[derive(Debug, Clone)]
pub struct IdleTimer {
    state: IdleState,
}

impl Default for IdleTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl IdleTimer {
    /// Create a timer in the [`IdleState::Active`] state
    pub const fn new() -> Self {
        Self {
            state: IdleState::Active,
        }
    }

    /// Feed one 250ms epoch's heater observation
    ///
    /// Returns [`IdleAction::PowerOff`] exactly once per threshold crossing.
    pub fn observe(&mut self, all_targets_zero: bool) -> IdleAction {
        if !all_targets_zero {
            self.state = IdleState::Active;
            return IdleAction::Hold;
        }

        match self.state {
            IdleState::Active => self.count(1),
            IdleState::Armed { epochs } => self.count(epochs.saturating_add(1)),
            IdleState::PoweredOff => IdleAction::Hold,
        }
    }

    fn count(&mut self, epochs: u8) -> IdleAction {
        if epochs > IDLE_POWER_OFF_EPOCHS {
            self.state = IdleState::PoweredOff;
            IdleAction::PowerOff
        } else {
            self.state = IdleState::Armed { epochs };
            IdleAction::Hold
        }
    }

    /// Current state
    pub fn state(&self) -> IdleState {
        self.state
    }
}
