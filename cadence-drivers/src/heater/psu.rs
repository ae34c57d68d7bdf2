//! PSU enable output
//!
//! Drives the main supply enable line (ATX PS_ON, relay or SSR).

use cadence_core::traits::PowerControl;
use embedded_hal::digital::OutputPin;

/// PSU enable switch
///
/// The pin can be configured as active-high (default) or active-low.
/// ATX supplies are active-low: PS_ON pulled low keeps the supply on.
pub struct PsuSwitch<P> {
    pin: P,
    /// If true, supply ON = pin LOW
    inverted: bool,
    /// Current logical state (true = supply on)
    on: bool,
    /// Set when a pin write has failed
    faulted: bool,
}

impl<P: OutputPin> PsuSwitch<P> {
    /// Create a switch and drive the supply on
    ///
    /// # Arguments
    /// - `pin`: The enable pin
    /// - `inverted`: If true, the supply is ON when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut psu = Self {
            pin,
            inverted,
            on: false,
            faulted: false,
        };
        psu.drive(true);
        psu
    }

    /// Create a switch with active-high enable
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a switch with active-low enable
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Switch the supply back on
    pub fn power_on(&mut self) {
        self.drive(true);
    }

    /// Check whether the supply is on
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Check whether any pin write has failed
    pub fn faulted(&self) -> bool {
        self.faulted
    }

    fn drive(&mut self, on: bool) {
        let result = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match result {
            Ok(()) => self.on = on,
            Err(_) => self.faulted = true,
        }
    }
}

impl<P: OutputPin> PowerControl for PsuSwitch<P> {
    fn power_off(&mut self) {
        if self.on {
            self.drive(false);
        }
    }
}
