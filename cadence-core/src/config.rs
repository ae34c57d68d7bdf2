//! Compile-time configuration constants
//!
//! The cascade thresholds live on [`Epoch`](crate::clock::Epoch); this
//! module holds the limits shared by the clock, the dispatcher and the
//! formatting helpers.

/// Longest tick a timer may report in one interrupt (ms)
///
/// Bounds the single largest addition into the 10ms counter so that a
/// `u8` never overflows between rollovers.
pub const MAX_TICK_MS: u8 = 100;

/// 250ms epochs per second
pub const EPOCHS_PER_SECOND: u8 = 4;

/// Heater idle time before the PSU is switched off (seconds)
pub const IDLE_TIMEOUT_S: u8 = 30;

/// Idle 250ms epochs tolerated before power-off
///
/// Power-off is issued once the idle count exceeds this value, i.e. on the
/// 121st consecutive idle epoch.
pub const IDLE_POWER_OFF_EPOCHS: u8 = IDLE_TIMEOUT_S * EPOCHS_PER_SECOND;

/// Capacity of a single telemetry status line
pub const STATUS_LINE_LEN: usize = 96;

/// Capacity of a single display field value
pub const FIELD_VALUE_LEN: usize = 16;
