//! SysTick epoch source
//!
//! SysTick fires once per `TICK_MS` and folds the tick into the epoch
//! cascade. Embassy's time driver runs on the RP2040 TIMER, so SysTick is
//! free for this.

use cadence_core::{Clock, TickDuration};
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use cortex_m_rt::exception;
use defmt::*;

use crate::board_config::TICK_MS;

/// Epoch cascade shared by SysTick and the main loop
pub static CLOCK: Clock = Clock::new(TickDuration::from_ms(TICK_MS));

/// SysTick reload register width
const SYST_RELOAD_MAX: u32 = 0x00FF_FFFF;

/// Start SysTick at one interrupt per tick
pub fn start(mut syst: SYST) {
    let cycles_per_ms = embassy_rp::clocks::clk_sys_freq() / 1000;
    let cycles = cycles_per_ms * u32::from(CLOCK.tick_duration().as_ms());
    let reload = cycles.saturating_sub(1).min(SYST_RELOAD_MAX);
    if reload == SYST_RELOAD_MAX {
        warn!("SysTick reload clamped, tick runs fast");
    }

    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(reload);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();

    info!("SysTick started: {} ms tick, reload {}", TICK_MS, reload);
}

#[exception]
fn SysTick() {
    CLOCK.tick();
}
