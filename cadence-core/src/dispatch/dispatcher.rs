//! Epoch dispatcher
//!
//! Test-and-clear composition, strictly nested by tier:
//!
//! ```text
//! poll
//! └─ 10ms   watchdog, sample, intercom
//!    └─ 250ms  idle power-down
//!       ├─ 1s     display positions/temperatures, status telemetry
//!       └─ 3s     display temperatures
//! ```
//!
//! Watchdog service comes first inside the 10ms branch, so however slow the
//! nested work is, it cannot starve the watchdog by more than one poll.
//! Boundaries missed while the main loop was busy coalesce into one.

use core::fmt;

use crate::clock::{Clock, Epoch, EpochSet};
use crate::status::{self, Axis, FieldValue, MotionSnapshot, StatusLine};
use crate::traits::{
    Absent, CommsLink, DisplayError, DisplayField, HeaterBank, HeaterChannel, MotionStatus,
    PowerControl, StatusDisplay, Telemetry, TelemetryError, TemperatureSampler, Watchdog,
};

use super::idle::{IdleAction, IdleState, IdleTimer};

/// What a single [`Dispatcher::poll`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollReport {
    /// Epoch boundaries consumed
    pub epochs: EpochSet,
    /// Power-off was issued
    pub powered_off: bool,
    /// Display writes that failed
    pub display_faults: u8,
    /// Last display error
    pub display_error: Option<DisplayError>,
    /// Telemetry lines that failed
    pub telemetry_faults: u8,
    /// Last telemetry error
    pub telemetry_error: Option<TelemetryError>,
}

impl PollReport {
    /// Check if no epoch was due
    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    fn display_fault(&mut self, error: DisplayError) {
        self.display_faults = self.display_faults.saturating_add(1);
        self.display_error = Some(error);
    }

    fn telemetry_fault(&mut self, error: TelemetryError) {
        self.telemetry_faults = self.telemetry_faults.saturating_add(1);
        self.telemetry_error = Some(error);
    }
}

/// Main-loop side of the scheduler
///
/// Required collaborators are given to [`Dispatcher::new`]; optional ones
/// start out [`Absent`] and are fitted with the `with_*` builders.
pub struct Dispatcher<'c, W, T, H, P, M = Absent, D = Absent, S = Absent, L = Absent> {
    clock: &'c Clock,
    watchdog: W,
    sampler: T,
    heaters: H,
    power: P,
    motion: M,
    display: D,
    telemetry: S,
    link: L,
    idle: IdleTimer,
}

impl<'c, W, T, H, P> Dispatcher<'c, W, T, H, P>
where
    W: Watchdog,
    T: TemperatureSampler,
    H: HeaterBank,
    P: PowerControl,
{
    /// Create a dispatcher with no optional capabilities fitted
    pub fn new(clock: &'c Clock, watchdog: W, sampler: T, heaters: H, power: P) -> Self {
        Self {
            clock,
            watchdog,
            sampler,
            heaters,
            power,
            motion: Absent,
            display: Absent,
            telemetry: Absent,
            link: Absent,
            idle: IdleTimer::new(),
        }
    }
}

impl<'c, W, T, H, P, M, D, S, L> Dispatcher<'c, W, T, H, P, M, D, S, L> {
    /// Fit a motion status source
    pub fn with_motion<M2: MotionStatus>(
        self,
        motion: M2,
    ) -> Dispatcher<'c, W, T, H, P, M2, D, S, L> {
        Dispatcher {
            clock: self.clock,
            watchdog: self.watchdog,
            sampler: self.sampler,
            heaters: self.heaters,
            power: self.power,
            motion,
            display: self.display,
            telemetry: self.telemetry,
            link: self.link,
            idle: self.idle,
        }
    }

    /// Fit a status display
    pub fn with_display<D2: StatusDisplay>(
        self,
        display: D2,
    ) -> Dispatcher<'c, W, T, H, P, M, D2, S, L> {
        Dispatcher {
            clock: self.clock,
            watchdog: self.watchdog,
            sampler: self.sampler,
            heaters: self.heaters,
            power: self.power,
            motion: self.motion,
            display,
            telemetry: self.telemetry,
            link: self.link,
            idle: self.idle,
        }
    }

    /// Fit debug status telemetry
    pub fn with_telemetry<S2: Telemetry>(
        self,
        telemetry: S2,
    ) -> Dispatcher<'c, W, T, H, P, M, D, S2, L> {
        Dispatcher {
            clock: self.clock,
            watchdog: self.watchdog,
            sampler: self.sampler,
            heaters: self.heaters,
            power: self.power,
            motion: self.motion,
            display: self.display,
            telemetry,
            link: self.link,
            idle: self.idle,
        }
    }

    /// Fit the inter-board link
    pub fn with_link<L2: CommsLink>(
        self,
        link: L2,
    ) -> Dispatcher<'c, W, T, H, P, M, D, S, L2> {
        Dispatcher {
            clock: self.clock,
            watchdog: self.watchdog,
            sampler: self.sampler,
            heaters: self.heaters,
            power: self.power,
            motion: self.motion,
            display: self.display,
            telemetry: self.telemetry,
            link,
            idle: self.idle,
        }
    }

    /// Current idle power-down state
    pub fn idle_state(&self) -> IdleState {
        self.idle.state()
    }
}

impl<'c, W, T, H, P, M, D, S, L> Dispatcher<'c, W, T, H, P, M, D, S, L>
where
    W: Watchdog,
    T: TemperatureSampler,
    H: HeaterBank,
    P: PowerControl,
    M: MotionStatus,
    D: StatusDisplay,
    S: Telemetry,
    L: CommsLink,
{
    /// Run whatever epoch work is due
    ///
    /// Safe to call at any rate. Returns promptly when nothing is pending.
    pub fn poll(&mut self) -> PollReport {
        let mut report = PollReport::default();
        if self.clock.take(Epoch::TenMs) {
            report.epochs.insert(Epoch::TenMs);
            self.run_10ms(&mut report);
        }
        report
    }

    fn run_10ms(&mut self, report: &mut PollReport) {
        self.watchdog.service();
        self.sampler.sample();

        if L::ENABLED {
            self.link.start_send();
        }

        if self.clock.take(Epoch::QuarterSecond) {
            report.epochs.insert(Epoch::QuarterSecond);
            self.run_250ms(report);
        }
    }

    fn run_250ms(&mut self, report: &mut PollReport) {
        if self.idle.observe(self.heaters.all_targets_zero()) == IdleAction::PowerOff {
            self.power.power_off();
            report.powered_off = true;
        }

        if self.clock.take(Epoch::Second) {
            report.epochs.insert(Epoch::Second);
            self.run_1s(report);
        }

        if self.clock.take(Epoch::ThreeSeconds) {
            report.epochs.insert(Epoch::ThreeSeconds);
            self.run_3s(report);
        }
    }

    fn run_1s(&mut self, report: &mut PollReport) {
        if !(D::ENABLED || S::ENABLED) {
            return;
        }

        let motion = if M::ENABLED { self.motion.snapshot() } else { None };

        // Skip the display while moves are queued; it is slow
        if D::ENABLED && motion.map_or(true, |m| m.queue_empty()) {
            if let Some(snapshot) = motion {
                for (field, axis) in [
                    (DisplayField::AxisX, Axis::X),
                    (DisplayField::AxisY, Axis::Y),
                    (DisplayField::AxisZ, Axis::Z),
                ] {
                    self.render(field, status::axis_value(snapshot.current.get(axis)), report);
                }
            }
            self.render_temperatures(report);
        }

        if S::ENABLED {
            if let Some(snapshot) = motion {
                self.report_status(&snapshot, report);
            }
        }
    }

    fn run_3s(&mut self, report: &mut PollReport) {
        if D::ENABLED {
            self.render_temperatures(report);
        }
    }

    fn render_temperatures(&mut self, report: &mut PollReport) {
        for channel in HeaterChannel::ALL {
            if let Some(reading) = self.sampler.readout(channel) {
                let field = match channel {
                    HeaterChannel::Extruder => DisplayField::Extruder,
                    HeaterChannel::Bed => DisplayField::Bed,
                };
                self.render(field, status::temperature_value(reading), report);
            }
        }
    }

    fn render(
        &mut self,
        field: DisplayField,
        value: Result<FieldValue, fmt::Error>,
        report: &mut PollReport,
    ) {
        let result = value
            .map_err(|_| DisplayError::Overflow)
            .and_then(|value| self.display.render(field, &value));
        if let Err(e) = result {
            report.display_fault(e);
        }
    }

    fn report_status(&mut self, snapshot: &MotionSnapshot, report: &mut PollReport) {
        let lines: [Result<StatusLine, fmt::Error>; 3] = [
            status::position_line(&snapshot.current),
            status::destination_line(&snapshot.destination),
            status::queue_line(snapshot),
        ];

        for line in lines {
            let result = line
                .map_err(|_| TelemetryError::Overflow)
                .and_then(|line| self.telemetry.emit(&line));
            if let Err(e) = result {
                report.telemetry_fault(e);
            }
        }
    }
}
