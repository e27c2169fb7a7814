//! Control service — one full cycle from decision to actuation.
//!
//! [`ControlService`] borrows the process-wide [`SharedController`] and
//! owns the per-cycle diagnostics.  All I/O flows through port traits
//! injected at call sites, making the entire cycle testable with mock
//! adapters.
//!
//! ```text
//!                 ┌──────────────────────────┐ ──▶ EventSink
//! ControlInputs ─▶│      ControlService      │
//!                 │ SharedController · Stats │ ──▶ AlarmActuator
//!                 └──────────────────────────┘ ──▶ RateActuator
//! ```

use log::{error, info, warn};

use crate::config::DosingLimits;
use crate::control::law::Decision;
use crate::control::{ControlInputs, ControlOutput};
use crate::diagnostics::CycleStats;
use crate::error::{ConfigError, Error, Result};

use super::commands::ControllerCommand;
use super::events::ControllerEvent;
use super::ports::{AlarmActuator, EventSink, RateActuator};
use super::shared::SharedController;

// ───────────────────────────────────────────────────────────────
// ControlService
// ───────────────────────────────────────────────────────────────

pub struct ControlService<'a> {
    core: &'a SharedController,
    /// Raise the alarm when the pump refuses a rate command.
    escalate_actuator_failure: bool,
    stats: CycleStats,
}

impl<'a> ControlService<'a> {
    /// Tuning comes from the config `core` was built with.
    pub fn new(core: &'a SharedController) -> Self {
        Self {
            core,
            escalate_actuator_failure: core.config().escalate_actuator_failure,
            stats: CycleStats::new(),
        }
    }

    // ── Per-cycle orchestration ──────────────────────────────

    /// Run one control cycle: decide → alarm (if fallback) → forward rate.
    ///
    /// The `hw` parameter satisfies **both** [`RateActuator`] and
    /// [`AlarmActuator`], so the alarm-before-rate ordering is visible to a
    /// single adapter.
    pub fn step(
        &mut self,
        inputs: Option<&ControlInputs>,
        hw: &mut (impl RateActuator + AlarmActuator),
        sink: &mut impl EventSink,
    ) -> ControlOutput {
        // 1. Decide under the shared lock
        let decision = self.core.step(inputs);
        let mut output = decision.output();

        match decision {
            Decision::Commit { previous, rate } => {
                self.stats.record_commit();
                sink.emit(&ControllerEvent::RateCommitted {
                    from: previous,
                    to: rate,
                });
            }
            Decision::Fallback { reason, rate } => {
                self.stats.record_fallback(reason);
                sink.emit(&ControllerEvent::Fallback { reason, rate });
            }
        }

        // 2. Every fallback cycle raises the alarm
        let mut alarm_raised = false;
        if output.use_fallback_profile {
            self.raise_alarm(hw);
            alarm_raised = true;
        }

        // 3. Forward the rate, fallback cycles included
        if let Err(e) = hw.set_rate(output.commanded_rate_mcg_per_kg_min) {
            error!(
                "rate actuator failed at {:.3}: {e}",
                output.commanded_rate_mcg_per_kg_min
            );
            self.stats.record_actuator_failure();
            sink.emit(&ControllerEvent::ActuatorFailed(e));

            if self.escalate_actuator_failure {
                if !alarm_raised {
                    self.raise_alarm(hw);
                }
                output.trigger_alarm = true;
            }
        }

        output
    }

    // ── Command handling ─────────────────────────────────────

    /// Process a command from the configuration channel.
    pub fn handle_command(
        &mut self,
        cmd: ControllerCommand,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            ControllerCommand::Initialize(limits) => {
                self.apply_limits(self.core.initialize(Some(limits)), sink)?;
                self.stats.reset();
                info!("controller initialized");
            }
            ControllerCommand::SetLimits(limits) => {
                self.apply_limits(self.core.set_limits(Some(limits)), sink)?;
            }
            ControllerCommand::ResetDiagnostics => {
                self.stats.reset();
            }
        }
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────

    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    pub fn core(&self) -> &SharedController {
        self.core
    }

    // ── Internal ─────────────────────────────────────────────

    fn raise_alarm(&mut self, hw: &mut impl AlarmActuator) {
        hw.trigger_alarm();
        self.stats.record_alarm();
    }

    fn apply_limits(
        &self,
        result: core::result::Result<Option<DosingLimits>, ConfigError>,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match result {
            Ok(applied) => {
                if let Some(limits) = applied {
                    sink.emit(&ControllerEvent::LimitsApplied(limits));
                }
                Ok(())
            }
            Err(e) => {
                warn!("limits command rejected: {e}");
                sink.emit(&ControllerEvent::LimitsRejected(e));
                Err(Error::from(e))
            }
        }
    }
}
