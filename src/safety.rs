//! Safety controller.
//!
//! Owns the single live [`DosingLimits`] record and runs the control law
//! against it.  The record is reachable only through this type; no other
//! component may mutate it.
//!
//! ## Lifecycle
//!
//! 1. The controller starts `Unconfigured`.  Every cycle in this state
//!    falls back to a zero rate with the alarm raised.
//! 2. `initialize` / `set_limits` with a valid record moves it to `Ready`.
//!    An invalid record is rejected and the previous state is kept.
//! 3. In `Ready`, each cycle either commits a new bounded rate or falls
//!    back to the configured fallback rate.
//!
//! An absent record (`None`) is a no-op in either state.  A committed
//! rate outside the bounds of an accepted record is pulled into range
//! before the record goes live, so the first committed cycle moves it by
//! at most `max_delta`.
//!
//! The [`ControllerConfig`] is validated once at construction and fixed
//! for the lifetime of the controller.

use log::{debug, error, info, warn};

use crate::config::{ControllerConfig, DosingLimits};
use crate::control::ControlInputs;
use crate::control::law::{self, Decision, FallbackReason};
use crate::error::ConfigError;

/// Rate commanded while no limits have been accepted: stop infusion.
pub const UNCONFIGURED_RATE: f32 = 0.0;

/// Configured vs unconfigured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerState {
    Unconfigured,
    Ready(DosingLimits),
}

/// Safety controller.
#[derive(Debug)]
pub struct SafetyController {
    state: ControllerState,
    config: ControllerConfig,
}

impl SafetyController {
    /// Controller with [`ControllerConfig::DEFAULT`].  Usable in `const`
    /// context.
    pub const fn new() -> Self {
        Self {
            state: ControllerState::Unconfigured,
            config: ControllerConfig::DEFAULT,
        }
    }

    /// Controller with custom tuning.  An invalid config is refused.
    pub fn try_new(config: ControllerConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            warn!("controller config rejected: {e}");
            return Err(e);
        }
        Ok(Self {
            state: ControllerState::Unconfigured,
            config,
        })
    }

    /// Install the start-up limits, replacing any previous state.
    ///
    /// Returns the record that went live, or `None` when `limits` was absent.
    pub fn initialize(
        &mut self,
        limits: Option<DosingLimits>,
    ) -> Result<Option<DosingLimits>, ConfigError> {
        let Some(limits) = limits else {
            debug!("initialize: no limits supplied, ignoring");
            return Ok(None);
        };
        self.apply(limits, "initialized").map(Some)
    }

    /// Replace the active limits at runtime (clinician adjustment).
    pub fn set_limits(
        &mut self,
        limits: Option<DosingLimits>,
    ) -> Result<Option<DosingLimits>, ConfigError> {
        let Some(limits) = limits else {
            debug!("set_limits: no limits supplied, ignoring");
            return Ok(None);
        };
        self.apply(limits, "updated").map(Some)
    }

    /// Run one control cycle.  Never fails.
    pub fn step(&mut self, inputs: Option<&ControlInputs>) -> Decision {
        let decision = match &mut self.state {
            ControllerState::Unconfigured => Decision::Fallback {
                reason: FallbackReason::Unconfigured,
                rate: UNCONFIGURED_RATE,
            },
            ControllerState::Ready(limits) => {
                law::safety_step(limits, inputs, self.config.min_confidence)
            }
        };

        match decision {
            Decision::Fallback { reason, rate } => {
                error!("FALLBACK: {reason} -> rate={rate:.3}");
            }
            Decision::Commit { previous, rate } => {
                debug!("rate {previous:.3} -> {rate:.3}");
            }
        }

        decision
    }

    // ── Queries ──────────────────────────────────────────────────

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ControllerState::Ready(_))
    }

    /// Copy of the active limits, if configured.
    pub fn limits(&self) -> Option<DosingLimits> {
        match self.state {
            ControllerState::Ready(limits) => Some(limits),
            ControllerState::Unconfigured => None,
        }
    }

    /// Last committed rate, if configured.
    pub fn current_rate(&self) -> Option<f32> {
        self.limits().map(|l| l.current_rate_mcg_per_kg_min)
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // ── Internal ─────────────────────────────────────────────────

    fn apply(&mut self, limits: DosingLimits, verb: &str) -> Result<DosingLimits, ConfigError> {
        if let Err(e) = limits.validate() {
            warn!("dosing limits rejected: {e}");
            return Err(e);
        }
        let limits = if limits.current_within_bounds() {
            limits
        } else {
            let pulled = limits.with_current_in_bounds();
            warn!(
                "current rate {:.3} outside [{:.3}, {:.3}], starting at {:.3}",
                limits.current_rate_mcg_per_kg_min,
                limits.min_rate_mcg_per_kg_min,
                limits.max_rate_mcg_per_kg_min,
                pulled.current_rate_mcg_per_kg_min,
            );
            pulled
        };
        self.state = ControllerState::Ready(limits);
        info!(
            "dosing limits {verb}: rate={:.3} bounds=[{:.3}, {:.3}] delta={:.3} fallback={:.3}",
            limits.current_rate_mcg_per_kg_min,
            limits.min_rate_mcg_per_kg_min,
            limits.max_rate_mcg_per_kg_min,
            limits.max_delta_mcg_per_kg_min,
            limits.fallback_rate_mcg_per_kg_min,
        );
        Ok(limits)
    }
}

impl Default for SafetyController {
    fn default() -> Self {
        Self::new()
    }
}
