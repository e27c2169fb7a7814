//! Validity gate and fixed-step rate law.
//!
//! The law is a bang-bang integrator inside absolute bounds: every
//! committed cycle moves the rate by exactly `max_delta` towards the
//! clinician target, then clamps into `[min_rate, max_rate]`.  The
//! distance between predicted and target pressure never scales the step.
//!
//! Everything here is O(1), allocation-free and panic-free for any `f32`
//! input, so it can run on the hard real-time control path.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{ControlInputs, ControlOutput};
use crate::config::DosingLimits;

/// Default confidence floor below which the control law is bypassed.
pub const MIN_CONFIDENCE: f32 = 0.5;

/// Upper bound of the confidence scale.
pub const MAX_CONFIDENCE: f32 = 1.0;

/// Why a cycle bypassed the control law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// No dosing limits have been accepted yet.
    Unconfigured,
    /// No estimator sample was available this cycle.
    MissingInput,
    ConfidenceNotFinite,
    ConfidenceTooLow,
    ConfidenceTooHigh,
    PredictedMapNotFinite,
    TargetMapNotFinite,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconfigured => write!(f, "controller unconfigured"),
            Self::MissingInput => write!(f, "no input sample"),
            Self::ConfidenceNotFinite => write!(f, "confidence not finite"),
            Self::ConfidenceTooLow => write!(f, "confidence below threshold"),
            Self::ConfidenceTooHigh => write!(f, "confidence above 1.0"),
            Self::PredictedMapNotFinite => write!(f, "predicted MAP not finite"),
            Self::TargetMapNotFinite => write!(f, "target MAP not finite"),
        }
    }
}

/// Outcome of one control cycle, before actuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// The control law ran and `rate` was committed as the new current rate.
    Commit { previous: f32, rate: f32 },
    /// The control law was bypassed; `rate` is the fallback rate and the
    /// current rate was left untouched.
    Fallback { reason: FallbackReason, rate: f32 },
}

impl Decision {
    /// Rate to forward to the actuator this cycle.
    pub fn rate(&self) -> f32 {
        match *self {
            Self::Commit { rate, .. } | Self::Fallback { rate, .. } => rate,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match *self {
            Self::Fallback { reason, .. } => Some(reason),
            Self::Commit { .. } => None,
        }
    }

    pub fn output(&self) -> ControlOutput {
        match *self {
            Self::Commit { rate, .. } => ControlOutput::committed(rate),
            Self::Fallback { rate, .. } => ControlOutput::fallback(rate),
        }
    }
}

/// Gate a sample before the control law may act on it.
///
/// NaN fails every comparison, so each field is checked for finiteness
/// before any range check.
pub fn validate_inputs(
    inputs: &ControlInputs,
    min_confidence: f32,
) -> Result<(), FallbackReason> {
    if !inputs.confidence.is_finite() {
        return Err(FallbackReason::ConfidenceNotFinite);
    }
    if inputs.confidence < min_confidence {
        return Err(FallbackReason::ConfidenceTooLow);
    }
    if inputs.confidence > MAX_CONFIDENCE {
        return Err(FallbackReason::ConfidenceTooHigh);
    }
    if !inputs.predicted_map_mmhg.is_finite() {
        return Err(FallbackReason::PredictedMapNotFinite);
    }
    if !inputs.clinician_target_map_mmhg.is_finite() {
        return Err(FallbackReason::TargetMapNotFinite);
    }
    Ok(())
}

/// Clamp without `f32::clamp`, which panics on inverted bounds.
fn clamp_rate(rate: f32, min: f32, max: f32) -> f32 {
    rate.min(max).max(min)
}

/// One fixed step from the current rate towards the target pressure,
/// clamped into the absolute bounds.  Pressure at target steps down.
pub fn next_rate(limits: &DosingLimits, inputs: &ControlInputs) -> f32 {
    let mut target = limits.current_rate_mcg_per_kg_min;

    if inputs.predicted_map_mmhg < inputs.clinician_target_map_mmhg {
        target += limits.max_delta_mcg_per_kg_min;
    } else {
        target -= limits.max_delta_mcg_per_kg_min;
    }

    clamp_rate(
        target,
        limits.min_rate_mcg_per_kg_min,
        limits.max_rate_mcg_per_kg_min,
    )
}

/// Run one control cycle against `limits`.
///
/// `current_rate_mcg_per_kg_min` is written only on [`Decision::Commit`].
pub fn safety_step(
    limits: &mut DosingLimits,
    inputs: Option<&ControlInputs>,
    min_confidence: f32,
) -> Decision {
    let fallback_rate = limits.fallback_rate_mcg_per_kg_min;
    let fallback = |reason| Decision::Fallback {
        reason,
        rate: fallback_rate,
    };

    let Some(inputs) = inputs else {
        return fallback(FallbackReason::MissingInput);
    };

    if let Err(reason) = validate_inputs(inputs, min_confidence) {
        return fallback(reason);
    }

    let previous = limits.current_rate_mcg_per_kg_min;
    let rate = next_rate(limits, inputs);
    limits.current_rate_mcg_per_kg_min = rate;

    Decision::Commit { previous, rate }
}
