//! Control-cycle data and the bounded-step control law.
//!
//! [`ControlInputs`] arrive once per cycle from the external estimator;
//! [`ControlOutput`] is produced fresh each cycle for the actuation
//! boundary.  Neither is retained beyond the cycle.

pub mod law;

use serde::{Deserialize, Serialize};

/// One estimator sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlInputs {
    /// Predicted mean arterial pressure (mmHg).
    pub predicted_map_mmhg: f32,
    /// Estimated risk of hypotension.  Carried for telemetry; the control
    /// law does not consult it.
    pub hypotension_risk: f32,
    /// Estimator trust in the prediction, nominally 0–1.
    pub confidence: f32,
    /// Clinician-prescribed target mean arterial pressure (mmHg).
    pub clinician_target_map_mmhg: f32,
}

/// The decision for one control cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlOutput {
    pub commanded_rate_mcg_per_kg_min: f32,
    /// True if the cycle bypassed the control law.
    pub use_fallback_profile: bool,
    /// True if the alarm actuator must be invoked.
    pub trigger_alarm: bool,
}

impl ControlOutput {
    /// Output for a cycle that bypassed the control law.
    pub const fn fallback(rate: f32) -> Self {
        Self {
            commanded_rate_mcg_per_kg_min: rate,
            use_fallback_profile: true,
            trigger_alarm: true,
        }
    }

    /// Output for a cycle whose rate was committed by the control law.
    pub const fn committed(rate: f32) -> Self {
        Self {
            commanded_rate_mcg_per_kg_min: rate,
            use_fallback_profile: false,
            trigger_alarm: false,
        }
    }
}
