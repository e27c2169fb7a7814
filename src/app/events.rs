//! Outbound controller events.
//!
//! The [`ControlService`](super::service::ControlService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.

use crate::config::DosingLimits;
use crate::control::law::FallbackReason;
use crate::error::{ActuatorError, ConfigError};

/// Structured events emitted by the control core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    /// A limits record was accepted and is now active.
    LimitsApplied(DosingLimits),

    /// A limits record failed validation; the previous record stays active.
    LimitsRejected(ConfigError),

    /// The control law committed a new rate.
    RateCommitted { from: f32, to: f32 },

    /// The control law was bypassed this cycle.
    Fallback { reason: FallbackReason, rate: f32 },

    /// The rate actuator failed to apply the commanded rate.
    ActuatorFailed(ActuatorError),
}
