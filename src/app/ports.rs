//! Port traits — the hexagonal boundary between the safety core and the pump.
//!
//! ```text
//!   ControlService ──▶ Port trait ──▶ Adapter (pump HAL, alarm, log)
//! ```
//!
//! Driven adapters implement these traits.  The
//! [`ControlService`](super::service::ControlService) consumes them via
//! generics, so the decision core never touches hardware directly.

use crate::error::ActuatorError;

// ───────────────────────────────────────────────────────────────
// Rate actuator (driven adapter: domain → infusion pump)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the infusion pump.
pub trait RateActuator {
    /// Apply `rate_mcg_per_kg_min`.  Invoked exactly once per control cycle.
    fn set_rate(&mut self, rate_mcg_per_kg_min: f32) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Alarm actuator (driven adapter: domain → audible/visual alarm)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget alarm.  Invoked on every fallback cycle, before the
/// rate is forwarded.
pub trait AlarmActuator {
    fn trigger_alarm(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`ControllerEvent`](super::events::ControllerEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ControllerEvent);
}
