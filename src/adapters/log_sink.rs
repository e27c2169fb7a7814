//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured controller events to the
//! `log` facade.  A telemetry adapter would implement the same trait.

use log::{error, info, warn};

use crate::app::events::ControllerEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ControllerEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControllerEvent) {
        match event {
            ControllerEvent::LimitsApplied(l) => {
                info!(
                    "LIMITS | rate={:.3} | bounds=[{:.3}, {:.3}] | delta={:.3} | fallback={:.3}",
                    l.current_rate_mcg_per_kg_min,
                    l.min_rate_mcg_per_kg_min,
                    l.max_rate_mcg_per_kg_min,
                    l.max_delta_mcg_per_kg_min,
                    l.fallback_rate_mcg_per_kg_min,
                );
            }
            ControllerEvent::LimitsRejected(e) => {
                warn!("LIMITS | rejected: {}", e);
            }
            ControllerEvent::RateCommitted { from, to } => {
                info!("RATE | {:.3} -> {:.3} mcg/kg/min", from, to);
            }
            ControllerEvent::Fallback { reason, rate } => {
                warn!("FALLBACK | {} | rate={:.3} mcg/kg/min", reason, rate);
            }
            ControllerEvent::ActuatorFailed(e) => {
                error!("ACTUATOR | {}", e);
            }
        }
    }
}
