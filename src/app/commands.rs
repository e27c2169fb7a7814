//! Inbound commands to the control service.
//!
//! These arrive from the configuration channel (clinician adjustment,
//! start-up bootstrap) and are interpreted by
//! [`ControlService::handle_command`](super::service::ControlService::handle_command).

use crate::config::DosingLimits;

/// Commands that external adapters can send into the control core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerCommand {
    /// Install start-up limits and reset diagnostics.
    Initialize(DosingLimits),

    /// Replace the active limits without resetting diagnostics.
    SetLimits(DosingLimits),

    /// Zero the cycle counters.
    ResetDiagnostics,
}
