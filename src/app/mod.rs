//! Application core — the control cycle behind port traits.
//!
//! This module wires the [`SafetyController`](crate::safety::SafetyController)
//! to the actuation boundary.  All interaction with the pump and the alarm
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod shared;
