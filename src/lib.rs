//! Infusion safety core.
//!
//! The decision core of a closed-loop vasopressor infusion controller:
//! given a noisy pressure prediction and a clinician target it computes a
//! bounded commanded rate, decides when to fall back to a pre-approved safe
//! rate, and decides when to raise the alarm.  Pump and alarm hardware are
//! reached only through the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod diagnostics;
pub mod error;
pub mod safety;

pub use config::{ControllerConfig, DosingLimits};
pub use control::{ControlInputs, ControlOutput};
pub use error::{ActuatorError, ConfigError, Error};
