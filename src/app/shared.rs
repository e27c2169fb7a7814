//! Process-wide safety controller shared between tasks.
//!
//! The control task runs [`SharedController::step`] once per cycle while a
//! configuration task may call [`SharedController::set_limits`] at any time.
//! Both go through one `embassy-sync` blocking mutex, so a step never
//! observes a half-written limits record.
//!
//! ```text
//! ┌──────────────┐  set_limits  ┌──────────────────┐   step   ┌──────────────┐
//! │ Config task  │─────────────▶│ SharedController │◀─────────│ Control task │
//! └──────────────┘              └──────────────────┘          └──────────────┘
//! ```
//!
//! Only the decision runs inside the critical section.  Actuator I/O is
//! done by the caller afterwards.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::config::{ControllerConfig, DosingLimits};
use crate::control::ControlInputs;
use crate::control::law::Decision;
use crate::error::ConfigError;
use crate::safety::SafetyController;

pub struct SharedController {
    inner: Mutex<CriticalSectionRawMutex, RefCell<SafetyController>>,
}

impl SharedController {
    /// Controller with [`ControllerConfig::DEFAULT`].  Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(SafetyController::new())),
        }
    }

    /// Controller with custom tuning.  An invalid config is refused.
    pub fn try_new(config: ControllerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Mutex::new(RefCell::new(SafetyController::try_new(config)?)),
        })
    }

    /// Returns the record that went live, read inside the same lock that
    /// installed it.
    pub fn initialize(
        &self,
        limits: Option<DosingLimits>,
    ) -> Result<Option<DosingLimits>, ConfigError> {
        self.with(|c| c.initialize(limits))
    }

    pub fn set_limits(
        &self,
        limits: Option<DosingLimits>,
    ) -> Result<Option<DosingLimits>, ConfigError> {
        self.with(|c| c.set_limits(limits))
    }

    /// Decide one cycle.  The read-modify-write of the current rate happens
    /// under a single lock.
    pub fn step(&self, inputs: Option<&ControlInputs>) -> Decision {
        self.with(|c| c.step(inputs))
    }

    pub fn limits(&self) -> Option<DosingLimits> {
        self.with(|c| c.limits())
    }

    pub fn current_rate(&self) -> Option<f32> {
        self.with(|c| c.current_rate())
    }

    pub fn is_ready(&self) -> bool {
        self.with(|c| c.is_ready())
    }

    pub fn config(&self) -> ControllerConfig {
        self.with(|c| *c.config())
    }

    fn with<R>(&self, f: impl FnOnce(&mut SafetyController) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

impl Default for SharedController {
    fn default() -> Self {
        Self::new()
    }
}
