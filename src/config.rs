//! Dosing limits and controller configuration.
//!
//! [`DosingLimits`] is created once at start-up and may be replaced
//! wholesale at runtime (clinician adjustment over the configuration
//! channel).  Every record is validated before the controller accepts it;
//! an inconsistent record is rejected, never clamped.  The one exception is
//! the committed rate: a bootstrap record may start it outside the bounds,
//! and the controller pulls it into range when the record is applied.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Absolute dosing bounds plus the last committed commanded rate.
///
/// All rates are in mcg/kg/min.  `current_rate_mcg_per_kg_min` is
/// controller state rather than pure configuration: it is overwritten by
/// every committed control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DosingLimits {
    /// Last committed commanded rate.
    pub current_rate_mcg_per_kg_min: f32,
    /// Absolute lower bound for any committed rate.
    pub min_rate_mcg_per_kg_min: f32,
    /// Absolute upper bound for any committed rate.
    pub max_rate_mcg_per_kg_min: f32,
    /// Maximum rate change per control cycle.
    pub max_delta_mcg_per_kg_min: f32,
    /// Pre-approved safe rate used whenever inputs cannot be trusted.
    pub fallback_rate_mcg_per_kg_min: f32,
}

impl Default for DosingLimits {
    fn default() -> Self {
        Self {
            current_rate_mcg_per_kg_min: 0.05,
            min_rate_mcg_per_kg_min: 0.02,
            max_rate_mcg_per_kg_min: 0.90,
            max_delta_mcg_per_kg_min: 0.10,
            fallback_rate_mcg_per_kg_min: 0.05,
        }
    }
}

impl DosingLimits {
    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let all = [
            self.current_rate_mcg_per_kg_min,
            self.min_rate_mcg_per_kg_min,
            self.max_rate_mcg_per_kg_min,
            self.max_delta_mcg_per_kg_min,
            self.fallback_rate_mcg_per_kg_min,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::ValidationFailed("all rates must be finite"));
        }
        if self.min_rate_mcg_per_kg_min < 0.0 {
            return Err(ConfigError::ValidationFailed("min_rate must be >= 0"));
        }
        if self.min_rate_mcg_per_kg_min > self.max_rate_mcg_per_kg_min {
            return Err(ConfigError::ValidationFailed("min_rate must be <= max_rate"));
        }
        if self.max_delta_mcg_per_kg_min < 0.0 {
            return Err(ConfigError::ValidationFailed("max_delta must be >= 0"));
        }
        if self.fallback_rate_mcg_per_kg_min < self.min_rate_mcg_per_kg_min
            || self.fallback_rate_mcg_per_kg_min > self.max_rate_mcg_per_kg_min
        {
            return Err(ConfigError::ValidationFailed(
                "fallback_rate must be within [min_rate, max_rate]",
            ));
        }
        if self.current_rate_mcg_per_kg_min < 0.0 {
            return Err(ConfigError::ValidationFailed("current_rate must be >= 0"));
        }
        Ok(())
    }

    /// True if the committed rate already sits inside the absolute bounds.
    pub fn current_within_bounds(&self) -> bool {
        (self.min_rate_mcg_per_kg_min..=self.max_rate_mcg_per_kg_min)
            .contains(&self.current_rate_mcg_per_kg_min)
    }

    /// Copy with the committed rate pulled into `[min_rate, max_rate]`.
    ///
    /// Only meaningful on a validated record (`min <= max`).
    pub fn with_current_in_bounds(self) -> Self {
        Self {
            current_rate_mcg_per_kg_min: self
                .current_rate_mcg_per_kg_min
                .min(self.max_rate_mcg_per_kg_min)
                .max(self.min_rate_mcg_per_kg_min),
            ..self
        }
    }

    /// Parse and validate a JSON limits record (fixed start-up configuration).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let limits: Self = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
        limits.validate()?;
        Ok(limits)
    }

    /// Decode and validate a postcard-encoded limits record received over
    /// the configuration channel.
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        let limits: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
        limits.validate()?;
        Ok(limits)
    }

    /// Encode for the configuration channel.
    pub fn encode(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Corrupted)
    }
}

/// Controller tuning that is fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Inputs with a confidence below this value force the fallback profile.
    pub min_confidence: f32,
    /// Raise the alarm when the rate actuator fails a command.
    pub escalate_actuator_failure: bool,
}

impl ControllerConfig {
    pub const DEFAULT: Self = Self {
        min_confidence: 0.5,
        escalate_actuator_failure: true,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_confidence.is_finite()
            || self.min_confidence <= 0.0
            || self.min_confidence > 1.0
        {
            return Err(ConfigError::ValidationFailed(
                "min_confidence must be within (0, 1]",
            ));
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
