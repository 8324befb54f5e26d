//! Safety rules and thresholds for deconfliction.

use serde::{Deserialize, Serialize};

use crate::checks::DEFAULT_TIME_THRESHOLD;
use crate::error::{DeconflictError, Result};
use crate::trajectory::{validate_step, DEFAULT_TIME_STEP};

/// Default minimum separation in meters.
pub const DEFAULT_SAFE_DISTANCE: f64 = 10.0;

/// Configuration for a conflict search.
///
/// The time step should be at most half the safe distance divided by the
/// fastest vehicle speed, otherwise a close pass can fall between samples.
/// This is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeconflictionRules {
    /// Separation below which co-present vehicles conflict (meters)
    pub safe_distance: f64,
    /// Maximum time difference for two samples to count as co-present (seconds)
    pub time_threshold: f64,
    /// Trajectory sampling interval (seconds)
    pub time_step: f64,
}

impl Default for DeconflictionRules {
    fn default() -> Self {
        Self {
            safe_distance: DEFAULT_SAFE_DISTANCE,
            time_threshold: DEFAULT_TIME_THRESHOLD,
            time_step: DEFAULT_TIME_STEP,
        }
    }
}

impl DeconflictionRules {
    pub fn with_safe_distance(mut self, safe_distance: f64) -> Self {
        self.safe_distance = safe_distance;
        self
    }

    pub fn with_time_threshold(mut self, time_threshold: f64) -> Self {
        self.time_threshold = time_threshold;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.safe_distance.is_finite() || self.safe_distance < 0.0 {
            return Err(DeconflictError::InvalidRule {
                name: "safe_distance",
                value: self.safe_distance,
            });
        }
        if !self.time_threshold.is_finite() || self.time_threshold < 0.0 {
            return Err(DeconflictError::InvalidRule {
                name: "time_threshold",
                value: self.time_threshold,
            });
        }
        validate_step(self.time_step)
    }
}
