//! Error types for trajectory construction and mission assembly.

use thiserror::Error;

/// Errors raised while building trajectories or assembling a mission.
///
/// Every variant is an invalid-input condition: it is reported to the
/// immediate caller and no partial trajectory or result is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeconflictError {
    /// A flight plan needs at least two control points.
    #[error("trajectory needs at least 2 waypoints, got {count}")]
    TooFewWaypoints { count: usize },

    /// Time goes backwards between two consecutive points.
    #[error("waypoint {index} has t={next_t} which precedes previous t={previous_t}")]
    NonCausalWaypoints {
        index: usize,
        previous_t: f64,
        next_t: f64,
    },

    #[error("waypoint {index} has a non-finite coordinate or time")]
    NonFiniteWaypoint { index: usize },

    /// Interpolation step must be finite and strictly positive.
    #[error("invalid time step {0}, must be finite and > 0")]
    InvalidTimeStep(f64),

    /// Sampling the interval would exceed the per-segment sample limit.
    #[error("interval of {span}s at step {step}s needs more than {limit} samples")]
    TooManySamples { span: f64, step: f64, limit: usize },

    #[error("invalid safety rule {name}={value}")]
    InvalidRule { name: &'static str, value: f64 },

    #[error("mission has no vehicles, a primary vehicle is required")]
    NoPrimaryVehicle,

    #[error("vehicle id {0:?} appears more than once in the mission")]
    DuplicateVehicleId(String),
}

impl DeconflictError {
    /// Whether this is an invalid-input condition. Every variant currently
    /// is; the core has no other failure class.
    pub fn is_invalid_input(&self) -> bool {
        true
    }
}

pub type Result<T> = std::result::Result<T, DeconflictError>;
