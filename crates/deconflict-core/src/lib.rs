//! Strategic deconfliction of planned 4D drone trajectories.
//!
//! Sparse flight-plan waypoints are discretized into time-sampled
//! trajectories, then the primary vehicle's trajectory is searched against
//! every other vehicle for co-present samples closer than the safe distance.

pub mod checks;
pub mod conflict;
pub mod error;
pub mod mission;
pub mod models;
pub mod rules;
pub mod trajectory;

pub use checks::{
    distance, round_distance, spatial_conflict, temporal_overlap, DEFAULT_TIME_THRESHOLD,
};
pub use conflict::{check_conflicts, ConflictDetector};
pub use error::{DeconflictError, Result};
pub use mission::{run_mission, Mission, MissionPlan, VehiclePlan};
pub use models::{Conflict, MissionResult, MissionStatus, Trajectory, Vehicle, Waypoint};
pub use rules::{DeconflictionRules, DEFAULT_SAFE_DISTANCE};
pub use trajectory::{
    build_trajectory, build_trajectory_with_step, interpolate, Interpolation, DEFAULT_TIME_STEP,
    MAX_SEGMENT_INTERVALS,
};
