//! Spatial and temporal predicates used by the conflict search.

use crate::models::Waypoint;

/// Default co-presence window in seconds.
pub const DEFAULT_TIME_THRESHOLD: f64 = 1.0;

/// Euclidean distance between two samples, ignoring time.
pub fn distance(p1: &Waypoint, p2: &Waypoint) -> f64 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    let dz = p1.z - p2.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// True when the samples are strictly closer than `safe_dist`.
pub fn spatial_conflict(p1: &Waypoint, p2: &Waypoint, safe_dist: f64) -> bool {
    distance(p1, p2) < safe_dist
}

/// True when two sample times are at most `threshold` apart (inclusive).
pub fn temporal_overlap(t1: f64, t2: f64, threshold: f64) -> bool {
    (t1 - t2).abs() <= threshold
}

/// Round a distance to 2 decimals for reporting.
///
/// Rounds the exact binary value with ties to even, so 2.675 (stored just
/// below) gives 2.67 and 0.125 gives 0.12.
pub fn round_distance(distance: f64) -> f64 {
    format!("{distance:.2}").parse().unwrap_or(distance)
}
