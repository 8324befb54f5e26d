//! Discretization of sparse flight-plan waypoints into dense trajectories.

use tracing::debug;

use crate::error::{DeconflictError, Result};
use crate::models::{validate_samples, Trajectory, Waypoint};

/// Default sampling interval in seconds.
pub const DEFAULT_TIME_STEP: f64 = 1.0;

/// Upper bound on intervals produced for a single waypoint pair.
pub const MAX_SEGMENT_INTERVALS: usize = 10_000_000;

/// Linear interpolation between two waypoints.
///
/// Yields `floor((end.t - start.t) / step) + 1` samples evenly spread over the
/// interval, the first equal to `start` and the last equal to `end`. A positive
/// interval shorter than `step` still yields both endpoints. A zero-length
/// interval yields `start` only.
///
/// Cloning restarts the sequence from where the clone was taken.
#[derive(Debug, Clone)]
pub struct Interpolation {
    start: Waypoint,
    end: Waypoint,
    intervals: usize,
    next: usize,
}

impl Interpolation {
    fn sample(&self, i: usize) -> Waypoint {
        if i == 0 {
            return self.start;
        }
        if i == self.intervals {
            return self.end;
        }
        let a = i as f64 / self.intervals as f64;
        let (s, e) = (self.start, self.end);
        Waypoint {
            x: s.x + a * (e.x - s.x),
            y: s.y + a * (e.y - s.y),
            z: s.z + a * (e.z - s.z),
            // rounding must never push an inner sample past the endpoint
            t: (s.t + a * (e.t - s.t)).min(e.t),
        }
    }

    fn total(&self) -> usize {
        self.intervals.saturating_add(1)
    }
}

impl Iterator for Interpolation {
    type Item = Waypoint;

    fn next(&mut self) -> Option<Waypoint> {
        if self.next >= self.total() {
            return None;
        }
        let wp = self.sample(self.next);
        self.next += 1;
        Some(wp)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Interpolation {}

impl std::iter::FusedIterator for Interpolation {}

/// Interpolate from `wp1` to `wp2` (inclusive) every `step` seconds.
///
/// Fails if `step` is not a finite positive number, if either waypoint is
/// non-finite, if `wp2` precedes `wp1` in time, or if the interval would need
/// more than [`MAX_SEGMENT_INTERVALS`] intervals.
pub fn interpolate(wp1: Waypoint, wp2: Waypoint, step: f64) -> Result<Interpolation> {
    validate_step(step)?;
    validate_samples(&[wp1, wp2])?;

    let duration = wp2.t - wp1.t;
    let intervals = if duration > 0.0 {
        let count = (duration / step).floor();
        if count > MAX_SEGMENT_INTERVALS as f64 {
            return Err(DeconflictError::TooManySamples {
                span: duration,
                step,
                limit: MAX_SEGMENT_INTERVALS,
            });
        }
        (count as usize).max(1)
    } else {
        0
    };

    Ok(Interpolation {
        start: wp1,
        end: wp2,
        intervals,
        next: 0,
    })
}

/// Build a dense trajectory from flight-plan control points using
/// [`DEFAULT_TIME_STEP`].
pub fn build_trajectory(waypoints: &[Waypoint]) -> Result<Trajectory> {
    build_trajectory_with_step(waypoints, DEFAULT_TIME_STEP)
}

/// Build a dense trajectory by concatenating the interpolation of every
/// consecutive pair of control points.
///
/// Each segment contributes both of its endpoints, so interior control points
/// appear twice in the result.
pub fn build_trajectory_with_step(waypoints: &[Waypoint], step: f64) -> Result<Trajectory> {
    if waypoints.len() < 2 {
        return Err(DeconflictError::TooFewWaypoints {
            count: waypoints.len(),
        });
    }
    validate_step(step)?;
    validate_samples(waypoints)?;

    let mut samples = Vec::new();
    for pair in waypoints.windows(2) {
        samples.extend(interpolate(pair[0], pair[1], step)?);
    }

    debug!(
        control_points = waypoints.len(),
        samples = samples.len(),
        step,
        "built trajectory"
    );

    Ok(Trajectory::from_ordered(samples))
}

pub(crate) fn validate_step(step: f64) -> Result<()> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(DeconflictError::InvalidTimeStep(step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wp(x: f64, y: f64, z: f64, t: f64) -> Waypoint {
        Waypoint::new(x, y, z, t)
    }

    #[test]
    fn test_interpolate_sample_count() {
        let samples: Vec<_> = interpolate(wp(0.0, 0.0, 0.0, 0.0), wp(10.0, 0.0, 0.0, 10.0), 1.0)
            .unwrap()
            .collect();
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[3], wp(3.0, 0.0, 0.0, 3.0));
    }

    #[test]
    fn test_interpolate_uneven_interval_spreads_samples() {
        // 2.5s at 1s step -> 2 intervals of 1.25s
        let samples: Vec<_> = interpolate(wp(0.0, 0.0, 0.0, 0.0), wp(5.0, 0.0, 0.0, 2.5), 1.0)
            .unwrap()
            .collect();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[1].t, 1.25);
        assert_eq!(samples[1].x, 2.5);
        assert_eq!(samples[2], wp(5.0, 0.0, 0.0, 2.5));
    }

    #[test]
    fn test_interpolate_degenerate_interval() {
        let start = wp(1.0, 2.0, 3.0, 5.0);
        let samples: Vec<_> = interpolate(start, wp(9.0, 9.0, 9.0, 5.0), 1.0)
            .unwrap()
            .collect();
        assert_eq!(samples, vec![start]);
    }

    #[test]
    fn test_interpolate_short_interval_keeps_endpoints() {
        let start = wp(0.0, 0.0, 0.0, 0.0);
        let end = wp(1.0, 1.0, 1.0, 0.4);
        let samples: Vec<_> = interpolate(start, end, 1.0).unwrap().collect();
        assert_eq!(samples, vec![start, end]);
    }

    #[test]
    fn test_interpolate_is_restartable() {
        let interp = interpolate(wp(0.0, 0.0, 0.0, 0.0), wp(4.0, 4.0, 4.0, 4.0), 1.0).unwrap();
        assert_eq!(interp.len(), 5);
        let first: Vec<_> = interp.clone().collect();
        let second: Vec<_> = interp.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_interpolate_rejects_bad_step() {
        let a = wp(0.0, 0.0, 0.0, 0.0);
        let b = wp(0.0, 0.0, 0.0, 1.0);
        assert_eq!(
            interpolate(a, b, 0.0).unwrap_err(),
            DeconflictError::InvalidTimeStep(0.0)
        );
        assert!(interpolate(a, b, -1.0).is_err());
        assert!(interpolate(a, b, f64::NAN).is_err());
    }

    #[test]
    fn test_interpolate_rejects_oversized_interval() {
        let err = interpolate(wp(0.0, 0.0, 0.0, 0.0), wp(0.0, 0.0, 0.0, 1e30), 1.0).unwrap_err();
        assert_eq!(
            err,
            DeconflictError::TooManySamples {
                span: 1e30,
                step: 1.0,
                limit: MAX_SEGMENT_INTERVALS
            }
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_build_trajectory_reports_huge_span_as_error() {
        let result = build_trajectory(&[wp(0.0, 0.0, 0.0, 0.0), wp(5.0, 0.0, 0.0, 1e30)]);
        assert!(matches!(
            result,
            Err(DeconflictError::TooManySamples { .. })
        ));
    }

    #[test]
    fn test_interpolate_at_interval_limit() {
        let interp = interpolate(
            wp(0.0, 0.0, 0.0, 0.0),
            wp(0.0, 0.0, 0.0, MAX_SEGMENT_INTERVALS as f64),
            1.0,
        )
        .unwrap();
        assert_eq!(interp.len(), MAX_SEGMENT_INTERVALS + 1);
    }

    #[test]
    fn test_interpolate_rejects_reversed_pair() {
        let err = interpolate(wp(0.0, 0.0, 0.0, 2.0), wp(0.0, 0.0, 0.0, 1.0), 1.0).unwrap_err();
        assert!(matches!(err, DeconflictError::NonCausalWaypoints { .. }));
    }

    #[test]
    fn test_build_trajectory_concatenates_segments() {
        let trajectory = build_trajectory(&[
            wp(0.0, 0.0, 0.0, 0.0),
            wp(2.0, 0.0, 0.0, 2.0),
            wp(2.0, 4.0, 0.0, 4.0),
        ])
        .unwrap();
        // 3 + 3 samples, junction point repeated
        assert_eq!(trajectory.len(), 6);
        assert_eq!(trajectory.samples()[2], trajectory.samples()[3]);
        assert_eq!(trajectory.end_time(), Some(4.0));
    }

    #[test]
    fn test_build_trajectory_requires_two_waypoints() {
        assert_eq!(
            build_trajectory(&[]).unwrap_err(),
            DeconflictError::TooFewWaypoints { count: 0 }
        );
        assert_eq!(
            build_trajectory(&[wp(0.0, 0.0, 0.0, 0.0)]).unwrap_err(),
            DeconflictError::TooFewWaypoints { count: 1 }
        );
    }

    #[test]
    fn test_build_trajectory_rejects_non_causal_plan() {
        let err = build_trajectory(&[
            wp(0.0, 0.0, 0.0, 0.0),
            wp(0.0, 0.0, 0.0, 5.0),
            wp(0.0, 0.0, 0.0, 3.0),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            DeconflictError::NonCausalWaypoints {
                index: 2,
                previous_t: 5.0,
                next_t: 3.0
            }
        );
    }

    #[test]
    fn test_build_trajectory_with_custom_step() {
        let trajectory = build_trajectory_with_step(
            &[wp(0.0, 0.0, 0.0, 0.0), wp(0.0, 0.0, 10.0, 10.0)],
            0.5,
        )
        .unwrap();
        assert_eq!(trajectory.len(), 21);
        assert_eq!(trajectory.samples()[1].t, 0.5);
    }
}
