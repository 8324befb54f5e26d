//! Conflict search for planned 4D trajectories.
//!
//! Compares every sample of the primary trajectory with every co-present
//! sample of each other vehicle and reports the single closest approach that
//! breaks the safe distance.

use std::cmp::Ordering;
use std::ops::Range;

use rayon::prelude::*;
use tracing::debug;

use crate::checks::{distance, round_distance, temporal_overlap, DEFAULT_TIME_THRESHOLD};
use crate::models::{Conflict, MissionResult, Trajectory, Vehicle, Waypoint};
use crate::rules::{DeconflictionRules, DEFAULT_SAFE_DISTANCE};

/// A sample pair closer than the safe distance, with its scan position.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    vehicle: usize,
    primary: usize,
    other: usize,
}

impl Candidate {
    /// Smaller distance wins; equal distances go to whichever the nested
    /// vehicle / primary / other loop reaches first.
    fn precedes(&self, other: &Candidate) -> bool {
        match self.distance.total_cmp(&other.distance) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => {
                (self.vehicle, self.primary, self.other)
                    < (other.vehicle, other.primary, other.other)
            }
        }
    }

    fn earliest(a: Candidate, b: Candidate) -> Candidate {
        if b.precedes(&a) {
            b
        } else {
            a
        }
    }
}

/// Strategic conflict detector.
///
/// Stateless apart from its thresholds; every check is a pure function of
/// its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConflictDetector {
    /// Separation below which a pair conflicts (meters, exclusive)
    pub safe_distance: f64,
    /// Co-presence window (seconds, inclusive)
    pub time_threshold: f64,
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SAFE_DISTANCE, DEFAULT_TIME_THRESHOLD)
    }
}

impl From<&DeconflictionRules> for ConflictDetector {
    fn from(rules: &DeconflictionRules) -> Self {
        Self::new(rules.safe_distance, rules.time_threshold)
    }
}

impl ConflictDetector {
    pub fn new(safe_distance: f64, time_threshold: f64) -> Self {
        Self {
            safe_distance,
            time_threshold,
        }
    }

    /// Find the closest conflict between `primary` and any of `others`.
    pub fn check(&self, primary: &Trajectory, others: &[Vehicle]) -> MissionResult {
        debug!(
            vehicles = others.len(),
            primary_samples = primary.len(),
            "sequential conflict scan"
        );

        let mut best: Option<Candidate> = None;
        for (v, vehicle) in others.iter().enumerate() {
            for (i, p) in primary.iter().enumerate() {
                if let Some(found) = self.closest_to_sample(p, &vehicle.trajectory, v, i) {
                    best = Some(match best {
                        Some(current) => Candidate::earliest(current, found),
                        None => found,
                    });
                }
            }
        }

        self.build_result(best, primary, others)
    }

    /// Same result as [`check`](Self::check), with the work spread over the
    /// rayon thread pool per (vehicle, primary sample) pair.
    pub fn check_parallel(&self, primary: &Trajectory, others: &[Vehicle]) -> MissionResult {
        debug!(
            vehicles = others.len(),
            primary_samples = primary.len(),
            "parallel conflict scan"
        );

        let samples = primary.samples();
        let best = others
            .par_iter()
            .enumerate()
            .flat_map(move |(v, vehicle)| {
                (0..samples.len()).into_par_iter().filter_map(move |i| {
                    self.closest_to_sample(&samples[i], &vehicle.trajectory, v, i)
                })
            })
            .reduce_with(Candidate::earliest);

        self.build_result(best, primary, others)
    }

    /// Closest conflicting sample of `other` for one primary sample.
    fn closest_to_sample(
        &self,
        p: &Waypoint,
        other: &Trajectory,
        vehicle: usize,
        primary: usize,
    ) -> Option<Candidate> {
        let samples = other.samples();
        let window = self.co_present_window(p.t, samples);
        let offset = window.start;

        let mut best: Option<Candidate> = None;
        for (k, q) in samples[window].iter().enumerate() {
            if !temporal_overlap(p.t, q.t, self.time_threshold) {
                continue;
            }
            let dist = distance(p, q);
            if dist.partial_cmp(&self.safe_distance) != Some(Ordering::Less) {
                continue;
            }
            if best.map_or(true, |b| dist < b.distance) {
                best = Some(Candidate {
                    distance: dist,
                    vehicle,
                    primary,
                    other: offset + k,
                });
            }
        }
        best
    }

    /// Index range of `samples` whose time lies within the threshold of `t`.
    ///
    /// Relies on trajectory times being non-decreasing.
    fn co_present_window(&self, t: f64, samples: &[Waypoint]) -> Range<usize> {
        let start = samples.partition_point(|q| t - q.t > self.time_threshold);
        let len = samples[start..].partition_point(|q| q.t - t <= self.time_threshold);
        start..start + len
    }

    fn build_result(
        &self,
        best: Option<Candidate>,
        primary: &Trajectory,
        others: &[Vehicle],
    ) -> MissionResult {
        let Some(best) = best else {
            return MissionResult::clear();
        };
        let p = primary.samples()[best.primary];
        let with = &others[best.vehicle];

        debug!(
            with = %with.id,
            time = p.t,
            distance = best.distance,
            "closest conflict"
        );

        MissionResult::conflict(Conflict {
            time: p.t,
            location: p.position(),
            with_id: with.id.clone(),
            distance: round_distance(best.distance),
        })
    }
}

/// Check `primary` against `others` with the default co-presence window.
pub fn check_conflicts(primary: &Trajectory, others: &[Vehicle], safe_dist: f64) -> MissionResult {
    ConflictDetector::new(safe_dist, DEFAULT_TIME_THRESHOLD).check(primary, others)
}
