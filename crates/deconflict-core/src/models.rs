//! Core data models for the deconfliction system.

use serde::{Deserialize, Serialize};

use crate::error::{DeconflictError, Result};

/// A single 4D sample: position in meters, mission time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
}

impl Waypoint {
    pub const fn new(x: f64, y: f64, z: f64, t: f64) -> Self {
        Self { x, y, z, t }
    }

    /// Spatial part of the sample.
    pub fn position(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.t.is_finite()
    }
}

/// Time-ordered samples of one vehicle's planned path.
///
/// Sample times never decrease, which lets the conflict scan restrict each
/// comparison to a contiguous time window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Waypoint>", into = "Vec<Waypoint>")]
pub struct Trajectory {
    samples: Vec<Waypoint>,
}

impl Trajectory {
    /// Wrap already-sampled points, checking that every value is finite and
    /// that time is non-decreasing.
    pub fn new(samples: Vec<Waypoint>) -> Result<Self> {
        validate_samples(&samples)?;
        Ok(Self { samples })
    }

    /// Wrap samples produced by interpolation, which are ordered by construction.
    pub(crate) fn from_ordered(samples: Vec<Waypoint>) -> Self {
        debug_assert!(validate_samples(&samples).is_ok());
        Self { samples }
    }

    pub fn samples(&self) -> &[Waypoint] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.samples.iter()
    }

    pub fn start_time(&self) -> Option<f64> {
        self.samples.first().map(|wp| wp.t)
    }

    pub fn end_time(&self) -> Option<f64> {
        self.samples.last().map(|wp| wp.t)
    }

    pub fn position_at_index(&self, index: usize) -> Option<(f64, f64, f64)> {
        self.samples.get(index).map(Waypoint::position)
    }

    pub fn into_samples(self) -> Vec<Waypoint> {
        self.samples
    }
}

impl TryFrom<Vec<Waypoint>> for Trajectory {
    type Error = DeconflictError;

    fn try_from(samples: Vec<Waypoint>) -> Result<Self> {
        Self::new(samples)
    }
}

impl From<Trajectory> for Vec<Waypoint> {
    fn from(trajectory: Trajectory) -> Self {
        trajectory.samples
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

pub(crate) fn validate_samples(samples: &[Waypoint]) -> Result<()> {
    for (index, wp) in samples.iter().enumerate() {
        if !wp.is_finite() {
            return Err(DeconflictError::NonFiniteWaypoint { index });
        }
    }
    for (index, pair) in samples.windows(2).enumerate() {
        if pair[1].t < pair[0].t {
            return Err(DeconflictError::NonCausalWaypoints {
                index: index + 1,
                previous_t: pair[0].t,
                next_t: pair[1].t,
            });
        }
    }
    Ok(())
}

/// A vehicle taking part in a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub trajectory: Trajectory,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, trajectory: Trajectory) -> Self {
        Self {
            id: id.into(),
            trajectory,
        }
    }
}

/// Closest qualifying approach between the primary vehicle and another one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Primary vehicle's sample time
    pub time: f64,
    /// Primary vehicle's position at `time`
    pub location: (f64, f64, f64),
    /// Id of the other vehicle
    #[serde(rename = "with")]
    pub with_id: String,
    /// Separation rounded to 2 decimals
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MissionStatus {
    Conflict,
    Clear,
}

impl std::fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict => f.write_str("CONFLICT"),
            Self::Clear => f.write_str("CLEAR"),
        }
    }
}

/// Outcome of one conflict search.
///
/// `conflicts` is `Some` with at least one entry exactly when the status is
/// [`MissionStatus::Conflict`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionResult {
    pub status: MissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<Conflict>>,
}

impl MissionResult {
    pub fn clear() -> Self {
        Self {
            status: MissionStatus::Clear,
            conflicts: None,
        }
    }

    pub fn conflict(conflict: Conflict) -> Self {
        Self {
            status: MissionStatus::Conflict,
            conflicts: Some(vec![conflict]),
        }
    }

    pub fn is_clear(&self) -> bool {
        self.status == MissionStatus::Clear
    }

    /// Conflicts in report order; empty when clear.
    pub fn conflicts(&self) -> &[Conflict] {
        self.conflicts.as_deref().unwrap_or(&[])
    }
}
