//! Mission assembly: turns per-vehicle flight plans into trajectories and
//! runs the conflict search with the primary vehicle as subject.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::conflict::ConflictDetector;
use crate::error::{DeconflictError, Result};
use crate::models::{MissionResult, Vehicle, Waypoint};
use crate::rules::DeconflictionRules;
use crate::trajectory::build_trajectory_with_step;

/// Control points submitted for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePlan {
    pub id: String,
    pub waypoints: Vec<Waypoint>,
}

/// Mission document: the first vehicle is the primary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionPlan {
    #[serde(alias = "vehicles")]
    pub drones: Vec<VehiclePlan>,
}

impl MissionPlan {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A mission with its primary vehicle named explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    pub primary: Vehicle,
    pub others: Vec<Vehicle>,
}

impl Mission {
    /// Build trajectories for every vehicle of `plan` at `step` seconds.
    ///
    /// Vehicle ids must be unique and at least one vehicle is required. Any
    /// invalid flight plan fails the whole mission.
    pub fn from_plan(plan: &MissionPlan, step: f64) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut vehicles = Vec::with_capacity(plan.drones.len());
        for vehicle in &plan.drones {
            if !seen.insert(vehicle.id.as_str()) {
                return Err(DeconflictError::DuplicateVehicleId(vehicle.id.clone()));
            }
            let trajectory = build_trajectory_with_step(&vehicle.waypoints, step)?;
            vehicles.push(Vehicle::new(vehicle.id.clone(), trajectory));
        }

        let mut vehicles = vehicles.into_iter();
        let primary = vehicles.next().ok_or(DeconflictError::NoPrimaryVehicle)?;
        Ok(Self {
            primary,
            others: vehicles.collect(),
        })
    }

    pub fn evaluate(&self, detector: &ConflictDetector) -> MissionResult {
        self.log_result(detector.check(&self.primary.trajectory, &self.others))
    }

    pub fn evaluate_parallel(&self, detector: &ConflictDetector) -> MissionResult {
        self.log_result(detector.check_parallel(&self.primary.trajectory, &self.others))
    }

    fn log_result(&self, result: MissionResult) -> MissionResult {
        info!(
            primary = %self.primary.id,
            others = self.others.len(),
            status = %result.status,
            "mission evaluated"
        );
        result
    }
}

/// Assemble and evaluate `plan` under `rules`.
pub fn run_mission(plan: &MissionPlan, rules: &DeconflictionRules) -> Result<MissionResult> {
    rules.validate()?;
    let mission = Mission::from_plan(plan, rules.time_step)?;
    Ok(mission.evaluate(&ConflictDetector::from(rules)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MissionStatus;

    const MISSION_JSON: &str = r#"{
        "drones": [
            {"id": "PRIMARY", "waypoints": [
                {"x": 0, "y": 0, "z": 0, "t": 0},
                {"x": 100, "y": 0, "z": 0, "t": 10}
            ]},
            {"id": "CROSSER", "waypoints": [
                {"x": 50, "y": -50, "z": 0, "t": 0},
                {"x": 50, "y": 50, "z": 0, "t": 10}
            ]}
        ]
    }"#;

    #[test]
    fn test_parse_mission_document() {
        let plan = MissionPlan::from_json_str(MISSION_JSON).unwrap();
        assert_eq!(plan.drones.len(), 2);
        assert_eq!(plan.drones[1].id, "CROSSER");
        assert_eq!(plan.drones[1].waypoints[1], Waypoint::new(50.0, 50.0, 0.0, 10.0));
    }

    #[test]
    fn test_vehicles_alias() {
        let plan = MissionPlan::from_json_str(
            r#"{"vehicles": [{"id": "A", "waypoints": []}]}"#,
        )
        .unwrap();
        assert_eq!(plan.drones[0].id, "A");
    }

    #[test]
    fn test_crossing_mission_conflicts_at_crossing() {
        let plan = MissionPlan::from_json_str(MISSION_JSON).unwrap();
        let result = run_mission(&plan, &DeconflictionRules::default()).unwrap();
        assert_eq!(result.status, MissionStatus::Conflict);
        let conflict = &result.conflicts()[0];
        assert_eq!(conflict.with_id, "CROSSER");
        assert_eq!(conflict.time, 5.0);
        assert_eq!(conflict.location, (50.0, 0.0, 0.0));
        assert_eq!(conflict.distance, 0.0);
    }

    #[test]
    fn test_primary_role_is_first_vehicle() {
        let plan = MissionPlan::from_json_str(MISSION_JSON).unwrap();
        let mission = Mission::from_plan(&plan, 1.0).unwrap();
        assert_eq!(mission.primary.id, "PRIMARY");
        assert_eq!(mission.others.len(), 1);
        assert_eq!(mission.primary.trajectory.len(), 11);
    }

    #[test]
    fn test_single_vehicle_is_clear() {
        let plan = MissionPlan {
            drones: vec![VehiclePlan {
                id: "SOLO".into(),
                waypoints: vec![Waypoint::new(0.0, 0.0, 0.0, 0.0), Waypoint::new(1.0, 0.0, 0.0, 5.0)],
            }],
        };
        let result = run_mission(&plan, &DeconflictionRules::default()).unwrap();
        assert!(result.is_clear());
        assert!(result.conflicts.is_none());
    }

    #[test]
    fn test_empty_mission_has_no_primary() {
        let plan = MissionPlan { drones: Vec::new() };
        let err = Mission::from_plan(&plan, 1.0).unwrap_err();
        assert_eq!(err, DeconflictError::NoPrimaryVehicle);
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let wps = vec![Waypoint::new(0.0, 0.0, 0.0, 0.0), Waypoint::new(0.0, 0.0, 0.0, 1.0)];
        let plan = MissionPlan {
            drones: vec![
                VehiclePlan { id: "A".into(), waypoints: wps.clone() },
                VehiclePlan { id: "A".into(), waypoints: wps },
            ],
        };
        assert_eq!(
            Mission::from_plan(&plan, 1.0).unwrap_err(),
            DeconflictError::DuplicateVehicleId("A".into())
        );
    }

    #[test]
    fn test_invalid_plan_fails_whole_mission() {
        let plan = MissionPlan {
            drones: vec![
                VehiclePlan {
                    id: "A".into(),
                    waypoints: vec![Waypoint::new(0.0, 0.0, 0.0, 0.0), Waypoint::new(0.0, 0.0, 0.0, 1.0)],
                },
                VehiclePlan {
                    id: "B".into(),
                    waypoints: vec![Waypoint::new(0.0, 0.0, 0.0, 0.0)],
                },
            ],
        };
        assert_eq!(
            Mission::from_plan(&plan, 1.0).unwrap_err(),
            DeconflictError::TooFewWaypoints { count: 1 }
        );
    }

    #[test]
    fn test_run_mission_validates_rules() {
        let plan = MissionPlan::from_json_str(MISSION_JSON).unwrap();
        let rules = DeconflictionRules::default().with_time_step(-1.0);
        assert_eq!(
            run_mission(&plan, &rules).unwrap_err(),
            DeconflictError::InvalidTimeStep(-1.0)
        );
    }
}
