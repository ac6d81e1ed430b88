//! Kinematic weighted-A* search driver.
//!
//! Best-first loop over continuous (x, y, theta) states: pop the minimum
//! total-distance state, test the goal region, expand every wheel-speed
//! action through the drive model, relax improvements into the cost
//! ledger, push them onto the frontier. The visited set (rounded cells)
//! bounds the otherwise infinite continuous state space.

use std::collections::BinaryHeap;

use tracing::{debug, info, warn};

use super::{CostLedger, DedupIndex, FrontierNode, SearchOutcome};
use crate::config::PlannerConfig;
use crate::error::{MargaError, Result};
use crate::motion::{action_table, BodyTwist, DriveModel, WheelAction};
use crate::pose::{Pose2D, WorldPoint};
use crate::scene::Scene;

/// Exact continuous-state key: the raw bit patterns of (x, y, theta).
///
/// Distinct float states stay distinct in the ledger; merging of
/// near-identical states is the dedup index's job, not the key's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct StateKey {
    x: u32,
    y: u32,
    theta: u32,
}

impl StateKey {
    #[inline]
    fn of(pose: Pose2D) -> Self {
        Self {
            x: pose.x.to_bits(),
            y: pose.y.to_bits(),
            theta: pose.theta.to_bits(),
        }
    }

    #[inline]
    fn pose(self) -> Pose2D {
        Pose2D::new(
            f32::from_bits(self.x),
            f32::from_bits(self.y),
            f32::from_bits(self.theta),
        )
    }
}

/// Everything a search run produces.
///
/// On failure `waypoints` and `actions` are empty and `cost` is +inf; the
/// explored trace is always populated (append-only, in pop order) for
/// diagnostics and animation.
#[derive(Clone, Debug)]
pub struct SearchReport {
    /// Terminal state of the run
    pub outcome: SearchOutcome,
    /// Every popped state, in pop order
    pub explored: Vec<Pose2D>,
    /// Backtracked start-to-goal waypoints (empty on failure)
    pub waypoints: Vec<Pose2D>,
    /// `actions[i]` is the body twist leaving `waypoints[i]`
    pub actions: Vec<BodyTwist>,
    /// Ledger distance of the accepting state (+inf on failure)
    pub cost: f32,
    /// Number of pops performed
    pub steps: usize,
}

/// Weighted A* planner for the differential-drive vehicle.
///
/// A planner instance is built per query and consumed by [`search`]
/// (`self` by value): frontier, ledger and dedup state are never shared
/// or reused across runs.
///
/// [`search`]: KinematicPlanner::search
#[derive(Debug)]
pub struct KinematicPlanner {
    scene: Scene,
    model: DriveModel,
    actions: [WheelAction; 8],
    start: Pose2D,
    goal: WorldPoint,
    heuristic_weight: f32,
    goal_tolerance_sq: f32,
    step_limit: usize,
    dedup: DedupIndex,
    ledger: CostLedger<StateKey, BodyTwist>,
}

impl KinematicPlanner {
    /// Build a planner for one query, validating the endpoints.
    ///
    /// Fails fast with [`MargaError::InvalidStart`] or
    /// [`MargaError::InvalidGoal`] if either endpoint is out of bounds
    /// (after margin shrink) or inside an inflated obstacle.
    pub fn new(scene: Scene, config: &PlannerConfig) -> Result<Self> {
        let [sx, sy, stheta] = config.query.start;
        let [gx, gy] = config.query.goal;

        if !scene.is_free(sx, sy) {
            return Err(MargaError::InvalidStart { x: sx, y: sy });
        }
        if !scene.is_free(gx, gy) {
            return Err(MargaError::InvalidGoal { x: gx, y: gy });
        }

        let [rpm_low, rpm_high] = config.query.wheel_rpm;

        Ok(Self {
            scene,
            model: DriveModel::new(
                config.robot.wheel_radius,
                config.robot.wheel_base,
                config.search.substeps,
            ),
            actions: action_table(rpm_low, rpm_high),
            start: Pose2D::new(sx, sy, stheta),
            goal: WorldPoint::new(gx, gy),
            heuristic_weight: config.search.heuristic_weight,
            goal_tolerance_sq: config.search.goal_tolerance_sq,
            step_limit: config.search.step_limit,
            dedup: DedupIndex::new(config.search.grid_resolution),
            ledger: CostLedger::new(),
        })
    }

    /// Weighted Euclidean cost-to-go estimate.
    #[inline]
    fn heuristic(&self, x: f32, y: f32) -> f32 {
        self.heuristic_weight * self.goal.distance(&WorldPoint::new(x, y))
    }

    /// Run the search to completion (or to the step ceiling).
    pub fn search(mut self) -> SearchReport {
        let start_key = StateKey::of(self.start);
        self.ledger
            .seed(start_key, self.heuristic(self.start.x, self.start.y));

        let mut frontier = BinaryHeap::new();
        let mut seq: u64 = 0;
        frontier.push(FrontierNode {
            distance: self.ledger.distance(&start_key),
            cost_to_come: 0.0,
            seq,
            key: start_key,
        });

        let mut explored = Vec::new();
        let mut accept: Option<StateKey> = None;
        let mut outcome = SearchOutcome::Exhausted;
        let mut steps = 0;

        while let Some(node) = frontier.pop() {
            let current = node.key;
            let pose = current.pose();

            // A cell is expanded at most once, even if a cheaper path to
            // it was relaxed after it entered the frontier.
            if self.dedup.is_visited(pose.x, pose.y) {
                continue;
            }
            self.dedup.mark_visited(pose.x, pose.y);
            self.dedup.touch_coarse(pose.x, pose.y);
            explored.push(pose);
            steps += 1;

            if self.goal.distance_squared(&pose.position()) < self.goal_tolerance_sq {
                accept = Some(current);
                outcome = SearchOutcome::Succeeded;
                break;
            }

            if steps >= self.step_limit {
                warn!(steps, "step ceiling reached before goal");
                outcome = SearchOutcome::StepLimitExceeded;
                break;
            }

            for action in self.actions {
                let edge = self
                    .model
                    .integrate(pose, action, &self.scene, &mut self.dedup);
                if !edge.feasible {
                    continue;
                }
                let end = edge.pose;
                if !self.scene.is_free(end.x, end.y) || self.dedup.is_visited(end.x, end.y) {
                    continue;
                }

                let cost_to_go = self.heuristic(end.x, end.y);
                let end_key = StateKey::of(end);
                if self
                    .ledger
                    .relax(end_key, current, edge.twist, action.weight, edge.cost, cost_to_go)
                {
                    seq += 1;
                    frontier.push(FrontierNode {
                        distance: self.ledger.distance(&end_key),
                        cost_to_come: self.ledger.cost_to_come(&end_key),
                        seq,
                        key: end_key,
                    });
                }
            }
        }

        let (waypoints, actions, cost) = match accept {
            Some(key) => {
                let (states, actions) = self.ledger.backtrack(key);
                let waypoints: Vec<Pose2D> = states.into_iter().map(StateKey::pose).collect();
                (waypoints, actions, self.ledger.distance(&key))
            }
            None => (Vec::new(), Vec::new(), f32::INFINITY),
        };

        match outcome {
            SearchOutcome::Succeeded => info!(
                steps,
                waypoints = waypoints.len(),
                cost,
                "goal reached"
            ),
            SearchOutcome::Exhausted => warn!(steps, "frontier exhausted, goal unreachable"),
            SearchOutcome::StepLimitExceeded => {}
        }
        debug!(visited = self.dedup.visited_len(), "search finished");

        SearchReport {
            outcome,
            explored,
            waypoints,
            actions,
            cost,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene;

    fn config(start: [f32; 3], goal: [f32; 2]) -> PlannerConfig {
        let mut config = PlannerConfig::default();
        config.query.start = start;
        config.query.goal = goal;
        config
    }

    #[test]
    fn test_short_hop_succeeds() {
        let cfg = config([0.0, -450.0, 0.0], [60.0, -450.0]);
        let scene = scene::kinematic_arena(cfg.effective_margin());
        let report = KinematicPlanner::new(scene, &cfg).unwrap().search();

        assert_eq!(report.outcome, SearchOutcome::Succeeded);
        assert!(report.cost.is_finite());
        assert!(!report.waypoints.is_empty());
        assert_eq!(report.actions.len(), report.waypoints.len() - 1);
    }

    #[test]
    fn test_waypoints_start_at_start_and_end_near_goal() {
        let cfg = config([0.0, -450.0, 0.0], [62.0, -450.0]);
        let scene = scene::kinematic_arena(cfg.effective_margin());
        let report = KinematicPlanner::new(scene, &cfg).unwrap().search();

        assert_eq!(report.outcome, SearchOutcome::Succeeded);
        let first = report.waypoints.first().unwrap();
        assert_eq!((first.x, first.y), (0.0, -450.0));

        let last = report.waypoints.last().unwrap();
        let goal = WorldPoint::new(62.0, -450.0);
        assert!(goal.distance_squared(&last.position()) < cfg.search.goal_tolerance_sq);
    }

    #[test]
    fn test_start_inside_obstacle_fails_fast() {
        let cfg = config([0.0, 0.0, 0.0], [400.0, 400.0]);
        let scene = scene::kinematic_arena(cfg.effective_margin());
        match KinematicPlanner::new(scene, &cfg) {
            Err(MargaError::InvalidStart { x, y }) => {
                assert_eq!((x, y), (0.0, 0.0));
            }
            other => panic!("expected InvalidStart, got {other:?}"),
        }
    }

    #[test]
    fn test_goal_outside_bounds_fails_fast() {
        let cfg = config([-400.0, -400.0, 0.0], [499.0, 0.0]);
        let scene = scene::kinematic_arena(cfg.effective_margin());
        assert!(matches!(
            KinematicPlanner::new(scene, &cfg),
            Err(MargaError::InvalidGoal { .. })
        ));
    }

    #[test]
    fn test_step_ceiling_of_one() {
        let mut cfg = config([-400.0, -400.0, 0.0], [400.0, 400.0]);
        cfg.search.step_limit = 1;
        let scene = scene::kinematic_arena(cfg.effective_margin());
        let report = KinematicPlanner::new(scene, &cfg).unwrap().search();

        assert_eq!(report.outcome, SearchOutcome::StepLimitExceeded);
        assert_eq!(report.explored.len(), 1);
        assert!(report.waypoints.is_empty());
        assert!(report.cost.is_infinite());
    }

    #[test]
    fn test_unreachable_goal_exhausts() {
        // Small workspace split by a full-height wall: the right half is
        // unreachable and the left half exhausts quickly.
        let wall = crate::scene::Obstacle::polygon(&[
            (10.0, -60.0),
            (10.0, 60.0),
            (15.0, 60.0),
            (15.0, -60.0),
        ]);
        let cfg = config([-40.0, -40.0, 0.0], [40.0, 40.0]);
        let scene = Scene::new((-50.0, 50.0), (-50.0, 50.0), 5.0, &[wall]);
        let report = KinematicPlanner::new(scene, &cfg).unwrap().search();

        assert_eq!(report.outcome, SearchOutcome::Exhausted);
        assert!(report.waypoints.is_empty());
        assert!(report.cost.is_infinite());
        assert!(!report.explored.is_empty());
    }
}
