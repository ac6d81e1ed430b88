//! MargaPlan - weighted A* trajectory planner for a differential-drive
//! vehicle in a bounded 2D workspace with static geometric obstacles.
//!
//! The planner couples a continuous-state best-first search with a
//! forward kinematic motion model: edges are produced by numerically
//! integrating wheel speeds, every integration substep is validated
//! against the obstacle oracle, and a discretized visited set keeps the
//! continuous state space finite. A weighted (> 1.0) Euclidean heuristic
//! trades optimality guarantees for search speed.
//!
//! An 8-connected grid variant with integer cells and no integration is
//! provided for coarse validation.
//!
//! Rendering/animation and robot actuation are downstream collaborators:
//! they consume the explored trace, waypoints and actions a search
//! produces but never feed back into it.

pub mod actuation;
pub mod config;
pub mod error;
pub mod motion;
pub mod planning;
pub mod pose;
pub mod scene;
pub mod utils;

pub use config::PlannerConfig;
pub use error::{MargaError, Result};
pub use planning::{
    GridCell, GridPlanner, GridReport, KinematicPlanner, SearchOutcome, SearchReport,
};
pub use pose::{Pose2D, WorldPoint};
pub use scene::{grid_course, kinematic_arena, Obstacle, Scene};
