//! Configuration loading for MargaPlan

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub robot: RobotConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Vehicle physical parameters, in workspace units
#[derive(Clone, Debug, Deserialize)]
pub struct RobotConfig {
    /// Wheel radius (default: 3.3)
    #[serde(default = "default_wheel_radius")]
    pub wheel_radius: f32,

    /// Distance between the wheels (default: 29.0)
    #[serde(default = "default_wheel_base")]
    pub wheel_base: f32,

    /// Body radius used for obstacle inflation (default: 22.0)
    #[serde(default = "default_body_radius")]
    pub body_radius: f32,
}

/// Search tuning parameters
#[derive(Clone, Debug, Deserialize)]
pub struct SearchConfig {
    /// Heuristic weight; > 1.0 trades optimality for speed (default: 3.0)
    #[serde(default = "default_heuristic_weight")]
    pub heuristic_weight: f32,

    /// Pop ceiling before the search gives up (default: 500000)
    #[serde(default = "default_step_limit")]
    pub step_limit: usize,

    /// Euler substeps per integrated edge (default: 100)
    #[serde(default = "default_substeps")]
    pub substeps: u32,

    /// Squared distance for goal acceptance (default: 15.0)
    #[serde(default = "default_goal_tolerance_sq")]
    pub goal_tolerance_sq: f32,

    /// Visited-set cells per workspace unit (default: 1.0)
    #[serde(default = "default_grid_resolution")]
    pub grid_resolution: f32,
}

/// One planning query: start, goal and action parameters
#[derive(Clone, Debug, Deserialize)]
pub struct QueryConfig {
    /// Start pose [x, y, theta]
    #[serde(default = "default_start")]
    pub start: [f32; 3],

    /// Goal position [x, y]
    #[serde(default = "default_goal")]
    pub goal: [f32; 2],

    /// Low and high wheel speeds in RPM (default: [40, 60])
    #[serde(default = "default_wheel_rpm")]
    pub wheel_rpm: [f32; 2],

    /// Requested clearance beyond the body radius (default: 0.0)
    #[serde(default)]
    pub clearance: f32,
}

/// Output configuration
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Path for the waypoint CSV consumed by the visualization sink
    #[serde(default = "default_waypoints_path")]
    pub waypoints_path: String,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            wheel_radius: default_wheel_radius(),
            wheel_base: default_wheel_base(),
            body_radius: default_body_radius(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: default_heuristic_weight(),
            step_limit: default_step_limit(),
            substeps: default_substeps(),
            goal_tolerance_sq: default_goal_tolerance_sq(),
            grid_resolution: default_grid_resolution(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            goal: default_goal(),
            wheel_rpm: default_wheel_rpm(),
            clearance: 0.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            waypoints_path: default_waypoints_path(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            robot: RobotConfig::default(),
            search: SearchConfig::default(),
            query: QueryConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

// Default value functions
fn default_wheel_radius() -> f32 {
    3.3
}
fn default_wheel_base() -> f32 {
    29.0
}
fn default_body_radius() -> f32 {
    22.0
}
fn default_heuristic_weight() -> f32 {
    3.0
}
fn default_step_limit() -> usize {
    500_000
}
fn default_substeps() -> u32 {
    100
}
fn default_goal_tolerance_sq() -> f32 {
    15.0
}
fn default_grid_resolution() -> f32 {
    1.0
}
fn default_start() -> [f32; 3] {
    [-400.0, -400.0, 0.0]
}
fn default_goal() -> [f32; 2] {
    [400.0, 400.0]
}
fn default_wheel_rpm() -> [f32; 2] {
    [40.0, 60.0]
}
fn default_waypoints_path() -> String {
    "output/waypoints.csv".to_string()
}

impl PlannerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PlannerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Requested clearance padded by 5 units and capped at 10.
    pub fn effective_clearance(&self) -> f32 {
        (self.query.clearance + 5.0).min(10.0)
    }

    /// Total obstacle/bounds inflation: body radius + effective clearance.
    pub fn effective_margin(&self) -> f32 {
        self.robot.body_radius + self.effective_clearance()
    }
}
