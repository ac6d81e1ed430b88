//! Closed-loop actuation context, downstream of the planner.
//!
//! Issues velocity commands that steer the vehicle toward a waypoint
//! using a rotate-then-translate bang-bang policy. Pose feedback enters
//! through an explicit context object rather than free-floating state:
//! the embedding owns the feedback subscription and calls
//! [`DriveContext::update_pose`], then pulls the next command each tick.
//! Nothing here feeds back into the search.

use crate::pose::{Pose2D, WorldPoint};
use crate::utils::normalize_angle;

/// A velocity command for the vehicle base.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityCommand {
    /// Forward velocity
    pub linear: f32,
    /// Angular rate, CCW positive
    pub angular: f32,
}

/// Sink for velocity commands (robot driver, simulator, log, ...).
pub trait VelocitySink {
    fn publish(&mut self, command: VelocityCommand);
}

/// Tuning for the waypoint controller.
#[derive(Clone, Copy, Debug)]
pub struct ActuationConfig {
    /// Heading error above which the vehicle turns in place (radians)
    pub heading_tolerance: f32,
    /// Per-axis position error below which a waypoint counts as reached
    pub position_tolerance: f32,
    /// Turn-in-place angular rate (rad/s)
    pub turn_rate: f32,
    /// Straight-drive speed
    pub drive_speed: f32,
}

impl Default for ActuationConfig {
    fn default() -> Self {
        Self {
            heading_tolerance: 0.1,
            position_tolerance: 0.01,
            turn_rate: 0.25,
            drive_speed: 0.25,
        }
    }
}

/// Pose-tracking context for waypoint driving.
#[derive(Clone, Copy, Debug)]
pub struct DriveContext {
    config: ActuationConfig,
    pose: Pose2D,
}

impl DriveContext {
    /// Create a context at the given initial pose.
    pub fn new(config: ActuationConfig, initial_pose: Pose2D) -> Self {
        Self {
            config,
            pose: initial_pose,
        }
    }

    /// Feed a pose estimate from the feedback subscription.
    pub fn update_pose(&mut self, pose: Pose2D) {
        self.pose = pose;
    }

    /// The most recent pose estimate.
    pub fn pose(&self) -> Pose2D {
        self.pose
    }

    /// Compute the next command toward `goal`, or `None` once both
    /// position errors are within tolerance (arrived).
    pub fn command_toward(&self, goal: WorldPoint) -> Option<VelocityCommand> {
        let dx = goal.x - self.pose.x;
        let dy = goal.y - self.pose.y;
        if dx.abs() < self.config.position_tolerance && dy.abs() < self.config.position_tolerance {
            return None;
        }

        let heading_error = normalize_angle(dy.atan2(dx) - self.pose.theta);
        let command = if heading_error.abs() > self.config.heading_tolerance {
            VelocityCommand {
                linear: 0.0,
                angular: self.config.turn_rate * heading_error.signum(),
            }
        } else {
            VelocityCommand {
                linear: self.config.drive_speed,
                angular: 0.0,
            }
        };
        Some(command)
    }

    /// Drive one control tick: publish the command for `goal` if not yet
    /// arrived. Returns `true` once the waypoint is reached.
    pub fn step<S: VelocitySink>(&self, goal: WorldPoint, sink: &mut S) -> bool {
        match self.command_toward(goal) {
            Some(command) => {
                sink.publish(command);
                false
            }
            None => {
                // Explicit stop on arrival
                sink.publish(VelocityCommand::default());
                true
            }
        }
    }
}
