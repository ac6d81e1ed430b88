//! Differential-drive forward kinematics and edge integration.
//!
//! The planner expands edges by numerically integrating wheel speeds
//! rather than taking unit grid steps: each action is a wheel-RPM pair,
//! integrated over a fixed number of forward-Euler substeps, with every
//! intermediate pose validated against the obstacle oracle so an edge
//! cannot tunnel through a thin obstacle.

use crate::planning::DedupIndex;
use crate::pose::Pose2D;
use crate::scene::Scene;
use crate::utils::rpm_to_rad_s;

const SQRT_2: f32 = 1.4142;

/// One entry of the fixed action set: a wheel-RPM pair plus its nominal
/// edge weight (independent of the integrated trajectory cost).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelAction {
    /// Left wheel speed in RPM
    pub left_rpm: f32,
    /// Right wheel speed in RPM
    pub right_rpm: f32,
    /// Nominal cost-to-come contribution for taking this action
    pub weight: f32,
}

/// Build the eight-action table from the configured RPM pair.
///
/// Straight moves weigh `rpm * sqrt(2)`, single-wheel arcs weigh the
/// driving wheel's RPM, and mixed arcs weigh `max(low, high) * sqrt(2)`.
pub fn action_table(rpm_low: f32, rpm_high: f32) -> [WheelAction; 8] {
    let mixed = rpm_low.max(rpm_high) * SQRT_2;
    let action = |left_rpm: f32, right_rpm: f32, weight: f32| WheelAction {
        left_rpm,
        right_rpm,
        weight,
    };
    [
        action(0.0, rpm_low, rpm_low),
        action(rpm_low, 0.0, rpm_low),
        action(rpm_low, rpm_low, rpm_low * SQRT_2),
        action(0.0, rpm_high, rpm_high),
        action(rpm_high, 0.0, rpm_high),
        action(rpm_high, rpm_high, rpm_high * SQRT_2),
        action(rpm_low, rpm_high, mixed),
        action(rpm_high, rpm_low, mixed),
    ]
}

/// Body velocity produced by an action; handed to the actuation
/// collaborator as the command that reproduces the edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyTwist {
    /// X velocity in workspace units per second
    pub vx: f32,
    /// Y velocity in workspace units per second
    pub vy: f32,
    /// Angular rate in rad/s
    pub omega: f32,
}

/// Result of integrating one action from one pose.
#[derive(Clone, Copy, Debug)]
pub struct Integration {
    /// Endpoint pose after the full substep count
    pub pose: Pose2D,
    /// Accumulated Euclidean displacement along the edge
    pub cost: f32,
    /// Body velocity at the end of the edge
    pub twist: BodyTwist,
    /// Collision-free along every substep, in bounds, and not a coarse
    /// duplicate of an already-seen endpoint
    pub feasible: bool,
}

/// Forward kinematic model of the differential-drive vehicle.
#[derive(Clone, Copy, Debug)]
pub struct DriveModel {
    /// Wheel radius in workspace units
    wheel_radius: f32,
    /// Distance between the wheels in workspace units
    wheel_base: f32,
    /// Euler substeps per edge
    substeps: u32,
}

impl DriveModel {
    /// Create a drive model.
    pub fn new(wheel_radius: f32, wheel_base: f32, substeps: u32) -> Self {
        Self {
            wheel_radius,
            wheel_base,
            substeps,
        }
    }

    /// Integrate one action over the fixed substep count.
    ///
    /// Every intermediate pose is validated against the scene; the edge is
    /// infeasible if any substep leaves the workspace or enters an
    /// obstacle. The endpoint is then checked against (and recorded in)
    /// the dedup index's coarse key set, which rejects endpoints
    /// effectively identical to ones this search has already touched.
    pub fn integrate(
        &self,
        from: Pose2D,
        action: WheelAction,
        scene: &Scene,
        dedup: &mut DedupIndex,
    ) -> Integration {
        let ul = rpm_to_rad_s(action.left_rpm);
        let ur = rpm_to_rad_s(action.right_rpm);
        let omega = (self.wheel_radius / self.wheel_base) * (ur - ul);
        let dt = 1.0 / self.substeps as f32;

        let mut x = from.x;
        let mut y = from.y;
        let mut theta = from.theta;
        let mut cost = 0.0;
        let mut vx = 0.0;
        let mut vy = 0.0;
        let mut feasible = true;

        for _ in 0..self.substeps {
            vx = self.wheel_radius * 0.5 * (ul + ur) * theta.cos();
            vy = self.wheel_radius * 0.5 * (ul + ur) * theta.sin();
            let dx = vx * dt;
            let dy = vy * dt;
            x += dx;
            y += dy;
            theta += omega * dt;
            cost += (dx * dx + dy * dy).sqrt();

            if !scene.is_free(x, y) {
                feasible = false;
            }
        }

        // Coarse duplicate check happens after integration so the key is
        // recorded even for infeasible edges, matching the visited-set's
        // append-only discipline.
        if !dedup.touch_coarse(x, y) {
            feasible = false;
        }

        Integration {
            pose: Pose2D::new(x, y, theta),
            cost,
            twist: BodyTwist { vx, vy, omega },
            feasible,
        }
    }
}
