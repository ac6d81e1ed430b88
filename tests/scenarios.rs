//! End-to-end planning scenarios over the built-in arenas.

use marga_plan::motion::{BodyTwist, DriveModel, WheelAction};
use marga_plan::planning::DedupIndex;
use marga_plan::{
    grid_course, kinematic_arena, GridCell, GridPlanner, KinematicPlanner, MargaError,
    PlannerConfig, Pose2D, SearchOutcome, WorldPoint,
};

fn kinematic_config(start: [f32; 3], goal: [f32; 2]) -> PlannerConfig {
    let mut config = PlannerConfig::default();
    config.query.start = start;
    config.query.goal = goal;
    config
}

/// Recover the wheel action that produced a body twist.
///
/// linear speed = wheel_radius / 2 * (ul + ur) and
/// omega = wheel_radius / wheel_base * (ur - ul), both invertible.
fn action_from_twist(twist: BodyTwist, config: &PlannerConfig) -> WheelAction {
    let r = config.robot.wheel_radius;
    let base = config.robot.wheel_base;
    let speed = (twist.vx * twist.vx + twist.vy * twist.vy).sqrt();

    let sum = 2.0 * speed / r;
    let diff = twist.omega * base / r;
    let ul = (sum - diff) / 2.0;
    let ur = (sum + diff) / 2.0;

    let to_rpm = |rad_s: f32| rad_s * 60.0 / (2.0 * std::f32::consts::PI);
    WheelAction {
        left_rpm: to_rpm(ul),
        right_rpm: to_rpm(ur),
        weight: 0.0,
    }
}

#[test]
fn scenario_grid_course_success() {
    let scene = grid_course(0.0);
    let report = GridPlanner::new(scene, GridCell::new(50, 50), GridCell::new(150, 250), 500_000)
        .unwrap()
        .search();

    assert_eq!(report.outcome, SearchOutcome::Succeeded);
    assert!(report.cost.is_finite());
    assert_eq!(report.path.first(), Some(&GridCell::new(50, 50)));
    assert_eq!(report.path.last(), Some(&GridCell::new(150, 250)));

    // Diagonal-optimal bound for the empty region is 100*sqrt(2) + 100;
    // the ellipse on the straight line forces a small detour.
    let optimal = 100.0 * 1.4142 + 100.0;
    assert!(report.cost >= optimal - 1e-3);
    assert!(report.cost <= optimal * 1.25, "cost {} too far above bound", report.cost);
}

#[test]
fn scenario_kinematic_arena_success() {
    let config = kinematic_config([-400.0, -400.0, 0.0], [400.0, 400.0]);
    let scene = kinematic_arena(config.effective_margin());
    let report = KinematicPlanner::new(scene, &config).unwrap().search();

    assert_eq!(report.outcome, SearchOutcome::Succeeded);
    assert!(report.steps < 500_000);
    assert!(report.cost.is_finite());

    // Weighted heuristic is inadmissible, so only a loose bound holds
    let straight_line = WorldPoint::new(-400.0, -400.0).distance(&WorldPoint::new(400.0, 400.0));
    assert!(report.cost < straight_line * 10.0);

    // Endpoint properties
    let first = report.waypoints.first().unwrap();
    assert_eq!((first.x, first.y, first.theta), (-400.0, -400.0, 0.0));
    let last = report.waypoints.last().unwrap();
    let goal = WorldPoint::new(400.0, 400.0);
    assert!(goal.distance_squared(&last.position()) < config.search.goal_tolerance_sq);
}

#[test]
fn scenario_every_edge_resimulates_collision_free() {
    let config = kinematic_config([0.0, -450.0, 0.0], [62.0, -450.0]);
    let scene = kinematic_arena(config.effective_margin());
    let report = KinematicPlanner::new(scene.clone(), &config).unwrap().search();

    assert_eq!(report.outcome, SearchOutcome::Succeeded);
    assert_eq!(report.actions.len(), report.waypoints.len() - 1);

    let model = DriveModel::new(
        config.robot.wheel_radius,
        config.robot.wheel_base,
        config.search.substeps,
    );

    for (i, twist) in report.actions.iter().enumerate() {
        let action = action_from_twist(*twist, &config);
        // Fresh dedup per edge: only collision validity is under test
        let mut dedup = DedupIndex::new(config.search.grid_resolution);
        let edge = model.integrate(report.waypoints[i], action, &scene, &mut dedup);

        assert!(edge.feasible, "edge {} re-simulated as infeasible", i);
        let end = report.waypoints[i + 1];
        assert!((edge.pose.x - end.x).abs() < 1e-2, "edge {} x drift", i);
        assert!((edge.pose.y - end.y).abs() < 1e-2, "edge {} y drift", i);
        assert!((edge.pose.theta - end.theta).abs() < 1e-3, "edge {} theta drift", i);
    }
}

#[test]
fn scenario_identical_runs_are_identical() {
    let config = kinematic_config([0.0, -450.0, 0.0], [62.0, -450.0]);

    let run = || {
        let scene = kinematic_arena(config.effective_margin());
        KinematicPlanner::new(scene, &config).unwrap().search()
    };
    let first = run();
    let second = run();

    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.explored, second.explored);
    assert_eq!(first.waypoints, second.waypoints);
    assert_eq!(first.cost, second.cost);
}

#[test]
fn scenario_goal_at_obstacle_centroid_is_invalid() {
    // Kinematic arena: center circle's centroid
    let config = kinematic_config([-400.0, -400.0, 0.0], [0.0, 0.0]);
    let scene = kinematic_arena(config.effective_margin());
    assert!(matches!(
        KinematicPlanner::new(scene, &config),
        Err(MargaError::InvalidGoal { .. })
    ));

    // Grid course: circle at (150, 225)
    let result = GridPlanner::new(
        grid_course(0.0),
        GridCell::new(50, 50),
        GridCell::new(150, 225),
        500_000,
    );
    assert!(matches!(result, Err(MargaError::InvalidGoal { .. })));
}

#[test]
fn scenario_out_of_bounds_start_is_invalid() {
    let config = kinematic_config([-499.0, -499.0, 0.0], [400.0, 400.0]);
    let scene = kinematic_arena(config.effective_margin());
    assert!(matches!(
        KinematicPlanner::new(scene, &config),
        Err(MargaError::InvalidStart { .. })
    ));
}

#[test]
fn scenario_step_ceiling_of_one() {
    let mut config = kinematic_config([-400.0, -400.0, 0.0], [400.0, 400.0]);
    config.search.step_limit = 1;
    let scene = kinematic_arena(config.effective_margin());
    let report = KinematicPlanner::new(scene, &config).unwrap().search();

    assert_eq!(report.outcome, SearchOutcome::StepLimitExceeded);
    assert_eq!(report.explored.len(), 1);
    assert_eq!(
        report.explored[0],
        Pose2D::new(-400.0, -400.0, 0.0)
    );
    assert!(report.waypoints.is_empty());
    assert!(report.cost.is_infinite());
}
