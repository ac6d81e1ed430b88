//! MargaPlan - trajectory planning for a differential-drive vehicle
//!
//! Loads a planning query from a TOML config (or defaults), runs the
//! kinematic weighted-A* search over the built-in arena, and writes the
//! backtracked waypoints as CSV for the downstream visualization sink.

use std::fs;
use std::path::Path;

use tracing::{error, info};

use marga_plan::planning::SearchOutcome;
use marga_plan::{scene, KinematicPlanner, PlannerConfig, Result, SearchReport};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marga_plan=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = if args.len() > 1 {
        let config_path = Path::new(&args[1]);
        info!("Loading configuration from {:?}", config_path);
        PlannerConfig::load(config_path)?
    } else {
        info!("No config given, using defaults");
        PlannerConfig::default()
    };

    let margin = config.effective_margin();
    info!(
        start = ?config.query.start,
        goal = ?config.query.goal,
        rpm = ?config.query.wheel_rpm,
        margin,
        "planning"
    );

    let arena = scene::kinematic_arena(margin);
    let planner = KinematicPlanner::new(arena, &config)?;
    let report = planner.search();

    match report.outcome {
        SearchOutcome::Succeeded => {
            info!(
                cost = report.cost,
                waypoints = report.waypoints.len(),
                explored = report.explored.len(),
                "path found"
            );
            write_waypoints(&report, &config.output.waypoints_path)?;
        }
        SearchOutcome::Exhausted => {
            error!(
                explored = report.explored.len(),
                "no feasible path: frontier exhausted"
            );
        }
        SearchOutcome::StepLimitExceeded => {
            error!(
                steps = report.steps,
                "no path within the step ceiling (inconclusive)"
            );
        }
    }

    Ok(())
}

/// Write the solution waypoints as `x,y,theta` CSV rows.
fn write_waypoints(report: &SearchReport, path: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }

    let mut csv = String::from("x,y,theta\n");
    for pose in &report.waypoints {
        csv.push_str(&format!("{:.4},{:.4},{:.4}\n", pose.x, pose.y, pose.theta));
    }
    fs::write(path, csv)?;
    info!("waypoints written to {}", path);
    Ok(())
}
