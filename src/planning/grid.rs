//! Degenerate grid variant of the search: 8-connected unit moves over
//! integer cells, no kinematic integration, exact-cell goal test.

use std::collections::BinaryHeap;

use tracing::{info, warn};

use super::{CostLedger, DedupIndex, FrontierNode, SearchOutcome};
use crate::error::{MargaError, Result};
use crate::scene::Scene;

const DIAGONAL: f32 = 1.4142;

/// Integer cell state for the grid variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: i32,
    pub col: i32,
}

impl GridCell {
    /// Create a new cell
    #[inline]
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Euclidean distance to another cell
    #[inline]
    fn distance(&self, other: &GridCell) -> f32 {
        let dr = (self.row - other.row) as f32;
        let dc = (self.col - other.col) as f32;
        (dr * dr + dc * dc).sqrt()
    }
}

/// One entry of the grid action table: a cell offset plus its edge weight.
#[derive(Clone, Copy, Debug)]
struct GridMove {
    dr: i32,
    dc: i32,
    weight: f32,
}

/// Cardinal moves cost 1, diagonal moves cost sqrt(2).
const GRID_MOVES: [GridMove; 8] = [
    GridMove { dr: 0, dc: -1, weight: 1.0 },
    GridMove { dr: 0, dc: 1, weight: 1.0 },
    GridMove { dr: -1, dc: 0, weight: 1.0 },
    GridMove { dr: 1, dc: 0, weight: 1.0 },
    GridMove { dr: 1, dc: 1, weight: DIAGONAL },
    GridMove { dr: -1, dc: 1, weight: DIAGONAL },
    GridMove { dr: -1, dc: -1, weight: DIAGONAL },
    GridMove { dr: 1, dc: -1, weight: DIAGONAL },
];

/// Result of a grid search run.
#[derive(Clone, Debug)]
pub struct GridReport {
    /// Terminal state of the run
    pub outcome: SearchOutcome,
    /// Every popped cell, in pop order
    pub explored: Vec<GridCell>,
    /// Backtracked start-to-goal cells (empty on failure)
    pub path: Vec<GridCell>,
    /// True path cost of the goal cell (+inf on failure)
    pub cost: f32,
    /// Number of pops performed
    pub steps: usize,
}

/// 8-connected A* planner over integer cells.
///
/// Consumed by [`search`](GridPlanner::search); one instance per query.
pub struct GridPlanner {
    scene: Scene,
    start: GridCell,
    goal: GridCell,
    heuristic_weight: f32,
    step_limit: usize,
    dedup: DedupIndex,
    ledger: CostLedger<GridCell, ()>,
}

impl GridPlanner {
    /// Build a grid planner, validating both endpoints against the scene.
    pub fn new(scene: Scene, start: GridCell, goal: GridCell, step_limit: usize) -> Result<Self> {
        if !scene.is_free(start.row as f32, start.col as f32) {
            return Err(MargaError::InvalidStart {
                x: start.row as f32,
                y: start.col as f32,
            });
        }
        if !scene.is_free(goal.row as f32, goal.col as f32) {
            return Err(MargaError::InvalidGoal {
                x: goal.row as f32,
                y: goal.col as f32,
            });
        }

        Ok(Self {
            scene,
            start,
            goal,
            heuristic_weight: 1.0,
            step_limit,
            dedup: DedupIndex::new(1.0),
            ledger: CostLedger::new(),
        })
    }

    /// Override the heuristic weight (1.0 keeps the search admissible).
    pub fn with_heuristic_weight(mut self, weight: f32) -> Self {
        self.heuristic_weight = weight;
        self
    }

    #[inline]
    fn heuristic(&self, cell: &GridCell) -> f32 {
        self.heuristic_weight * cell.distance(&self.goal)
    }

    /// Run the search to completion (or to the step ceiling).
    pub fn search(mut self) -> GridReport {
        self.ledger.seed(self.start, self.heuristic(&self.start));

        let mut frontier = BinaryHeap::new();
        let mut seq: u64 = 0;
        frontier.push(FrontierNode {
            distance: self.ledger.distance(&self.start),
            cost_to_come: 0.0,
            seq,
            key: self.start,
        });

        let mut explored = Vec::new();
        let mut outcome = SearchOutcome::Exhausted;
        let mut steps = 0;

        while let Some(node) = frontier.pop() {
            let cell = node.key;
            let (x, y) = (cell.row as f32, cell.col as f32);

            if self.dedup.is_visited(x, y) {
                continue;
            }
            self.dedup.mark_visited(x, y);
            explored.push(cell);
            steps += 1;

            // Exact cell match, unlike the kinematic goal region
            if cell == self.goal {
                outcome = SearchOutcome::Succeeded;
                break;
            }

            if steps >= self.step_limit {
                warn!(steps, "step ceiling reached before goal");
                outcome = SearchOutcome::StepLimitExceeded;
                break;
            }

            for mv in GRID_MOVES {
                let next = GridCell::new(cell.row + mv.dr, cell.col + mv.dc);
                let (nx, ny) = (next.row as f32, next.col as f32);
                if !self.scene.is_free(nx, ny) || self.dedup.is_visited(nx, ny) {
                    continue;
                }

                let cost_to_go = self.heuristic(&next);
                if self.ledger.relax(next, cell, (), mv.weight, 0.0, cost_to_go) {
                    seq += 1;
                    frontier.push(FrontierNode {
                        distance: self.ledger.distance(&next),
                        cost_to_come: self.ledger.cost_to_come(&next),
                        seq,
                        key: next,
                    });
                }
            }
        }

        let (path, cost) = if outcome == SearchOutcome::Succeeded {
            let (path, _) = self.ledger.backtrack(self.goal);
            // Heuristic is zero at the goal, so its distance is true cost
            (path, self.ledger.distance(&self.goal))
        } else {
            (Vec::new(), f32::INFINITY)
        };

        info!(steps, cost, "grid search finished");

        GridReport {
            outcome,
            explored,
            path,
            cost,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene;

    #[test]
    fn test_straight_corridor() {
        let scene = Scene::new((1.0, 20.0), (1.0, 20.0), 0.0, &[]);
        let report = GridPlanner::new(scene, GridCell::new(5, 5), GridCell::new(5, 15), 500_000)
            .unwrap()
            .search();

        assert_eq!(report.outcome, SearchOutcome::Succeeded);
        // Empty workspace: pure cardinal run costs exactly 10
        assert!((report.cost - 10.0).abs() < 1e-3);
        assert_eq!(report.path.first(), Some(&GridCell::new(5, 5)));
        assert_eq!(report.path.last(), Some(&GridCell::new(5, 15)));
        assert_eq!(report.path.len(), 11);
    }

    #[test]
    fn test_diagonal_shortcut_is_used() {
        let scene = Scene::new((1.0, 20.0), (1.0, 20.0), 0.0, &[]);
        let report = GridPlanner::new(scene, GridCell::new(2, 2), GridCell::new(10, 10), 500_000)
            .unwrap()
            .search();

        assert_eq!(report.outcome, SearchOutcome::Succeeded);
        assert!((report.cost - 8.0 * DIAGONAL).abs() < 1e-3);
    }

    #[test]
    fn test_consecutive_path_cells_are_adjacent() {
        let scene = scene::grid_course(0.0);
        let report = GridPlanner::new(scene, GridCell::new(50, 50), GridCell::new(150, 250), 500_000)
            .unwrap()
            .search();

        assert_eq!(report.outcome, SearchOutcome::Succeeded);
        for pair in report.path.windows(2) {
            let dr = (pair[1].row - pair[0].row).abs();
            let dc = (pair[1].col - pair[0].col).abs();
            assert!(dr <= 1 && dc <= 1 && dr + dc > 0);
        }
    }

    #[test]
    fn test_goal_inside_obstacle_is_rejected() {
        let scene = scene::grid_course(0.0);
        let result = GridPlanner::new(scene, GridCell::new(50, 50), GridCell::new(150, 225), 500_000);
        assert!(matches!(result, Err(MargaError::InvalidGoal { .. })));
    }

    #[test]
    fn test_step_ceiling() {
        let scene = Scene::new((1.0, 20.0), (1.0, 20.0), 0.0, &[]);
        let report = GridPlanner::new(scene, GridCell::new(2, 2), GridCell::new(10, 10), 1)
            .unwrap()
            .search();

        assert_eq!(report.outcome, SearchOutcome::StepLimitExceeded);
        assert_eq!(report.explored, vec![GridCell::new(2, 2)]);
        assert!(report.path.is_empty());
    }

    #[test]
    fn test_walled_goal_exhausts() {
        // Four thin rectangles seal the cells around (10, 10) into a
        // pocket the search cannot enter.
        let walls = [
            scene::Obstacle::polygon(&[(6.5, 6.5), (6.5, 13.5), (7.5, 13.5), (7.5, 6.5)]),
            scene::Obstacle::polygon(&[(12.5, 6.5), (12.5, 13.5), (13.5, 13.5), (13.5, 6.5)]),
            scene::Obstacle::polygon(&[(6.5, 6.5), (13.5, 6.5), (13.5, 7.5), (6.5, 7.5)]),
            scene::Obstacle::polygon(&[(6.5, 12.5), (13.5, 12.5), (13.5, 13.5), (6.5, 13.5)]),
        ];
        let scene = Scene::new((1.0, 20.0), (1.0, 20.0), 0.0, &walls);
        let report = GridPlanner::new(scene, GridCell::new(2, 2), GridCell::new(10, 10), 500_000)
            .unwrap()
            .search();

        assert_eq!(report.outcome, SearchOutcome::Exhausted);
        assert!(report.path.is_empty());
        assert!(report.cost.is_infinite());
    }
}
