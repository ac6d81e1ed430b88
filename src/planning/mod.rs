//! Weighted best-first search over the vehicle's state space.
//!
//! This module provides:
//! - Cost ledger with lazy relaxation and predecessor links
//! - State deduplication (visited set + coarse near-duplicate filter)
//! - Kinematic weighted-A* driver expanding wheel-speed actions
//! - Degenerate 8-connected grid driver (no kinematic integration)

mod astar;
mod dedup;
mod grid;
mod ledger;

pub use astar::{KinematicPlanner, SearchReport};
pub use dedup::DedupIndex;
pub use grid::{GridCell, GridPlanner, GridReport};
pub use ledger::CostLedger;

use std::cmp::Ordering;

/// Terminal state of a search run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A state inside the goal region was popped
    Succeeded,
    /// The frontier emptied before the goal was reached
    Exhausted,
    /// The pop ceiling was hit; inconclusive, distinct from exhaustion
    StepLimitExceeded,
}

/// Frontier entry for the min-priority queue.
///
/// Ordered by total distance, ties broken by cost-to-come, then by
/// insertion sequence so identical inputs always pop in the same order.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrontierNode<K> {
    pub distance: f32,
    pub cost_to_come: f32,
    pub seq: u64,
    pub key: K,
}

impl<K> PartialEq for FrontierNode<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K> Eq for FrontierNode<K> {}

impl<K> Ord for FrontierNode<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lower distance = higher priority)
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                other
                    .cost_to_come
                    .partial_cmp(&self.cost_to_come)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<K> PartialOrd for FrontierNode<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
