//! State deduplication for the continuous-state search.
//!
//! Two independent structures, both required:
//!
//! - A **visited set** keyed by the position rounded to the search grid
//!   resolution, set exactly once when a state is popped as the current
//!   minimum. A visited cell is never re-expanded, even if a cheaper path
//!   to it is found later (preserved weighted-A* approximation).
//! - A **coarse key set** at half-cell resolution, marked for every state
//!   the search touches and checked inside the motion model to
//!   short-circuit near-duplicate endpoints regardless of heading. This is
//!   a heuristic optimization, not a correctness guarantee: it can
//!   suppress a state that another action would have reached more cheaply.

use std::collections::HashSet;

/// Visited set plus coarse near-duplicate filter.
#[derive(Debug)]
pub struct DedupIndex {
    visited: HashSet<(i32, i32)>,
    coarse: HashSet<(i32, i32)>,
    /// Cells per workspace unit for the visited set
    resolution: f32,
}

impl DedupIndex {
    /// Create an empty index with the given visited-set resolution.
    pub fn new(resolution: f32) -> Self {
        Self {
            visited: HashSet::new(),
            coarse: HashSet::new(),
            resolution,
        }
    }

    #[inline]
    fn visited_key(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (self.resolution * x).round() as i32,
            (self.resolution * y).round() as i32,
        )
    }

    // Half-cell granularity, finer than the visited set so near-boundary
    // states are not falsely merged.
    #[inline]
    fn coarse_key(x: f32, y: f32) -> (i32, i32) {
        ((x * 2.0).round() as i32, (y * 2.0).round() as i32)
    }

    /// Has the cell containing (x, y) been popped before?
    #[inline]
    pub fn is_visited(&self, x: f32, y: f32) -> bool {
        self.visited.contains(&self.visited_key(x, y))
    }

    /// Mark the cell containing (x, y) as popped.
    #[inline]
    pub fn mark_visited(&mut self, x: f32, y: f32) {
        let key = self.visited_key(x, y);
        self.visited.insert(key);
    }

    /// Mark the coarse key for (x, y), returning `false` if it was
    /// already present.
    #[inline]
    pub fn touch_coarse(&mut self, x: f32, y: f32) -> bool {
        self.coarse.insert(Self::coarse_key(x, y))
    }

    /// Number of visited cells (diagnostics).
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }
}
