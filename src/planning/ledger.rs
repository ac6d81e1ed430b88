//! Per-state cost bookkeeping: best-known cost-to-come, cost-to-go, total
//! distance, and predecessor links for path reconstruction.
//!
//! Generic over the state key and action type so the kinematic and grid
//! search drivers share one ledger. Entries are created lazily on first
//! relaxation (cost defaults to +inf), only ever decrease afterwards, and
//! are never deleted: the full ledger persists for the run's lifetime and
//! is what backtracking walks after success.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Copy, Debug)]
struct Entry<K, A> {
    distance: f32,
    cost_to_come: f32,
    cost_to_go: f32,
    predecessor: Option<(K, A)>,
}

/// Cost ledger for one in-flight search.
#[derive(Debug)]
pub struct CostLedger<K, A> {
    entries: HashMap<K, Entry<K, A>>,
}

impl<K: Eq + Hash + Copy, A: Copy> CostLedger<K, A> {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Seed the start state: zero cost-to-come, no predecessor.
    pub fn seed(&mut self, start: K, cost_to_go: f32) {
        self.entries.insert(
            start,
            Entry {
                distance: cost_to_go,
                cost_to_come: 0.0,
                cost_to_go,
                predecessor: None,
            },
        );
    }

    /// Best-known total distance for a state (+inf if never relaxed).
    #[inline]
    pub fn distance(&self, state: &K) -> f32 {
        self.entries
            .get(state)
            .map_or(f32::INFINITY, |e| e.distance)
    }

    /// Best-known cost-to-come for a state (+inf if never relaxed).
    #[inline]
    pub fn cost_to_come(&self, state: &K) -> f32 {
        self.entries
            .get(state)
            .map_or(f32::INFINITY, |e| e.cost_to_come)
    }

    /// Heuristic estimate recorded for a state (+inf if never relaxed).
    #[inline]
    pub fn cost_to_go(&self, state: &K) -> f32 {
        self.entries
            .get(state)
            .map_or(f32::INFINITY, |e| e.cost_to_go)
    }

    /// Attempt to relax `state` through `from` via `action`.
    ///
    /// The new cost-to-come is the predecessor's cost-to-come plus the
    /// action's nominal weight plus the integrated edge cost, so
    /// `distance == cost_to_come + cost_to_go` holds for every entry. If
    /// the new distance improves on the recorded one (default +inf), all
    /// fields and the predecessor are overwritten and `true` is returned;
    /// the caller must then push the state onto the frontier.
    pub fn relax(
        &mut self,
        state: K,
        from: K,
        action: A,
        weight: f32,
        integration_cost: f32,
        cost_to_go: f32,
    ) -> bool {
        let new_cost_to_come = self.cost_to_come(&from) + weight + integration_cost;
        let new_distance = new_cost_to_come + cost_to_go;

        if new_distance < self.distance(&state) {
            self.entries.insert(
                state,
                Entry {
                    distance: new_distance,
                    cost_to_come: new_cost_to_come,
                    cost_to_go,
                    predecessor: Some((from, action)),
                },
            );
            true
        } else {
            false
        }
    }

    /// Walk predecessor links from `accept` back to the seeded start and
    /// return the forward (start -> accept) state sequence with aligned
    /// actions: `actions[i]` is the action leaving `states[i]`, so there
    /// is one fewer action than states.
    pub fn backtrack(&self, accept: K) -> (Vec<K>, Vec<A>) {
        let mut states = Vec::new();
        let mut actions = Vec::new();
        let mut current = accept;

        loop {
            states.push(current);
            match self.entries.get(&current).and_then(|e| e.predecessor) {
                Some((prev, action)) => {
                    actions.push(action);
                    current = prev;
                }
                None => break,
            }
        }

        states.reverse();
        actions.reverse();
        (states, actions)
    }
}

impl<K: Eq + Hash + Copy, A: Copy> Default for CostLedger<K, A> {
    fn default() -> Self {
        Self::new()
    }
}
