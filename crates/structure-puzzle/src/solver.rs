//! Best-first search for the shortest winning move sequence.
//!
//! States are deduplicated on their exported element sequence, since two
//! structures with the same export behave identically for every later move.
//! Edges of a graph never change its export and a tree's in-order export
//! fixes its future exports, so nothing that matters is lost.
//!
//! The search also backs hints: it can start from a session's live
//! structure instead of the level's initial state.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

use log::debug;

use crate::element::Element;
use crate::operation::Operation;
use crate::pruning::{
    candidate_operations, is_dead_end, is_redundant_pair, remaining_moves_lower_bound,
};
use crate::puzzle::Level;
use crate::structures::Structure;

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum time to search
    pub timeout: Duration,
    /// Maximum distinct states to expand
    pub max_states: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_states: 200_000,
        }
    }
}

/// Result of the solver search
#[derive(Debug, Clone)]
pub struct SolverResult {
    /// Shortest winning sequence, if one was found
    pub solution: Option<Vec<Operation>>,
    /// Whether every reachable state within the move limit was examined
    pub search_exhausted: bool,
    /// Number of states expanded
    pub states_explored: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

impl SolverResult {
    pub fn moves(&self) -> Option<usize> {
        self.solution.as_ref().map(Vec::len)
    }
}

/// A node of the search tree, stored in an arena and linked to its parent
struct SearchNode {
    structure: Structure,
    /// Moves made to reach this node
    moves: usize,
    /// Whether at least one accepted move has been made
    moved: bool,
    parent: Option<usize>,
    op: Option<Operation>,
}

/// Heap entry ordered so the smallest estimate pops first
#[derive(Debug, PartialEq, Eq)]
struct Frontier {
    estimate: usize,
    moves: usize,
    node: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Backwards so `BinaryHeap` acts as a min-heap. Ties go to the
        // deeper node, which is closer to a win.
        other
            .estimate
            .cmp(&self.estimate)
            .then(self.moves.cmp(&other.moves))
            .then(other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the shortest win from the level's initial state.
///
/// A win on the move after the budget runs out still counts, so the search
/// allows `max_moves + 1` moves.
pub fn find_solution(level: &Level, config: &SolverConfig) -> SolverResult {
    let initial = Structure::from_elements(level.structure, &level.initial);
    find_solution_from(level, &initial, 0, config)
}

/// Find the shortest win from a position reached after `moves_used` moves
pub fn find_solution_from(
    level: &Level,
    start: &Structure,
    moves_used: u32,
    config: &SolverConfig,
) -> SolverResult {
    let start_time = Instant::now();
    let deadline = start_time + config.timeout;

    let target = Structure::from_elements(level.structure, &level.target).export();
    let values = level.values();
    let limit = usize::try_from(level.max_moves.saturating_add(1).saturating_sub(moves_used))
        .unwrap_or(usize::MAX);

    let finish = |solution: Option<Vec<Operation>>, search_exhausted: bool, states: usize| {
        let result = SolverResult {
            solution,
            search_exhausted,
            states_explored: states,
            time_elapsed_ms: start_time.elapsed().as_millis() as u64,
        };
        debug!(
            "{} level {}: {} states, {}ms, solution {:?}",
            level.structure,
            level.id,
            result.states_explored,
            result.time_elapsed_ms,
            result.moves()
        );
        result
    };

    let start_export = start.export();
    if is_dead_end(level, &start_export, &target) {
        return finish(None, true, 0);
    }

    let mut arena = vec![SearchNode {
        structure: start.clone(),
        moves: 0,
        moved: moves_used > 0,
        parent: None,
        op: None,
    }];
    let mut best: HashMap<(Vec<Element>, bool), usize> = HashMap::new();
    best.insert((start_export.clone(), moves_used > 0), 0);

    let mut heap = BinaryHeap::new();
    heap.push(Frontier {
        estimate: estimate(level, &start_export, &target, moves_used > 0),
        moves: 0,
        node: 0,
    });

    let mut states_explored = 0;

    while let Some(Frontier { moves, node, .. }) = heap.pop() {
        if Instant::now() > deadline || states_explored >= config.max_states {
            return finish(None, false, states_explored);
        }

        let export = arena[node].structure.export();
        let moved = arena[node].moved;
        if best.get(&(export.clone(), moved)).is_some_and(|&g| g < moves) {
            // Reached more cheaply since this entry was pushed
            continue;
        }
        if moved && export == target {
            return finish(Some(trace_moves(&arena, node)), false, states_explored);
        }
        states_explored += 1;

        if moves >= limit {
            continue;
        }

        // Only undo pairs that return to an already-moved state are useless
        let prev_op = arena[node].op.clone();
        let undo_is_redundant = arena[node]
            .parent
            .is_some_and(|parent| arena[parent].moved);

        for op in candidate_operations(level, &export, &values) {
            let undoes_prev = prev_op
                .as_ref()
                .is_some_and(|prev| is_redundant_pair(prev, &op));
            if undo_is_redundant && undoes_prev {
                continue;
            }

            let mut structure = arena[node].structure.clone();
            if structure.apply(&op).is_err() {
                // Rejected moves never count
                continue;
            }

            let next_export = structure.export();
            if is_dead_end(level, &next_export, &target) {
                continue;
            }

            let next_moves = moves + 1;
            let next_estimate = next_moves + estimate(level, &next_export, &target, true);
            if next_estimate > limit {
                continue;
            }

            let key = (next_export, true);
            if best.get(&key).is_some_and(|&g| g <= next_moves) {
                continue;
            }
            best.insert(key, next_moves);

            arena.push(SearchNode {
                structure,
                moves: next_moves,
                moved: true,
                parent: Some(node),
                op: Some(op),
            });
            heap.push(Frontier {
                estimate: next_estimate,
                moves: next_moves,
                node: arena.len() - 1,
            });
        }
    }

    finish(None, true, states_explored)
}

/// Lower bound on remaining moves. An unmoved start always needs one more.
fn estimate(level: &Level, current: &[Element], target: &[Element], moved: bool) -> usize {
    let bound = remaining_moves_lower_bound(level, current, target);
    if moved {
        bound
    } else {
        bound.max(1)
    }
}

fn trace_moves(arena: &[SearchNode], mut node: usize) -> Vec<Operation> {
    let mut moves = Vec::with_capacity(arena[node].moves);
    while let Some(parent) = arena[node].parent {
        if let Some(op) = &arena[node].op {
            moves.push(op.clone());
        }
        node = parent;
    }
    moves.reverse();
    moves
}
