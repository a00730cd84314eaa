//! Breadth-first shortest-solution search for the digits game.
//!
//! The search explores tile multisets reachable from a starting board: each
//! expansion combines one unordered pair of tiles with one allowed operator,
//! shrinking the board by one tile. Because the queue is FIFO, the first
//! state that contains the target yields a minimum-length solution. Visited
//! boards are deduplicated by their sorted tile sequence — multisets are
//! order-independent, so sorting gives a canonical key and equivalent
//! configurations reached via different operation orders are explored once.
//!
//! Exhausting the search is an expected outcome for deep or adversarial
//! configurations, not an error: [`SolutionSearch::find`] simply returns
//! `None`.

use std::collections::{HashSet, VecDeque};

use digitforge_core::{Operation, SolutionStep};
use tinyvec::ArrayVec;

/// Default bound on solution length; states at this depth are not expanded.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Largest board the search supports. Difficulty levels deal at most 6 tiles.
pub const MAX_TILES: usize = 8;

type Tiles = ArrayVec<[i64; MAX_TILES]>;

#[derive(Debug)]
struct SearchState {
    tiles: Tiles,
    path: Vec<SolutionStep>,
}

/// A configured shortest-solution search.
///
/// Carries the allowed operator set and the depth bound. Operators are tried
/// in the order given, and unordered tile pairs in index order; together with
/// the FIFO queue this makes the returned trace deterministic.
///
/// # Example
///
/// ```
/// use digitforge_core::Operation;
/// use digitforge_solver::SolutionSearch;
///
/// let search = SolutionSearch::new(&[Operation::Add, Operation::Sub]);
/// let steps = search.find(8, &[5, 3]).expect("solvable");
/// assert_eq!(steps.len(), 1);
/// assert_eq!(steps[0].description, "5 + 3 = 8");
/// ```
#[derive(Debug, Clone)]
pub struct SolutionSearch {
    allowed: Vec<Operation>,
    max_depth: usize,
}

impl SolutionSearch {
    /// Creates a search over the given operator set with the default depth
    /// bound.
    #[must_use]
    pub fn new(allowed: &[Operation]) -> Self {
        Self {
            allowed: allowed.to_vec(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replaces the depth bound.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Finds a shortest sequence of moves producing `target` from `numbers`.
    ///
    /// Returns an empty sequence when the target is already on the board
    /// (zero-step solutions are valid), and `None` when no solution exists
    /// within the depth bound or the board exceeds [`MAX_TILES`].
    #[must_use]
    pub fn find(&self, target: i64, numbers: &[i64]) -> Option<Vec<SolutionStep>> {
        if numbers.len() > MAX_TILES {
            return None;
        }
        let start: Tiles = numbers.iter().copied().collect();

        let mut queue = VecDeque::new();
        queue.push_back(SearchState {
            tiles: start,
            path: Vec::new(),
        });
        let mut visited: HashSet<Tiles> = HashSet::new();

        while let Some(state) = queue.pop_front() {
            if state.tiles.contains(&target) {
                return Some(state.path);
            }
            if state.path.len() >= self.max_depth {
                continue;
            }

            let mut key = state.tiles;
            key.sort_unstable();
            if !visited.insert(key) {
                continue;
            }

            for i in 0..state.tiles.len() {
                for j in (i + 1)..state.tiles.len() {
                    let a = state.tiles[i];
                    let b = state.tiles[j];
                    for &operation in &self.allowed {
                        let orderings: &[(i64, i64)] = if operation.is_commutative() {
                            &[(a, b)]
                        } else {
                            &[(a, b), (b, a)]
                        };
                        for &(x, y) in orderings {
                            let Some(result) = operation.apply(x, y) else {
                                continue;
                            };
                            if result <= 0 {
                                continue;
                            }

                            let mut tiles = state.tiles;
                            tiles.remove(j);
                            tiles.remove(i);
                            tiles.push(result);

                            let mut path = state.path.clone();
                            path.push(SolutionStep::new(operation, x, y, result));
                            queue.push_back(SearchState { tiles, path });
                        }
                    }
                }
            }
        }

        None
    }
}

/// Finds a shortest solution with the default depth bound.
///
/// Convenience wrapper over [`SolutionSearch`] for one-off queries.
#[must_use]
pub fn find_shortest_solution(
    target: i64,
    numbers: &[i64],
    allowed: &[Operation],
) -> Option<Vec<SolutionStep>> {
    SolutionSearch::new(allowed).find(target, numbers)
}

#[cfg(test)]
mod tests {
    use digitforge_core::Difficulty;

    use super::*;

    #[test]
    fn test_single_step_solution() {
        let steps =
            find_shortest_solution(8, &[5, 3], &[Operation::Add, Operation::Sub]).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].operation, Operation::Add);
        assert_eq!(steps[0].operand1, 5);
        assert_eq!(steps[0].operand2, 3);
        assert_eq!(steps[0].result, 8);
    }

    #[test]
    fn test_already_solved_needs_zero_steps() {
        let steps = find_shortest_solution(5, &[5, 3, 2], &[Operation::Add]).unwrap();
        assert!(steps.is_empty());
    }

    #[test]
    fn test_never_longer_than_an_available_one_step_solution() {
        // 12 = 5 + 7 is reachable in one step; BFS must find a 1-step path.
        let steps = find_shortest_solution(
            12,
            &[5, 7, 3, 2],
            Difficulty::Hard.allowed_operations(),
        )
        .unwrap();
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn test_multi_step_solution_is_minimal() {
        // 22 needs two steps from [4, 5, 2]: (4 × 5) + 2.
        let steps = find_shortest_solution(
            22,
            &[4, 5, 2],
            &[Operation::Add, Operation::Sub, Operation::Mul],
        )
        .unwrap();
        assert_eq!(steps.len(), 2);

        // Replay the trace against the board to validate it.
        let mut board = vec![4_i64, 5, 2];
        for step in &steps {
            let i = board.iter().position(|&n| n == step.operand1).unwrap();
            board.swap_remove(i);
            let j = board.iter().position(|&n| n == step.operand2).unwrap();
            board.swap_remove(j);
            assert_eq!(step.operation.apply(step.operand1, step.operand2), Some(step.result));
            board.push(step.result);
        }
        assert!(board.contains(&22));
    }

    #[test]
    fn test_non_commutative_swapped_ordering_is_tried() {
        // Only 5 - 3 = 2 works; 3 - 5 is negative.
        let steps = find_shortest_solution(2, &[3, 5], &[Operation::Sub]).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].description, "5 - 3 = 2");
    }

    #[test]
    fn test_unreachable_target_returns_none() {
        assert_eq!(
            find_shortest_solution(1000, &[2, 3], &[Operation::Add]),
            None
        );
    }

    #[test]
    fn test_depth_bound_terminates() {
        let search =
            SolutionSearch::new(&[Operation::Add, Operation::Mul]).with_max_depth(2);
        let result = search.find(1000, &[2, 3, 5]);
        if let Some(steps) = result {
            assert!(steps.len() <= 2);
        }
    }

    #[test]
    fn test_zero_division_candidates_are_skipped() {
        // Division by the smaller tile is inexact everywhere here; the search
        // must not panic or divide by zero and still find the additive path.
        let steps = find_shortest_solution(
            10,
            &[7, 3],
            Difficulty::Hard.allowed_operations(),
        )
        .unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].operation, Operation::Add);
    }

    #[test]
    fn test_oversized_board_returns_none() {
        let board = [1_i64; MAX_TILES + 1];
        assert_eq!(find_shortest_solution(9, &board, &[Operation::Add]), None);
    }

    #[test]
    fn test_empty_board_returns_none() {
        assert_eq!(find_shortest_solution(5, &[], &[Operation::Add]), None);
    }

    #[test]
    fn test_trace_is_deterministic() {
        let numbers = [2_i64, 6, 4, 9];
        let ops = Difficulty::Hard.allowed_operations();
        let first = find_shortest_solution(17, &numbers, ops);
        let second = find_shortest_solution(17, &numbers, ops);
        assert_eq!(first, second);
    }
}
