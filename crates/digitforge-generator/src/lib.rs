//! Puzzle generation for the digits game and the magic-square game.
//!
//! Digits puzzles are produced by rejection sampling over forward simulation:
//! deal random tiles, combine random pairs with random allowed operators, and
//! take the largest surviving value as the candidate target. A candidate is
//! accepted when the target lands in the difficulty's range and is not already
//! one of the starting tiles. The simulated step trace is kept as a known
//! solution, so every sampled puzzle is solvable by construction.
//!
//! Randomness is injected: every generation call takes an [`Rng`], and the
//! seeded entry points build a [`Pcg64Mcg`] from a `u64`, so a fixed seed
//! reproduces the same puzzle bit for bit.

use digitforge_core::{Difficulty, GameState, Operation, SolutionStep};
use log::{debug, warn};
use rand::{Rng, RngExt as _, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg64Mcg;

pub mod magic;

/// Sampling budget before the generator falls back to a fixed puzzle.
pub const MAX_ATTEMPTS: usize = 100;

/// A digits-puzzle generator configured for one difficulty level.
///
/// # Example
///
/// ```
/// use digitforge_core::Difficulty;
/// use digitforge_generator::PuzzleGenerator;
///
/// let generator = PuzzleGenerator::new(Difficulty::Easy);
/// let state = generator.generate_seeded(42);
/// assert_eq!(state.numbers().len(), 4);
/// assert!(Difficulty::Easy.target_range().contains(&state.target()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleGenerator {
    difficulty: Difficulty,
}

impl PuzzleGenerator {
    /// Creates a generator for the given difficulty.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    /// Returns the configured difficulty.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Generates a fresh puzzle.
    ///
    /// Samples up to [`MAX_ATTEMPTS`] candidates; each accepted candidate
    /// carries the forward-simulation trace as its recorded solution. When
    /// every attempt is rejected, a fixed hand-authored puzzle for the
    /// difficulty is returned instead, with no recorded solution.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> GameState {
        for attempt in 0..MAX_ATTEMPTS {
            if let Some(state) = self.attempt(rng) {
                debug!(
                    "accepted {} puzzle after {} attempt(s): target {}",
                    self.difficulty,
                    attempt + 1,
                    state.target(),
                );
                return state;
            }
        }
        warn!(
            "sampling exhausted after {MAX_ATTEMPTS} attempts, using the {} fallback puzzle",
            self.difficulty,
        );
        self.fallback()
    }

    /// Generates the next puzzle of a challenge run.
    ///
    /// Generation mechanics do not depend on the mode; this exists so
    /// challenge callers have a named entry point.
    #[must_use]
    pub fn generate_challenge<R: Rng + ?Sized>(&self, rng: &mut R) -> GameState {
        self.generate(rng)
    }

    /// Generates a puzzle from a fixed seed.
    ///
    /// The same seed always yields the same puzzle.
    #[must_use]
    pub fn generate_seeded(&self, seed: u64) -> GameState {
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        self.generate(&mut rng)
    }

    fn attempt<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<GameState> {
        let range = self.difficulty.number_range();
        let numbers: Vec<i64> = (0..self.difficulty.number_count())
            .map(|_| rng.random_range(range.clone()))
            .collect();

        let (target, solution) = simulate_forward(
            &numbers,
            self.difficulty.allowed_operations(),
            rng,
        );

        let accepted = self.difficulty.target_range().contains(&target)
            && !numbers.contains(&target);
        accepted.then(|| GameState::with_solution(target, numbers, solution))
    }

    /// Fixed per-difficulty puzzle used when sampling is exhausted.
    ///
    /// Each target is reachable from the listed tiles under the difficulty's
    /// operator set. No solution is recorded; "Explain" backfills one by
    /// search when asked.
    fn fallback(&self) -> GameState {
        let (target, numbers) = match self.difficulty {
            Difficulty::Easy => (11, vec![5, 3, 2, 1]),
            Difficulty::Medium => (100, vec![10, 5, 4, 3, 2]),
            Difficulty::Hard => (200, vec![25, 10, 8, 5, 4, 2]),
        };
        GameState::new(target, numbers)
    }
}

/// Applies 2–4 random operations to a copy of `start` and returns the largest
/// surviving value together with the step trace.
///
/// A draw whose result is undefined or not positive is skipped but still
/// consumes one planned step, so the trace may hold fewer steps than planned.
fn simulate_forward<R: Rng + ?Sized>(
    start: &[i64],
    allowed: &[Operation],
    rng: &mut R,
) -> (i64, Vec<SolutionStep>) {
    let mut numbers = start.to_vec();
    let mut solution = Vec::new();

    let step_count = rng.random_range(2..5.min(numbers.len()));
    for _ in 0..step_count {
        if numbers.len() < 2 {
            break;
        }

        let i = rng.random_range(0..numbers.len());
        let mut j = rng.random_range(0..numbers.len());
        while j == i {
            j = rng.random_range(0..numbers.len());
        }

        let a = numbers[i];
        let b = numbers[j];
        let Some(&operation) = allowed.choose(rng) else {
            break;
        };

        let Some(result) = operation.apply(a, b) else {
            continue;
        };
        if result <= 0 {
            continue;
        }

        numbers.remove(i.max(j));
        numbers.remove(i.min(j));
        numbers.push(result);
        solution.push(SolutionStep::new(operation, a, b, result));
    }

    let target = numbers.iter().copied().max().unwrap_or(start[0]);
    (target, solution)
}
