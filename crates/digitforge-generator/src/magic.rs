//! Magic-square puzzle generation.
//!
//! Builds a complete square from a classic construction — Lo Shu for 3×3, a
//! fixed doubly-even square for 4×4, the Siamese method for 5×5 — then applies
//! a random rotation and optional mirror for variety, and blanks out a random
//! subset of cells sized by difficulty.

use digitforge_core::{
    Difficulty,
    magic_square::{CellState, MagicSquareState},
};
use rand::{Rng, RngExt as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64Mcg;

/// Returns the grid dimension used for the difficulty: 3, 4, or 5.
#[must_use]
pub fn grid_size(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 3,
        Difficulty::Medium => 4,
        Difficulty::Hard => 5,
    }
}

/// Returns the magic constant `n(n² + 1) / 2` for the difficulty's grid.
#[must_use]
pub fn magic_constant(difficulty: Difficulty) -> i64 {
    let n = grid_size(difficulty) as i64;
    n * (n * n + 1) / 2
}

/// Generates a magic-square puzzle for the difficulty.
///
/// The returned state has every remaining fixed cell consistent with a
/// complete magic square, so the puzzle is always solvable.
#[must_use]
pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> MagicSquareState {
    let complete = match grid_size(difficulty) {
        3 => transform(lo_shu(), rng),
        4 => transform(doubly_even_4x4(), rng),
        _ => transform(siamese(5), rng),
    };

    let removals = match difficulty {
        Difficulty::Easy => rng.random_range(3..5),
        Difficulty::Medium => rng.random_range(6..9),
        Difficulty::Hard => rng.random_range(10..14),
    };

    let grid = remove_cells(&complete, removals, rng);
    MagicSquareState::new(grid, magic_constant(difficulty))
}

/// Generates a magic-square puzzle from a fixed seed.
#[must_use]
pub fn generate_seeded(difficulty: Difficulty, seed: u64) -> MagicSquareState {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    generate(difficulty, &mut rng)
}

fn lo_shu() -> Vec<Vec<i64>> {
    vec![vec![2, 7, 6], vec![9, 5, 1], vec![4, 3, 8]]
}

fn doubly_even_4x4() -> Vec<Vec<i64>> {
    vec![
        vec![1, 15, 14, 4],
        vec![12, 6, 7, 9],
        vec![8, 10, 11, 5],
        vec![13, 3, 2, 16],
    ]
}

/// Builds an odd-order magic square with the Siamese (De la Loubère) method:
/// place 1 in the middle of the top row, then move up-right, dropping down one
/// row whenever the next cell is occupied.
fn siamese(n: usize) -> Vec<Vec<i64>> {
    let mut square = vec![vec![0_i64; n]; n];
    let mut row = 0;
    let mut col = n / 2;

    for num in 1..=(n * n) as i64 {
        square[row][col] = num;

        let next_row = (row + n - 1) % n;
        let next_col = (col + 1) % n;
        if square[next_row][next_col] == 0 {
            row = next_row;
            col = next_col;
        } else {
            row = (row + 1) % n;
        }
    }
    square
}

/// Applies a random rotation (0–3 quarter turns) and an optional horizontal
/// mirror. Both operations preserve row and column sums.
fn transform<R: Rng + ?Sized>(mut square: Vec<Vec<i64>>, rng: &mut R) -> Vec<Vec<i64>> {
    for _ in 0..rng.random_range(0..4) {
        square = rotate90(&square);
    }
    if rng.random_bool(0.5) {
        for row in &mut square {
            row.reverse();
        }
    }
    square
}

fn rotate90(square: &[Vec<i64>]) -> Vec<Vec<i64>> {
    let n = square.len();
    (0..n)
        .map(|row| (0..n).map(|col| square[n - 1 - col][row]).collect())
        .collect()
}

fn remove_cells<R: Rng + ?Sized>(
    complete: &[Vec<i64>],
    count: usize,
    rng: &mut R,
) -> Vec<Vec<CellState>> {
    let n = complete.len();
    let mut positions: Vec<(usize, usize)> = (0..n)
        .flat_map(|row| (0..n).map(move |col| (row, col)))
        .collect();
    positions.shuffle(rng);
    let removed = &positions[..count];

    complete
        .iter()
        .enumerate()
        .map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .map(|(col, &value)| {
                    if removed.contains(&(row, col)) {
                        CellState::Editable(None)
                    } else {
                        CellState::Fixed(value)
                    }
                })
                .collect()
        })
        .collect()
}
