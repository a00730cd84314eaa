//! Example demonstrating digits-puzzle generation.
//!
//! This example shows how to:
//! - Create a `PuzzleGenerator` for a difficulty level
//! - Generate a random or seeded puzzle
//! - Display the target, the tiles, and the recorded solution
//! - Hunt for hard instances by maximizing the shortest-solution length
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle
//! ```
//!
//! Generate for a specific difficulty and seed:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --difficulty hard --seed 42
//! ```
//!
//! Sample many puzzles in parallel and keep the one whose shortest solution
//! is longest (default budget: 10000):
//!
//! ```sh
//! cargo run --example generate_puzzle -- --hunt --max-tries 10000
//! ```

use clap::{Parser, ValueEnum};
use digitforge_core::Difficulty;
use digitforge_generator::PuzzleGenerator;
use digitforge_solver::SolutionSearch;
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Difficulty level to generate for.
    #[arg(long, value_name = "LEVEL", default_value = "medium")]
    difficulty: DifficultyArg,

    /// Seed for reproducible generation. Random when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Sample many puzzles and keep the one with the longest shortest
    /// solution.
    #[arg(long)]
    hunt: bool,

    /// Maximum puzzles to sample when hunting.
    #[arg(long, value_name = "COUNT", default_value_t = 10_000)]
    max_tries: u64,
}

fn main() {
    let args = Args::parse();
    let difficulty = Difficulty::from(args.difficulty);
    let generator = PuzzleGenerator::new(difficulty);
    let search = SolutionSearch::new(difficulty.allowed_operations());

    if args.hunt {
        hunt(&generator, &search, args.max_tries, args.seed.unwrap_or(0));
        return;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let state = generator.generate_seeded(seed);
    let shortest = search.find(state.target(), state.numbers());
    print_puzzle(difficulty, seed, &state, shortest.as_deref());
}

fn hunt(generator: &PuzzleGenerator, search: &SolutionSearch, max_tries: u64, base_seed: u64) {
    let best = (0..max_tries)
        .into_par_iter()
        .map(|i| {
            let seed = base_seed.wrapping_add(i);
            let state = generator.generate_seeded(seed);
            let shortest = search.find(state.target(), state.numbers());
            let score = shortest.as_ref().map_or(0, Vec::len);
            (seed, state, shortest, score)
        })
        .max_by_key(|entry| entry.3);

    if let Some((seed, state, shortest, score)) = best {
        println!("Hunt:");
        println!("  Max tries: {max_tries}");
        println!("  Best shortest-solution length: {score}");
        println!();
        print_puzzle(generator.difficulty(), seed, &state, shortest.as_deref());
    }
}

fn print_puzzle(
    difficulty: Difficulty,
    seed: u64,
    state: &digitforge_core::GameState,
    shortest: Option<&[digitforge_core::SolutionStep]>,
) {
    println!("Difficulty: {difficulty}");
    println!("Seed: {seed}");
    println!();
    println!("Target: {}", state.target());
    println!(
        "Tiles: {}",
        state
            .numbers()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();

    match state.solution() {
        Some(steps) => {
            println!("Recorded solution:");
            for step in steps {
                println!("  {step}");
            }
        }
        None => println!("Recorded solution: none (fallback puzzle)"),
    }
    println!();

    match shortest {
        Some(steps) if steps.is_empty() => println!("Shortest solution: already solved"),
        Some(steps) => {
            println!("Shortest solution ({} steps):", steps.len());
            for step in steps {
                println!("  {step}");
            }
        }
        None => println!("Shortest solution: none found"),
    }
}
