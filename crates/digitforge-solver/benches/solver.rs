//! Benchmarks for the shortest-solution search.
//!
//! Measures BFS cost on fixed boards of increasing size. Hard-difficulty
//! boards (6 tiles, all four operators) are the expensive case: the branching
//! factor is every unordered tile pair times every operator, with swapped
//! orderings for subtraction and division.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::{hint, time::Duration};

use criterion::{BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main};
use digitforge_core::Difficulty;
use digitforge_solver::SolutionSearch;

const CASES: [(&str, i64, &[i64]); 3] = [
    ("easy_4_tiles", 42, &[9, 7, 5, 3]),
    ("medium_5_tiles", 137, &[17, 12, 9, 5, 2]),
    ("hard_6_tiles", 433, &[25, 21, 14, 8, 5, 3]),
];

fn bench_find_shortest(c: &mut Criterion) {
    let search = SolutionSearch::new(Difficulty::Hard.allowed_operations());

    for (name, target, numbers) in CASES {
        c.bench_with_input(
            BenchmarkId::new("find_shortest", name),
            &(target, numbers),
            |b, &(target, numbers)| {
                b.iter(|| search.find(hint::black_box(target), hint::black_box(numbers)));
            },
        );
    }
}

fn bench_unsolvable_bounded(c: &mut Criterion) {
    // Worst case: the target is unreachable, so the search runs to the bound.
    let search = SolutionSearch::new(Difficulty::Hard.allowed_operations()).with_max_depth(4);

    c.bench_function("find_shortest_unsolvable_depth_4", |b| {
        b.iter(|| search.find(hint::black_box(499), hint::black_box(&[2, 2, 2, 2, 2, 2])));
    });
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(10));
    targets =
        bench_find_shortest,
        bench_unsolvable_bounded
);
criterion_main!(benches);
