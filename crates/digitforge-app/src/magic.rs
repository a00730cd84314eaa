//! Interactive loop for the magic-square game.

use std::io::{self, BufRead as _};

use digitforge_core::{
    Difficulty,
    magic_square::{CellState, MagicSquareState},
};
use digitforge_generator::magic;

use crate::AppError;

pub fn run(difficulty: Difficulty, seed: Option<u64>) -> Result<(), AppError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut state = magic::generate_seeded(difficulty, seed);

    println!(
        "Fill the {n}x{n} grid so every row and column sums to {}.",
        state.magic_constant(),
        n = state.size(),
    );
    print_help();
    render(&state);

    for line in io::stdin().lock().lines() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] | ["show"] => {}
            ["help" | "?"] => {
                print_help();
                continue;
            }
            ["quit" | "q" | "exit"] => break,
            ["set", row, col, value] => match parse3(row, col, value) {
                Some((row, col, value)) => state.set_cell_value(row, col, value),
                None => {
                    println!("Usage: set <row> <col> <value>");
                    continue;
                }
            },
            ["clear", row, col] => match parse2(row, col) {
                Some((row, col)) => state.clear_cell(row, col),
                None => {
                    println!("Usage: clear <row> <col>");
                    continue;
                }
            },
            _ => {
                println!("Unrecognized command; try 'help'.");
                continue;
            }
        }

        render(&state);
        if state.status().is_won() {
            println!("*** Solved! Every line sums to {}. ***", state.magic_constant());
            break;
        }
    }
    Ok(())
}

fn parse2(row: &str, col: &str) -> Option<(usize, usize)> {
    Some((row.parse().ok()?, col.parse().ok()?))
}

fn parse3(row: &str, col: &str, value: &str) -> Option<(usize, usize, i64)> {
    let (row, col) = parse2(row, col)?;
    Some((row, col, value.parse().ok()?))
}

fn render(state: &MagicSquareState) {
    let n = state.size();
    println!();
    print!("     ");
    for col in 0..n {
        print!("{col:>4}");
    }
    println!();
    for row in 0..n {
        print!("  {row} |");
        for col in 0..n {
            match state.cell(row, col) {
                Some(CellState::Fixed(value)) => print!("{value:>4}"),
                Some(CellState::Editable(Some(value))) => print!("{:>4}", format!("{value}?")),
                Some(CellState::Editable(None)) | None => print!("{:>4}", "."),
            }
        }
        match state.row_sum(row) {
            Some(sum) => println!("  = {sum}"),
            None => println!(),
        }
    }
    println!("  (fixed numbers are givens; '?' marks your entries)");
}

fn print_help() {
    println!("Commands:");
    println!("  set <row> <col> <value>   fill a cell");
    println!("  clear <row> <col>         empty a cell");
    println!("  show help quit");
}
