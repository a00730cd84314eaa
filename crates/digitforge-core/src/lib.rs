//! Core value types and pure state transitions for the Digitforge puzzles.
//!
//! This crate holds the leaf data model of the digits game — operators with
//! partial-apply semantics, per-level difficulty configuration, the puzzle
//! state with its move/undo/restart transitions — plus the magic-square
//! state and verification logic. Everything here is synchronous, allocation
//! only, and free of I/O: generation and search live in the
//! `digitforge-generator` and `digitforge-solver` crates, and session
//! orchestration (modes, timers, stats) lives in `digitforge-game`.

pub mod difficulty;
pub mod magic_square;
pub mod operation;
pub mod solution;
pub mod state;

pub use self::{
    difficulty::Difficulty,
    operation::Operation,
    solution::SolutionStep,
    state::{GameState, GameStatus, HistoryEntry, MoveError},
};
