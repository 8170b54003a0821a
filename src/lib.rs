// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rust implementation of a Slant (Gokigen Naname) puzzle solver.
//!
//! Slant is played on a rectangular grid of cells. Every cell must be filled
//! with a diagonal, `/` or `\`, such that each numbered lattice vertex is
//! touched by exactly that many diagonals, and the placed diagonals never
//! form a closed loop.
//!
//! # Architecture
//!
//! The engine is built in four layers:
//!
//! ## Layer 1: Grid (value types)
//!
//! Plain coordinate and value types: [`grid::Cell`], [`grid::Vertex`],
//! [`grid::CellValue`], plus the run-length clue codec in [`grid::givens`].
//!
//! ## Layer 2: Board (mutable state)
//!
//! [`board::Board`] owns the cell values and four incremental indices:
//! - a vertex union-find for loop detection, carrying per-group exit
//!   budgets and border flags (dead-end detection),
//! - cell equivalence classes with a shared slash value,
//! - per-cell v-shape bitmaps.
//!
//! All of it snapshots into a [`board::BoardState`] and restores losslessly,
//! which is what makes the backtracking search cheap to express.
//!
//! ## Layer 3: Rules (deductions)
//!
//! Thirteen production rules ([`rules`]), each a pure `fn(&mut Board) ->
//! bool` reporting whether it made progress. Rules never leave the board in
//! an invalid state: a placement that would close a loop or overshoot a
//! clue is silently skipped.
//!
//! ## Layer 4: Engine (runner and search)
//!
//! The rule runner applies rules cheapest-first to a fixpoint, restarting
//! from the top of the list on any progress. The branching search
//! ([`engine::search`]) layers a depth-first search on top: it picks the
//! most constrained cell, tries its valid diagonals in priority order, and
//! backtracks through board snapshots. The search stops as soon as a second
//! solution is found, which is enough to classify a puzzle as uniquely
//! solved, unsolved, or ambiguous.
//!
//! Each rule carries a score and a difficulty tier; the accumulated work
//! score and the highest tier used are reported alongside the solution as a
//! difficulty proxy.
//!
//! # Example
//!
//! ```
//! use slant_search::{solve_backtracking, SolveStatus};
//!
//! // A 1x1 puzzle: the top-left vertex must be touched once.
//! let result = solve_backtracking("1c", 1, 1, 10);
//! assert_eq!(result.status, SolveStatus::Solved);
//! assert_eq!(result.solution, "\\");
//! ```

pub mod board;
pub mod engine;
pub mod grid;
pub mod rules;

// Re-export commonly used types
pub use board::{Board, BoardError, BoardState};
pub use engine::{solve_backtracking, solve_production, SolveResult, SolveStatus};
pub use grid::{Cell, CellValue, Vertex};
