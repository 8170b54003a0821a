// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.
#![allow(dead_code)] // not every test binary uses every helper

use slant_search::{Board, SolveResult};

/// Opt the test binary into `RUST_LOG`-driven logging. Safe to call from
/// every test; only the first call installs the logger.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a board, panicking with context on bad givens.
pub fn board(width: i32, height: i32, givens: &str) -> Board {
    match Board::new(width, height, givens) {
        Ok(board) => board,
        Err(err) => panic!("could not build {}x{} board from {:?}: {}", width, height, givens, err),
    }
}

/// Assert that a solution string is a complete rendering for the given
/// dimensions: right length, diagonals only.
pub fn assert_complete_solution(result: &SolveResult, width: i32, height: i32) {
    assert_eq!(
        result.solution.len(),
        (width * height) as usize,
        "solution {:?} has the wrong length",
        result.solution
    );
    assert!(
        result.solution.chars().all(|c| c == '/' || c == '\\'),
        "solution {:?} contains undecided cells",
        result.solution
    );
}
