// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The solver engine: rule runner and public solver entry points.
//!
//! # Execution model
//!
//! The rule runner scans the tier-filtered rule table in order and invokes
//! each rule until one reports progress; on progress it credits that
//! rule's score, raises the tier high-water mark, and restarts the scan
//! from the top, so cheap rules always get first refusal. The scan loops
//! until the board is solved, a clue is overshot, a full pass yields no
//! progress, or a hard iteration cap is hit. The cap bounds the work per
//! search node and is treated the same as "no more progress".
//!
//! Two entry points share this runner:
//!
//! - [`solve_production`] applies the rules once and reports whether they
//!   alone complete the board.
//! - [`solve_backtracking`] wraps the runner in the depth-first search of
//!   [`search`], which decides between a unique solution, multiple
//!   solutions, and no solution.
//!
//! Both take `(givens, width, height, max_tier)` and return a
//! [`SolveResult`]. No failure escapes as an error: malformed givens
//! surface as an unsolved result with zero work, and rule-internal
//! contradictions are absorbed by the rules themselves.

pub mod search;
pub mod statistics;

pub use statistics::Statistics;

use crate::board::Board;
use crate::rules::{self, Rule};
use log::debug;
use std::fmt;

/// Upper bound on rule-runner iterations per invocation.
pub const MAX_RULE_ITERATIONS: usize = 1000;

/// Outcome classification of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Exactly one solution was found.
    Solved,
    /// No solution was found (including malformed givens).
    Unsolved,
    /// At least two solutions exist.
    Multiple,
}

impl SolveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Solved => "solved",
            SolveStatus::Unsolved => "unsolved",
            SolveStatus::Multiple => "mult",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a solver entry point hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    pub status: SolveStatus,
    /// Row-major `/`, `\`, `.` rendering: the unique solution when one
    /// exists, otherwise the board as far as it got.
    pub solution: String,
    /// Accumulated rule scores, plus two per stack push/pop when the
    /// backtracking solver ran. A difficulty proxy.
    pub work_score: u32,
    /// Highest rule tier that fired; 3 when branching was needed.
    pub max_tier_used: u8,
}

impl SolveResult {
    /// The result for a puzzle that never got off the ground.
    pub(crate) fn rejected() -> Self {
        Self {
            status: SolveStatus::Unsolved,
            solution: String::new(),
            work_score: 0,
            max_tier_used: 0,
        }
    }
}

/// Work and tier accounting from one rule-runner invocation.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RunOutcome {
    pub work_score: u32,
    pub max_tier: u8,
}

/// Apply `rules` until the board is solved, invalid, stuck, or the
/// iteration cap is reached.
pub(crate) fn run_rules(
    board: &mut Board,
    rules: &[&'static Rule],
    statistics: &mut Statistics,
) -> RunOutcome {
    let mut outcome = RunOutcome::default();

    for _ in 0..MAX_RULE_ITERATIONS {
        if board.is_solved() || !board.is_valid() {
            break;
        }

        let mut fired = false;
        for rule in rules {
            if (rule.apply)(board) {
                statistics.record(rule.kind);
                outcome.work_score += rule.score;
                outcome.max_tier = outcome.max_tier.max(rule.tier);
                fired = true;
                break;
            }
        }
        if !fired {
            break;
        }
    }

    outcome
}

/// Solve with production rules only: one run of the rule runner, no
/// branching. Reports [`SolveStatus::Solved`] iff the rules alone reach a
/// valid complete solution.
pub fn solve_production(givens: &str, width: i32, height: i32, max_tier: u8) -> SolveResult {
    let mut board = match Board::new(width, height, givens) {
        Ok(board) => board,
        Err(err) => {
            debug!("board construction failed: {}", err);
            return SolveResult::rejected();
        }
    };

    let rules = rules::rules_up_to_tier(max_tier);
    let mut statistics = Statistics::new();
    let outcome = run_rules(&mut board, &rules, &mut statistics);
    statistics.log_summary();

    let status = if board.is_valid_solution() {
        SolveStatus::Solved
    } else {
        SolveStatus::Unsolved
    };
    debug!(
        "production solve: status={} work={} tier={}",
        status, outcome.work_score, outcome.max_tier
    );

    SolveResult {
        status,
        solution: board.solution_string(),
        work_score: outcome.work_score,
        max_tier_used: outcome.max_tier,
    }
}

/// Solve with rules plus depth-first backtracking. Stops at the second
/// solution: one means [`SolveStatus::Solved`], two means
/// [`SolveStatus::Multiple`], none means [`SolveStatus::Unsolved`].
pub fn solve_backtracking(givens: &str, width: i32, height: i32, max_tier: u8) -> SolveResult {
    search::solve(givens, width, height, max_tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleKind;

    #[test]
    fn test_status_strings() {
        assert_eq!(SolveStatus::Solved.to_string(), "solved");
        assert_eq!(SolveStatus::Unsolved.to_string(), "unsolved");
        assert_eq!(SolveStatus::Multiple.to_string(), "mult");
    }

    #[test]
    fn test_run_rules_scores_and_restarts() {
        // Clue 1 at the top-left corner of a 1x1 board: clue_finish_a
        // fires once and the runner stops on the solved board.
        let mut board = Board::new(1, 1, "1c").unwrap();
        let rules = rules::rules_up_to_tier(10);
        let mut statistics = Statistics::new();
        let outcome = run_rules(&mut board, &rules, &mut statistics);
        assert!(board.is_valid_solution());
        assert_eq!(outcome.work_score, 2);
        assert_eq!(outcome.max_tier, 1);
        assert_eq!(statistics.fired(RuleKind::ClueFinishA), 1);
        assert_eq!(statistics.total_fired(), 1);
    }

    #[test]
    fn test_run_rules_stops_when_stuck() {
        let mut board = Board::new(3, 3, "p").unwrap();
        let rules = rules::rules_up_to_tier(10);
        let mut statistics = Statistics::new();
        let outcome = run_rules(&mut board, &rules, &mut statistics);
        assert_eq!(outcome.work_score, 0);
        assert!(!board.is_solved());
    }

    #[test]
    fn test_production_solver_on_forced_puzzle() {
        let result = solve_production("d4d", 2, 2, 10);
        assert_eq!(result.status, SolveStatus::Solved);
        assert_eq!(result.solution, "\\//\\");
        assert_eq!(result.work_score, 2);
        assert_eq!(result.max_tier_used, 1);
    }

    #[test]
    fn test_production_solver_reports_partial_board() {
        let result = solve_production("p", 3, 3, 10);
        assert_eq!(result.status, SolveStatus::Unsolved);
        assert_eq!(result.solution, ".........");
        assert_eq!(result.work_score, 0);
        assert_eq!(result.max_tier_used, 0);
    }

    #[test]
    fn test_malformed_givens_rejected() {
        let result = solve_production("j", 3, 3, 10);
        assert_eq!(result, SolveResult::rejected());
    }

    #[test]
    fn test_production_is_idempotent() {
        let first = solve_production("1c", 1, 1, 10);
        let second = solve_production("1c", 1, 1, 10);
        assert_eq!(first, second);
    }
}
