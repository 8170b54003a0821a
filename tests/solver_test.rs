// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! End-to-end solver scenarios through the public entry points.

mod common;

use common::{assert_complete_solution, init_logging};
use slant_search::{solve_backtracking, solve_production, SolveStatus};

#[test]
fn test_one_by_one_corner_clue_is_unique() {
    init_logging();
    let result = solve_backtracking("1c", 1, 1, 10);
    assert_eq!(result.status, SolveStatus::Solved);
    assert_eq!(result.solution, "\\");
    // One rule firing (score 2) plus one pop at two points.
    assert_eq!(result.work_score, 4);
    assert_eq!(result.max_tier_used, 1);
}

#[test]
fn test_one_by_one_zero_clue_is_unique() {
    init_logging();
    let result = solve_backtracking("0c", 1, 1, 10);
    assert_eq!(result.status, SolveStatus::Solved);
    assert_eq!(result.solution, "/");
    assert_eq!(result.max_tier_used, 1);
}

#[test]
fn test_one_by_one_unclued_has_two_solutions() {
    init_logging();
    let result = solve_backtracking("d", 1, 1, 10);
    assert_eq!(result.status, SolveStatus::Multiple);
    // The first solution found is reported.
    assert_eq!(result.solution, "/");
    // One root pop, two pushes, two more pops before the cutoff.
    assert_eq!(result.work_score, 10);
    assert_eq!(result.max_tier_used, 3);
}

#[test]
fn test_interior_four_is_forced() {
    init_logging();
    let result = solve_backtracking("d4d", 2, 2, 10);
    assert_eq!(result.status, SolveStatus::Solved);
    assert_eq!(result.solution, "\\//\\");
    assert_complete_solution(&result, 2, 2);
    // Solved by rules alone: no branching tier.
    assert_eq!(result.max_tier_used, 1);
}

#[test]
fn test_unclued_boards_are_ambiguous() {
    init_logging();
    for (givens, width, height) in [("i", 2, 2), ("p", 3, 3)] {
        let result = solve_backtracking(givens, width, height, 10);
        assert_eq!(
            result.status,
            SolveStatus::Multiple,
            "{}x{} unclued board must have multiple solutions",
            width,
            height
        );
        assert_eq!(result.max_tier_used, 3);
        assert_complete_solution(&result, width, height);
    }
}

#[test]
fn test_malformed_givens_reject_cleanly() {
    init_logging();
    // "j" decodes to 10 vertices; a 3x3 board needs 16.
    for result in [
        solve_backtracking("j", 3, 3, 10),
        solve_production("j", 3, 3, 10),
    ] {
        assert_eq!(result.status, SolveStatus::Unsolved);
        assert_eq!(result.solution, "");
        assert_eq!(result.work_score, 0);
        assert_eq!(result.max_tier_used, 0);
    }
}

#[test]
fn test_contradictory_clue_is_unsolved() {
    init_logging();
    // A 2 at a grid corner has only one adjacent cell: unsatisfiable.
    let result = solve_backtracking("2h", 2, 2, 10);
    assert_eq!(result.status, SolveStatus::Unsolved);
}

#[test]
fn test_backtracking_agrees_with_production_when_rules_suffice() {
    init_logging();
    let by_rules = solve_production("d4d", 2, 2, 10);
    let by_search = solve_backtracking("d4d", 2, 2, 10);
    assert_eq!(by_rules.status, SolveStatus::Solved);
    assert_eq!(by_rules.solution, by_search.solution);
    // The search pays two points for its root pop on top of the rules.
    assert_eq!(by_search.work_score, by_rules.work_score + 2);
}

#[test]
fn test_production_never_branches() {
    init_logging();
    let result = solve_production("p", 3, 3, 10);
    assert_eq!(result.status, SolveStatus::Unsolved);
    assert_eq!(result.solution, ".........");
    assert!(result.max_tier_used < 3);
}

#[test]
fn test_production_is_deterministic() {
    init_logging();
    let first = solve_production("d4d", 2, 2, 10);
    let second = solve_production("d4d", 2, 2, 10);
    assert_eq!(first, second);
}

#[test]
fn test_high_max_tier_means_no_filtering() {
    init_logging();
    let capped = solve_backtracking("1c", 1, 1, 3);
    let uncapped = solve_backtracking("1c", 1, 1, 10);
    assert_eq!(capped, uncapped);
}

#[test]
fn test_solution_satisfies_every_clue() {
    init_logging();
    // Clue-heavy 2x2 puzzle: 1 at (0, 0) and 4 at (1, 1).
    let result = solve_backtracking("1c4d", 2, 2, 10);
    assert_eq!(result.status, SolveStatus::Solved);
    assert_complete_solution(&result, 2, 2);
    // The interior 4 forces all cells toward (1, 1); the corner clue is
    // touched by the top-left backslash alone.
    assert_eq!(result.solution, "\\//\\");
}
