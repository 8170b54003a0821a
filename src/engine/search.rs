// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Depth-first backtracking search on top of the rule runner.
//!
//! The search keeps an explicit stack of board snapshots. Each node pops a
//! snapshot, restores it, runs the rules to a fixpoint, and then either
//! discards the node (invalid), records a solution (complete), or branches:
//! the most constrained undecided cell is chosen, its valid diagonals are
//! ordered by how many clued corners they touch, and one child snapshot is
//! pushed per diagonal, in reverse order, so that the highest-priority
//! value is explored first.
//!
//! The search short-circuits at two solutions; distinguishing "unique",
//! "ambiguous" and "none" needs nothing more. Every push and pop feeds the
//! work score at two points apiece, and any branching at all promotes the
//! reported tier to the branching tier.

use super::{run_rules, SolveResult, SolveStatus, Statistics};
use crate::board::{Board, BoardState};
use crate::grid::{Cell, CellValue};
use crate::rules::{self, BRANCH_TIER};
use log::{debug, trace};

/// One node of the search: the state to restore, and the diagonal whose
/// placement produced it.
struct StackEntry {
    state: BoardState,
    /// Recorded for a future branch-ordering policy; not yet consulted.
    #[allow(dead_code)]
    placed: Option<CellValue>,
}

pub(crate) fn solve(givens: &str, width: i32, height: i32, max_tier: u8) -> SolveResult {
    let mut board = match Board::new(width, height, givens) {
        Ok(board) => board,
        Err(err) => {
            debug!("board construction failed: {}", err);
            return SolveResult::rejected();
        }
    };

    let rules = rules::rules_up_to_tier(max_tier);
    let mut statistics = Statistics::new();

    let mut solutions: Vec<String> = Vec::new();
    let mut stack = vec![StackEntry {
        state: board.save_state(),
        placed: None,
    }];
    let mut work_score: u32 = 0;
    let mut max_tier_used: u8 = 0;
    let mut push_pop_count: u32 = 0;
    let mut used_branching = false;

    while solutions.len() < 2 {
        let Some(entry) = stack.pop() else {
            break;
        };
        board.restore_state(&entry.state);
        push_pop_count += 1;

        let outcome = run_rules(&mut board, &rules, &mut statistics);
        work_score += outcome.work_score;
        max_tier_used = max_tier_used.max(outcome.max_tier);

        if !board.is_valid() {
            continue;
        }

        if board.is_solved() {
            if board.is_valid_solution() {
                trace!("solution found at stack depth {}", stack.len());
                solutions.push(board.solution_string());
            }
            continue;
        }

        let Some(cell) = pick_branch_cell(&mut board) else {
            continue;
        };
        let candidates = valid_values(&mut board, cell);
        if candidates.is_empty() {
            continue;
        }
        trace!(
            "branching on ({}, {}) over {} value(s)",
            cell.x,
            cell.y,
            candidates.len()
        );

        // Push children in reverse priority order so the best value is
        // popped first.
        let saved = board.save_state();
        for &value in candidates.iter().rev() {
            board.restore_state(&saved);
            if board.place_value(cell, value) {
                stack.push(StackEntry {
                    state: board.save_state(),
                    placed: Some(value),
                });
                push_pop_count += 1;
                used_branching = true;
            }
        }
        board.restore_state(&saved);
    }

    let status = match solutions.len() {
        0 => SolveStatus::Unsolved,
        1 => SolveStatus::Solved,
        _ => SolveStatus::Multiple,
    };
    let solution = match solutions.into_iter().next() {
        Some(first) => first,
        None => board.solution_string(),
    };

    work_score += 2 * push_pop_count;
    if used_branching {
        max_tier_used = BRANCH_TIER;
    }

    statistics.log_summary();
    debug!(
        "backtracking solve: status={} work={} tier={} stack_ops={}",
        status, work_score, max_tier_used, push_pop_count
    );

    SolveResult {
        status,
        solution,
        work_score,
        max_tier_used,
    }
}

/// The most constrained undecided cell: corners whose clue arithmetic is
/// tight score highest; ties go to the first cell in row-major order.
fn pick_branch_cell(board: &mut Board) -> Option<Cell> {
    let mut best: Option<(Cell, i32)> = None;

    for cell in board.unknown_cells() {
        let mut score = 0;
        for corner in cell.corners() {
            let Some(clue) = board.clue(corner) else {
                continue;
            };
            let touches = board.count_touches(corner);
            let needed = clue as i32 - touches.current as i32;
            let slots = touches.unknown as i32;

            if needed == slots || needed == 0 {
                score += 100;
            } else if slots > 0 {
                score += 50 / slots;
            }
        }
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((cell, score));
        }
    }

    best.map(|(cell, _)| cell)
}

/// The diagonals placeable in `cell` right now, best first: loop-closing
/// values and values that would overshoot a clued corner are dropped, and
/// each clued corner a value touches is worth 10 priority points.
fn valid_values(board: &mut Board, cell: Cell) -> Vec<CellValue> {
    let mut candidates: Vec<(CellValue, i32)> = Vec::with_capacity(2);

    for value in [CellValue::Slash, CellValue::Backslash] {
        if board.would_form_loop(cell, value) {
            continue;
        }

        let (a, b) = cell.endpoints(value);
        let mut priority = 0;
        let mut overshoots = false;
        for corner in [a, b] {
            if let Some(clue) = board.clue(corner) {
                if board.count_touches(corner).current >= clue as usize {
                    overshoots = true;
                    break;
                }
                priority += 10;
            }
        }
        if !overshoots {
            candidates.push((value, priority));
        }
    }

    // Stable sort: on equal priority the slash keeps its slot.
    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates.into_iter().map(|(value, _)| value).collect()
}
