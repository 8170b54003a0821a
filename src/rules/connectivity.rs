// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Loop and dead-end avoidance.
//!
//! These rules read the vertex union-find. A diagonal whose two endpoints
//! already share a group would close a loop; a diagonal joining two
//! landlocked groups whose combined exit budget drops to zero would strand
//! them. Either way the other diagonal is forced.

use super::place_if_safe;
use crate::board::Board;
use crate::grid::CellValue;

/// Where one diagonal of an undecided cell would close a loop and the
/// other would not, place the other.
pub fn no_loops(board: &mut Board) -> bool {
    let mut progress = false;

    for cell in board.unknown_cells() {
        let slash_loops = board.would_form_loop(cell, CellValue::Slash);
        let backslash_loops = board.would_form_loop(cell, CellValue::Backslash);

        if slash_loops && !backslash_loops {
            if board.place_value(cell, CellValue::Backslash) {
                progress = true;
            }
        } else if backslash_loops && !slash_loops && board.place_value(cell, CellValue::Slash) {
            progress = true;
        }
    }

    progress
}

/// Probe clue-2 vertices whose two remaining touches are both undecided:
/// speculatively place the first touch inside a snapshot frame and see
/// whether the second would then close a loop.
///
/// The frame is always restored, so this rule reports no direct progress;
/// it is retained for scoring parity with the historical rule list.
pub fn loop_avoidance_2(board: &mut Board) -> bool {
    for (vertex, clue) in board.clued_vertices() {
        if clue != 2 {
            continue;
        }
        let t = super::tally(board, vertex);
        if t.current != 0 || t.unknowns.len() != 2 {
            continue;
        }

        let first = t.unknowns[0];
        let second = t.unknowns[1];

        let state = board.save_state();
        if board.would_form_loop(first.cell, first.touching) {
            board.restore_state(&state);
            continue;
        }
        board.place_value(first.cell, first.touching);
        if board.would_form_loop(second.cell, second.touching) {
            board.restore_state(&state);
            continue;
        }
        board.restore_state(&state);
    }

    false
}

/// Where placing a diagonal would connect two vertex groups that are both
/// off the border with at most one exit each, the connection would strand
/// them; place the other diagonal.
pub fn dead_end_avoidance(board: &mut Board) -> bool {
    let mut progress = false;

    for cell in board.unknown_cells() {
        let [tl, tr, bl, br] = cell.corners();

        // A backslash joins the top-left and bottom-right corners.
        let backslash_strands = !board.group_border(tl)
            && !board.group_border(br)
            && board.group_exits(tl) <= 1
            && board.group_exits(br) <= 1;

        // A slash joins the top-right and bottom-left corners.
        let slash_strands = !board.group_border(tr)
            && !board.group_border(bl)
            && board.group_exits(tr) <= 1
            && board.group_exits(bl) <= 1;

        if backslash_strands && !slash_strands {
            if place_if_safe(board, cell, CellValue::Slash) {
                progress = true;
            }
        } else if slash_strands
            && !backslash_strands
            && place_if_safe(board, cell, CellValue::Backslash)
        {
            progress = true;
        }
    }

    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn test_no_loops_forces_the_open_diagonal() {
        let mut board = Board::new(2, 2, "i").unwrap();
        // Three sides of the diamond around the interior vertex.
        board.place_value(Cell::new(0, 0), CellValue::Slash);
        board.place_value(Cell::new(1, 0), CellValue::Backslash);
        board.place_value(Cell::new(1, 1), CellValue::Slash);
        assert!(no_loops(&mut board));
        assert_eq!(board.value(Cell::new(0, 1)), CellValue::Slash);
    }

    #[test]
    fn test_no_loops_noop_on_fresh_board() {
        let mut board = Board::new(2, 2, "i").unwrap();
        assert!(!no_loops(&mut board));
        assert!(board.unknown_cells().len() == 4);
    }

    #[test]
    fn test_loop_avoidance_2_never_reports_progress() {
        // A clue-2 vertex with both touches undecided is exactly the
        // configuration the probe inspects; the board must come back
        // untouched all the same.
        let mut board = Board::new(2, 2, "a2g").unwrap();
        let before = board.save_state();
        assert!(!loop_avoidance_2(&mut board));
        board.restore_state(&before); // no-op if nothing leaked
        assert_eq!(board.unknown_cells().len(), 4);
        assert!(!loop_avoidance_2(&mut board));
    }

    #[test]
    fn test_dead_end_avoidance_forces_away_from_stranded_groups() {
        // Clue-1 vertices at (2, 2) and (3, 3) of a 5x5 board: both groups
        // are interior with a single exit, so a backslash in cell (2, 2)
        // would strand them.
        let mut board = Board::new(5, 5, "n1f1n").unwrap();
        assert!(dead_end_avoidance(&mut board));
        assert_eq!(board.value(Cell::new(2, 2)), CellValue::Slash);
    }

    #[test]
    fn test_dead_end_avoidance_ignores_border_groups() {
        // The same two low-exit vertices, but on the border: clue-1
        // vertices at (0, 2) and (1, 3) around cell (0, 2).
        let mut board = Board::new(5, 5, "l1f1p").unwrap();
        assert!(!dead_end_avoidance(&mut board));
        assert!(board.value(Cell::new(0, 2)).is_unknown());
    }
}
