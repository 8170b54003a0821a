// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Equivalence-class deductions.
//!
//! A clued vertex that needs exactly one more touch from exactly two
//! undecided, side-sharing cells pins those cells to the same diagonal:
//! whichever of them supplies the touch, the other must mirror it (one
//! touching the vertex, both parallel). Once any member of a class becomes
//! known, every other member can be filled in.

use crate::board::Board;

/// (i) Establish classes at clued vertices needing one more touch from two
/// grid-adjacent undecided cells; (ii) fill undecided cells whose class
/// value is known, falling back to the opposite diagonal when the class
/// value would close a loop.
pub fn equivalence_classes(board: &mut Board) -> bool {
    let mut progress = false;

    // First pass: establish equivalences from clues.
    for (vertex, clue) in board.clued_vertices() {
        let t = super::tally(board, vertex);
        let needed = clue as i32 - t.current as i32;
        if needed == 1 && t.unknowns.len() == 2 {
            let a = t.unknowns[0].cell;
            let b = t.unknowns[1].cell;
            if a.is_grid_adjacent(b) && board.mark_equivalent(a, b) {
                progress = true;
            }
        }
    }

    // Second pass: propagate known class values.
    for cell in board.unknown_cells() {
        let class_value = board.class_value(cell);
        if class_value.is_unknown() {
            continue;
        }
        if !board.would_form_loop(cell, class_value) {
            if board.place_value(cell, class_value) {
                progress = true;
            }
        } else if !board.would_form_loop(cell, class_value.opposite())
            && board.place_value(cell, class_value.opposite())
        {
            progress = true;
        }
    }

    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, CellValue};

    #[test]
    fn test_establishes_class_at_one_needed_touch() {
        // Clue 1 at the interior vertex (1, 1) of a 2x2 board, with the
        // two cells left of it already known and avoiding: the two
        // remaining cells are grid-adjacent and must match.
        let mut board = Board::new(2, 2, "d1d").unwrap();
        board.place_value(Cell::new(0, 0), CellValue::Slash);
        board.place_value(Cell::new(0, 1), CellValue::Backslash);
        assert!(equivalence_classes(&mut board));
        assert_eq!(
            board.class_root(Cell::new(1, 0)),
            board.class_root(Cell::new(1, 1))
        );
    }

    #[test]
    fn test_fills_cells_from_known_class_value() {
        let mut board = Board::new(2, 1, "f").unwrap();
        board.mark_equivalent(Cell::new(0, 0), Cell::new(1, 0));
        board.place_value(Cell::new(0, 0), CellValue::Slash);
        assert!(equivalence_classes(&mut board));
        assert_eq!(board.value(Cell::new(1, 0)), CellValue::Slash);
    }

    #[test]
    fn test_noop_without_classes_or_tight_clues() {
        let mut board = Board::new(2, 2, "d2d").unwrap();
        assert!(!equivalence_classes(&mut board));
    }
}
