// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Deductions local to clued vertices.
//!
//! These rules only ever look at one clued vertex, or at a pair of
//! orthogonally neighbouring ones. Each forces diagonals whose direction
//! is pinned by the clue arithmetic: how many touches the clue still
//! needs versus how many undecided cells remain around it.

use super::{place_if_safe, tally};
use crate::board::Board;
use crate::grid::{Cell, CellValue};

/// A clued vertex already touched by exactly its clue: every remaining
/// undecided neighbour must avoid it.
pub fn clue_finish_b(board: &mut Board) -> bool {
    let mut progress = false;

    for (vertex, clue) in board.clued_vertices() {
        let t = tally(board, vertex);
        if t.current == clue as usize && !t.unknowns.is_empty() {
            for n in &t.unknowns {
                if place_if_safe(board, n.cell, n.touching.opposite()) {
                    progress = true;
                }
            }
        }
    }

    progress
}

/// A clued vertex that needs as many touches as it has undecided
/// neighbours: all of them must touch it.
pub fn clue_finish_a(board: &mut Board) -> bool {
    let mut progress = false;

    for (vertex, clue) in board.clued_vertices() {
        let t = tally(board, vertex);
        let needed = clue as i32 - t.current as i32;
        if needed > 0 && needed as usize == t.unknowns.len() {
            for n in &t.unknowns {
                if place_if_safe(board, n.cell, n.touching) {
                    progress = true;
                }
            }
        }
    }

    progress
}

/// A clue equal to its vertex's full adjacency (2 at a corner, 3 on an
/// edge, 4 interior) forces every adjacent cell to touch.
pub fn edge_clue_constraints(board: &mut Board) -> bool {
    let mut progress = false;

    for (vertex, clue) in board.clued_vertices() {
        let neighbours = board.vertex_neighbours(vertex);
        let max_possible = neighbours.len();
        if clue as usize > max_possible {
            continue;
        }
        if clue as usize == max_possible {
            for n in neighbours {
                if !board.value(n.cell).is_unknown() {
                    continue;
                }
                if place_if_safe(board, n.cell, n.touching) {
                    progress = true;
                }
            }
        }
    }

    progress
}

/// A clue of 2 at a vertex with exactly two adjacent cells: both must
/// touch it, forming a V.
pub fn border_two_v_shape(board: &mut Board) -> bool {
    let mut progress = false;

    for (vertex, clue) in board.clued_vertices() {
        if clue != 2 {
            continue;
        }
        let neighbours = board.vertex_neighbours(vertex);
        if neighbours.len() != 2 {
            continue;
        }
        let touches = board.count_touches(vertex);
        if touches.current + touches.unknown == 2 && touches.unknown > 0 {
            for n in neighbours {
                if !board.value(n.cell).is_unknown() {
                    continue;
                }
                if place_if_safe(board, n.cell, n.touching) {
                    progress = true;
                }
            }
        }
    }

    progress
}

/// Two horizontally adjacent cells forming `\/` under a clue-3 vertex (or
/// `/\` above one) already give it two touches from below (above); with
/// undecided neighbours left, the remaining touches must come from the
/// opposite side.
pub fn v_pattern_with_three(board: &mut Board) -> bool {
    let mut progress = false;

    for y in 0..board.height() {
        for x in 0..board.width() - 1 {
            let left = Cell::new(x, y);
            let right = Cell::new(x + 1, y);

            // `\/` with the clue-3 vertex above the shared corner.
            if board.value(left) == CellValue::Backslash
                && board.value(right) == CellValue::Slash
            {
                if let Some(vertex) = board.vertex_at(x + 1, y) {
                    if board.clue(vertex) == Some(3) {
                        let touches = board.count_touches(vertex);
                        if touches.current == 2 && touches.unknown > 0 {
                            for n in board.vertex_neighbours(vertex) {
                                if !board.value(n.cell).is_unknown() || n.cell.y >= y {
                                    continue;
                                }
                                if place_if_safe(board, n.cell, n.touching) {
                                    progress = true;
                                }
                            }
                        }
                    }
                }
            }

            // `/\` with the clue-3 vertex below the shared corner.
            if board.value(left) == CellValue::Slash
                && board.value(right) == CellValue::Backslash
            {
                if let Some(vertex) = board.vertex_at(x + 1, y + 1) {
                    if board.clue(vertex) == Some(3) {
                        let touches = board.count_touches(vertex);
                        if touches.current == 2 && touches.unknown > 0 {
                            for n in board.vertex_neighbours(vertex) {
                                if !board.value(n.cell).is_unknown() || n.cell.y <= y {
                                    continue;
                                }
                                if place_if_safe(board, n.cell, n.touching) {
                                    progress = true;
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    progress
}

/// A clue-1 vertex already at its single touch, next to another clue-1
/// vertex: the cells they share must avoid this vertex.
pub fn adjacent_ones(board: &mut Board) -> bool {
    let mut progress = false;

    for (vertex, clue) in board.clued_vertices() {
        if clue != 1 {
            continue;
        }
        if board.count_touches(vertex).current != 1 {
            continue;
        }

        for other in vertex.neighbours() {
            if board.clue(other) != Some(1) {
                continue;
            }
            let other_cells: Vec<Cell> = board
                .vertex_neighbours(other)
                .into_iter()
                .map(|n| n.cell)
                .collect();

            for n in board.vertex_neighbours(vertex) {
                if !board.value(n.cell).is_unknown() {
                    continue;
                }
                if other_cells.contains(&n.cell)
                    && place_if_safe(board, n.cell, n.touching.opposite())
                {
                    progress = true;
                }
            }
        }
    }

    progress
}

/// Two neighbouring clue-3 vertices: when one vertex's current touches,
/// shared cells and non-shared undecided cells together add up to exactly
/// 3, the non-shared undecided cells must all touch it.
pub fn adjacent_threes(board: &mut Board) -> bool {
    let mut progress = false;

    for (vertex, clue) in board.clued_vertices() {
        if clue != 3 {
            continue;
        }
        let current = board.count_touches(vertex).current;

        for other in vertex.neighbours() {
            if board.clue(other) != Some(3) {
                continue;
            }
            let other_cells: Vec<Cell> = board
                .vertex_neighbours(other)
                .into_iter()
                .map(|n| n.cell)
                .collect();

            let (shared, unshared): (Vec<_>, Vec<_>) = board
                .vertex_neighbours(vertex)
                .into_iter()
                .partition(|n| other_cells.contains(&n.cell));
            let unshared_unknown: Vec<_> = unshared
                .into_iter()
                .filter(|n| board.value(n.cell).is_unknown())
                .collect();

            if current + unshared_unknown.len() + shared.len() == 3 && !unshared_unknown.is_empty()
            {
                for n in &unshared_unknown {
                    if place_if_safe(board, n.cell, n.touching) {
                        progress = true;
                    }
                }
            }
        }
    }

    progress
}
