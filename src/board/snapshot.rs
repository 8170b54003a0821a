// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Board snapshots for backtracking.
//!
//! A [`BoardState`] is a by-value copy of everything the search can
//! disturb: the cell values, both union-find parent/rank arrays with their
//! per-root aggregates, and the v-shape masks. Restoring a snapshot yields
//! a state behaviourally indistinguishable from the saved one under every
//! public query; even path compression performed after the save is rolled
//! back along with everything else.
//!
//! Snapshots are created by the search on entry to each branch and freed
//! when popped; nothing else holds on to them. An alternative would be to
//! record per-change deltas and rewind them, which copies less on large
//! boards, but flat copies keep restore unconditionally correct and are
//! cheap at typical puzzle sizes.

use super::connectivity::LinkState;
use super::equivalence::ClassState;
use super::Board;
use crate::grid::CellValue;

/// A saved board state. Opaque: only [`Board::restore_state`] consumes it.
#[derive(Debug, Clone)]
pub struct BoardState {
    values: Vec<CellValue>,
    links: LinkState,
    classes: ClassState,
    vshapes: Vec<u8>,
}

impl Board {
    /// Capture the full mutable state of the board.
    pub fn save_state(&self) -> BoardState {
        BoardState {
            values: self.values.clone(),
            links: self.links.save(),
            classes: self.classes.save(),
            vshapes: self.vshapes.save(),
        }
    }

    /// Restore a previously captured state.
    ///
    /// The snapshot must come from a board of the same dimensions;
    /// snapshots never travel between puzzles.
    pub fn restore_state(&mut self, state: &BoardState) {
        self.values.copy_from_slice(&state.values);
        self.links.restore(&state.links);
        self.classes.restore(&state.classes);
        self.vshapes.restore(&state.vshapes);
    }
}
