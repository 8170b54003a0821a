// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The Slant board: cell values, vertex clues, and the incremental indices
//! the production rules and the search read and maintain.
//!
//! # Memory model
//!
//! Everything is a flat, index-addressed array: cell values row-major,
//! vertex data row-major over the `(width + 1) * (height + 1)` lattice.
//! Cells and vertices reference each other only by coordinate, never by
//! owning link, so a [`BoardState`] snapshot is a handful of array copies
//! (see [`snapshot`]).
//!
//! # Mutation discipline
//!
//! [`Board::place_value`] is the only routine that sets a cell value. It
//! refuses placements that would close a loop, keeps the exit budgets and
//! the equivalence-class slash value in step, and never overwrites a known
//! cell: within a search branch cell values only move from unknown to
//! known, and backtracking restores them wholesale from a snapshot.
//!
//! Queries that route through the union-finds take `&mut self` because
//! `find` path-compresses; compression is part of the snapshotted state.

pub mod connectivity;
pub mod equivalence;
pub mod snapshot;
pub mod vbitmap;

pub use snapshot::BoardState;

use crate::grid::givens;
use crate::grid::{Cell, CellValue, TouchCount, Vertex, VertexNeighbour};
use log::trace;
use self::connectivity::VertexLinks;
use self::equivalence::CellClasses;
use self::vbitmap::VShapeMap;
use std::fmt;

/// Errors surfaced by board construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The givens string decodes to the wrong number of vertices.
    GivensLength { decoded: usize, expected: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::GivensLength { decoded, expected } => {
                write!(
                    f,
                    "givens decode to {} vertices, expected {}",
                    decoded, expected
                )
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// A Slant puzzle board.
#[derive(Debug, Clone)]
pub struct Board {
    width: i32,
    height: i32,
    values: Vec<CellValue>,
    clues: Vec<Option<u8>>,
    links: VertexLinks,
    classes: CellClasses,
    vshapes: VShapeMap,
}

impl Board {
    /// Build a board from decoded givens.
    ///
    /// No placements are made here; clue-driven deductions are left to the
    /// production rules. Unclued vertices start with an exit budget of 4
    /// (capped by incidence at placement time, not at construction), clued
    /// vertices with their clue value.
    pub fn new(width: i32, height: i32, givens_string: &str) -> Result<Self, BoardError> {
        debug_assert!(width >= 0 && height >= 0);
        let clues = givens::decode(givens_string);
        let expected = ((width + 1) * (height + 1)) as usize;
        if clues.len() != expected {
            return Err(BoardError::GivensLength {
                decoded: clues.len(),
                expected,
            });
        }

        let mut exits = Vec::with_capacity(expected);
        let mut border = Vec::with_capacity(expected);
        for vy in 0..=height {
            for vx in 0..=width {
                let clue = clues[(vy * (width + 1) + vx) as usize];
                exits.push(clue.map_or(4, i32::from));
                border.push(vx == 0 || vx == width || vy == 0 || vy == height);
            }
        }

        let cell_count = (width * height) as usize;
        Ok(Self {
            width,
            height,
            values: vec![CellValue::Unknown; cell_count],
            clues,
            links: VertexLinks::new(exits, border),
            classes: CellClasses::new(cell_count),
            vshapes: VShapeMap::new(cell_count),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    // Coordinate plumbing

    fn cell_index(&self, cell: Cell) -> usize {
        debug_assert!(self.contains_cell(cell));
        (cell.y * self.width + cell.x) as usize
    }

    fn vertex_index(&self, vertex: Vertex) -> usize {
        debug_assert!(self.contains_vertex(vertex));
        (vertex.y * (self.width + 1) + vertex.x) as usize
    }

    pub fn contains_cell(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    pub fn contains_vertex(&self, vertex: Vertex) -> bool {
        (0..=self.width).contains(&vertex.x) && (0..=self.height).contains(&vertex.y)
    }

    /// The cell at `(x, y)`, or `None` when out of range.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        let cell = Cell::new(x, y);
        self.contains_cell(cell).then_some(cell)
    }

    /// The vertex at `(x, y)`, or `None` when out of range.
    pub fn vertex_at(&self, x: i32, y: i32) -> Option<Vertex> {
        let vertex = Vertex::new(x, y);
        self.contains_vertex(vertex).then_some(vertex)
    }

    // Cell and clue queries

    pub fn value(&self, cell: Cell) -> CellValue {
        self.values[self.cell_index(cell)]
    }

    /// The clue at `vertex`, or `None` when unclued or out of range.
    pub fn clue(&self, vertex: Vertex) -> Option<u8> {
        if !self.contains_vertex(vertex) {
            return None;
        }
        self.clues[self.vertex_index(vertex)]
    }

    /// All clued vertices with their clues, row-major.
    pub fn clued_vertices(&self) -> Vec<(Vertex, u8)> {
        let mut out = Vec::new();
        for vy in 0..=self.height {
            for vx in 0..=self.width {
                let vertex = Vertex::new(vx, vy);
                if let Some(clue) = self.clues[self.vertex_index(vertex)] {
                    out.push((vertex, clue));
                }
            }
        }
        out
    }

    /// All still-undecided cells, row-major.
    pub fn unknown_cells(&self) -> Vec<Cell> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = Cell::new(x, y);
                if self.value(cell).is_unknown() {
                    out.push(cell);
                }
            }
        }
        out
    }

    /// The up-to-four cells around `vertex`, each with the diagonal value
    /// that would touch the vertex, in reading order: top-left, top-right,
    /// bottom-left, bottom-right.
    pub fn vertex_neighbours(&self, vertex: Vertex) -> Vec<VertexNeighbour> {
        let (vx, vy) = (vertex.x, vertex.y);
        let candidates = [
            (vx - 1, vy - 1, CellValue::Backslash),
            (vx, vy - 1, CellValue::Slash),
            (vx - 1, vy, CellValue::Slash),
            (vx, vy, CellValue::Backslash),
        ];
        candidates
            .into_iter()
            .filter_map(|(x, y, touching)| {
                self.cell_at(x, y).map(|cell| VertexNeighbour { cell, touching })
            })
            .collect()
    }

    /// Count the placed diagonals touching `vertex` and the undecided
    /// cells around it.
    pub fn count_touches(&self, vertex: Vertex) -> TouchCount {
        let mut current = 0;
        let mut unknown = 0;
        for n in self.vertex_neighbours(vertex) {
            let value = self.value(n.cell);
            if value.is_unknown() {
                unknown += 1;
            } else if value == n.touching {
                current += 1;
            }
        }
        TouchCount { current, unknown }
    }

    // Placement

    /// Would placing `value` in `cell` close a loop of diagonals?
    ///
    /// Non-mutating counterpart of the check inside [`Board::place_value`]
    /// (up to path compression): true exactly when `place_value` would
    /// refuse the placement.
    pub fn would_form_loop(&mut self, cell: Cell, value: CellValue) -> bool {
        let (a, b) = cell.endpoints(value);
        let a = self.vertex_index(a);
        let b = self.vertex_index(b);
        self.links.find(a) == self.links.find(b)
    }

    /// Place `value` in `cell`, the sole mutator of cell values.
    ///
    /// Already-known cells succeed trivially. If uniting the diagonal's two
    /// endpoints would close a loop, nothing is mutated and `false` is
    /// returned. Otherwise the endpoints are united, each bypassed corner's
    /// group loses one exit (unless that vertex is clued, whose budget is
    /// fixed), the value is set, and the cell's equivalence class records
    /// it as the class slash value.
    pub fn place_value(&mut self, cell: Cell, value: CellValue) -> bool {
        debug_assert!(!value.is_unknown());
        if !self.value(cell).is_unknown() {
            return true;
        }

        let (a, b) = cell.endpoints(value);
        let (a, b) = (self.vertex_index(a), self.vertex_index(b));
        if !self.links.unite(a, b) {
            trace!(
                "refusing {:?} at ({}, {}): would close a loop",
                value,
                cell.x,
                cell.y
            );
            return false;
        }

        let (n1, n2) = cell.bypassed(value);
        self.decrement_exits(n1);
        self.decrement_exits(n2);

        let index = self.cell_index(cell);
        self.values[index] = value;
        self.classes.set_value(index, value);
        true
    }

    fn decrement_exits(&mut self, vertex: Vertex) {
        // Clued vertices have fixed exit budgets.
        if self.clue(vertex).is_some() {
            return;
        }
        let index = self.vertex_index(vertex);
        self.links.decrement_exits(index);
    }

    // Vertex group queries

    pub fn vertex_root(&mut self, vertex: Vertex) -> usize {
        let index = self.vertex_index(vertex);
        self.links.find(index)
    }

    /// Remaining potential incidences of `vertex`'s group.
    pub fn group_exits(&mut self, vertex: Vertex) -> i32 {
        let index = self.vertex_index(vertex);
        self.links.exits(index)
    }

    /// Does `vertex`'s group reach the outer boundary of the grid?
    pub fn group_border(&mut self, vertex: Vertex) -> bool {
        let index = self.vertex_index(vertex);
        self.links.border(index)
    }

    // Equivalence class queries

    pub fn class_root(&mut self, cell: Cell) -> usize {
        let index = self.cell_index(cell);
        self.classes.find(index)
    }

    /// The known common value of `cell`'s equivalence class, if any.
    pub fn class_value(&mut self, cell: Cell) -> CellValue {
        let index = self.cell_index(cell);
        self.classes.value(index)
    }

    /// Declare that `a` and `b` must carry the same diagonal.
    ///
    /// Returns `true` iff a real merge occurred; refuses conflicting
    /// merges, see [`equivalence::CellClasses::merge`].
    pub fn mark_equivalent(&mut self, a: Cell, b: Cell) -> bool {
        let ia = self.cell_index(a);
        let ib = self.cell_index(b);
        self.classes.merge(ia, ib)
    }

    // V-shape masks

    pub fn vbitmap(&self, cell: Cell) -> u8 {
        let index = self.cell_index(cell);
        self.vshapes.get(index)
    }

    /// Clear `bits` in `cell`'s v-shape mask; `true` iff anything changed.
    pub fn clear_vbitmap(&mut self, cell: Cell, bits: u8) -> bool {
        let index = self.cell_index(cell);
        self.vshapes.clear(index, bits)
    }

    // Solution checks

    /// All cells decided.
    pub fn is_solved(&self) -> bool {
        self.values.iter().all(|v| !v.is_unknown())
    }

    /// No clued vertex exceeds its clue.
    pub fn is_valid(&self) -> bool {
        self.clued_vertices()
            .into_iter()
            .all(|(vertex, clue)| self.count_touches(vertex).current <= clue as usize)
    }

    /// All cells decided and every clued vertex at exactly its clue.
    pub fn is_valid_solution(&self) -> bool {
        self.is_solved()
            && self
                .clued_vertices()
                .into_iter()
                .all(|(vertex, clue)| self.count_touches(vertex).current == clue as usize)
    }

    /// Row-major rendering: `/`, `\` and `.` per cell.
    pub fn solution_string(&self) -> String {
        self.values.iter().map(|v| v.glyph()).collect()
    }
}

impl Board {
    fn fmt_clue_row(&self, f: &mut fmt::Formatter<'_>, vy: i32) -> fmt::Result {
        for vx in 0..=self.width {
            match self.clue(Vertex::new(vx, vy)) {
                Some(clue) => write!(f, "{}", clue)?,
                None => write!(f, ".")?,
            }
            if vx < self.width {
                write!(f, "-")?;
            }
        }
        Ok(())
    }
}

/// Diagnostic rendering: clue rows interleaved with cell rows.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_clue_row(f, 0)?;
        for y in 0..self.height {
            writeln!(f)?;
            write!(f, "|")?;
            for x in 0..self.width {
                write!(f, "{}|", self.value(Cell::new(x, y)).glyph())?;
            }
            writeln!(f)?;
            self.fmt_clue_row(f, y + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_wrong_givens_length() {
        let err = Board::new(3, 3, "j").unwrap_err();
        assert_eq!(
            err,
            BoardError::GivensLength {
                decoded: 10,
                expected: 16
            }
        );
    }

    #[test]
    fn test_construction_reads_clues() {
        let board = Board::new(1, 1, "1c").unwrap();
        assert_eq!(board.clue(Vertex::new(0, 0)), Some(1));
        assert_eq!(board.clue(Vertex::new(1, 0)), None);
        assert_eq!(board.clue(Vertex::new(5, 5)), None);
        assert_eq!(board.clued_vertices(), vec![(Vertex::new(0, 0), 1)]);
    }

    #[test]
    fn test_initial_exits_and_border() {
        let mut board = Board::new(2, 2, "d4d").unwrap();
        // Clued interior vertex: exits fixed at the clue.
        assert_eq!(board.group_exits(Vertex::new(1, 1)), 4);
        assert!(!board.group_border(Vertex::new(1, 1)));
        // Unclued corner: budget 4, on the border.
        assert_eq!(board.group_exits(Vertex::new(0, 0)), 4);
        assert!(board.group_border(Vertex::new(0, 0)));
    }

    #[test]
    fn test_vertex_neighbours_at_corner_and_interior() {
        let board = Board::new(2, 2, "i").unwrap();
        // Grid corner: a single adjacent cell, touched by a backslash.
        let at_corner = board.vertex_neighbours(Vertex::new(0, 0));
        assert_eq!(at_corner.len(), 1);
        assert_eq!(at_corner[0].cell, Cell::new(0, 0));
        assert_eq!(at_corner[0].touching, CellValue::Backslash);
        // Interior vertex: all four cells.
        assert_eq!(board.vertex_neighbours(Vertex::new(1, 1)).len(), 4);
    }

    #[test]
    fn test_place_value_updates_touches() {
        let mut board = Board::new(2, 2, "i").unwrap();
        assert!(board.place_value(Cell::new(0, 0), CellValue::Backslash));
        let touches = board.count_touches(Vertex::new(1, 1));
        assert_eq!(touches.current, 1);
        assert_eq!(touches.unknown, 3);
        // The slash-touching corners were bypassed.
        assert_eq!(board.count_touches(Vertex::new(1, 0)).current, 0);
    }

    #[test]
    fn test_place_value_is_a_noop_on_known_cells() {
        let mut board = Board::new(1, 1, "d").unwrap();
        assert!(board.place_value(Cell::new(0, 0), CellValue::Slash));
        assert!(board.place_value(Cell::new(0, 0), CellValue::Backslash));
        assert_eq!(board.value(Cell::new(0, 0)), CellValue::Slash);
    }

    #[test]
    fn test_exits_accounting_after_placement() {
        let mut board = Board::new(2, 2, "i").unwrap();
        board.place_value(Cell::new(0, 0), CellValue::Slash);
        // The two joined endpoints pool their budgets minus the new edge.
        assert_eq!(board.group_exits(Vertex::new(0, 1)), 4 + 4 - 2);
        assert_eq!(
            board.vertex_root(Vertex::new(0, 1)),
            board.vertex_root(Vertex::new(1, 0))
        );
        // The two bypassed corners each lost one exit.
        assert_eq!(board.group_exits(Vertex::new(0, 0)), 3);
        assert_eq!(board.group_exits(Vertex::new(1, 1)), 3);
    }

    #[test]
    fn test_clued_vertices_keep_fixed_exits() {
        // Clue 2 at the interior vertex (1, 1) of a 2x2 board.
        let mut board = Board::new(2, 2, "d2d").unwrap();
        board.place_value(Cell::new(0, 0), CellValue::Slash);
        // (1, 1) was bypassed but is clued, so its budget is untouched.
        assert_eq!(board.group_exits(Vertex::new(1, 1)), 2);
    }

    #[test]
    fn test_loop_refused_and_detected() {
        let mut board = Board::new(2, 2, "i").unwrap();
        // Three sides of a diamond around the interior vertex (1, 1).
        assert!(board.place_value(Cell::new(0, 0), CellValue::Slash));
        assert!(board.place_value(Cell::new(1, 0), CellValue::Backslash));
        assert!(board.place_value(Cell::new(1, 1), CellValue::Slash));
        // The fourth side would close it.
        assert!(board.would_form_loop(Cell::new(0, 1), CellValue::Backslash));
        assert!(!board.place_value(Cell::new(0, 1), CellValue::Backslash));
        assert!(board.value(Cell::new(0, 1)).is_unknown());
        // The other diagonal is fine.
        assert!(!board.would_form_loop(Cell::new(0, 1), CellValue::Slash));
        assert!(board.place_value(Cell::new(0, 1), CellValue::Slash));
    }

    #[test]
    fn test_placement_records_class_value() {
        let mut board = Board::new(2, 2, "i").unwrap();
        let a = Cell::new(0, 0);
        let b = Cell::new(1, 0);
        assert!(board.mark_equivalent(a, b));
        board.place_value(a, CellValue::Backslash);
        assert_eq!(board.class_value(b), CellValue::Backslash);
    }

    #[test]
    fn test_validity_checks() {
        // Clue 1 at the interior vertex of a 2x2 board.
        let mut board = Board::new(2, 2, "d1d").unwrap();
        assert!(board.is_valid());
        board.place_value(Cell::new(0, 0), CellValue::Backslash);
        assert!(board.is_valid());
        board.place_value(Cell::new(1, 1), CellValue::Backslash);
        // Two touches on a clue of 1.
        assert!(!board.is_valid());
        assert!(!board.is_valid_solution());
    }

    #[test]
    fn test_solution_string_row_major() {
        let mut board = Board::new(2, 1, "f").unwrap();
        board.place_value(Cell::new(1, 0), CellValue::Backslash);
        assert_eq!(board.solution_string(), ".\\");
        board.place_value(Cell::new(0, 0), CellValue::Slash);
        assert_eq!(board.solution_string(), "/\\");
        assert!(board.is_solved());
    }
}
