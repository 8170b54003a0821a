// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! A single fixpoint in the manner of Simon Tatham's Slant solver.
//!
//! Three phases run inside one `loop until nothing changed`:
//!
//! 1. **Clue completion with equivalence tracking**: walk the cells around
//!    each clued vertex in cyclic order; a pair of neighbouring undecided
//!    cells known to be equivalent contributes exactly one touch whichever
//!    way it falls, which tightens the usual needed-versus-slots
//!    arithmetic. When the remaining cells are all forced one way, fill
//!    them; when two undecided cells sit next to each other and exactly
//!    one touch is needed, mark them equivalent.
//! 2. **Per-cell filling**: combine class values, loop detection and
//!    dead-end detection to force single cells.
//! 3. **V-shape masks**: clear bits on the board's own masks from known
//!    values and interior clues, merging cells whose pairs empty.
//!
//! Later rules in the table duplicate parts of this one and vice versa;
//! both are kept, with their own scores, and whichever fires first in
//! table order claims the progress.

use crate::board::vbitmap::{
    BACKSLASH_SELF_CLEAR, SLASH_SELF_CLEAR, V_ABOVE, V_BELOW, V_HORIZONTAL, V_LEFT, V_RIGHT,
    V_VERTICAL,
};
use crate::board::Board;
use crate::grid::{Cell, CellValue, Vertex, VertexNeighbour};

pub fn simon_unified(board: &mut Board) -> bool {
    let w = board.width();
    let h = board.height();
    let mut progress = false;

    let mut done_something = true;
    while done_something {
        done_something = false;

        // Phase 1: clue completion with equivalence tracking.
        for vy in 0..=h {
            for vx in 0..=w {
                let Some(clue) = board.clue(Vertex::new(vx, vy)) else {
                    continue;
                };

                // The cells around the vertex in cyclic order, each with
                // the diagonal that would touch it.
                let mut neighbours: Vec<VertexNeighbour> = Vec::with_capacity(4);
                if vx > 0 && vy > 0 {
                    neighbours.push(VertexNeighbour {
                        cell: Cell::new(vx - 1, vy - 1),
                        touching: CellValue::Backslash,
                    });
                }
                if vx > 0 && vy < h {
                    neighbours.push(VertexNeighbour {
                        cell: Cell::new(vx - 1, vy),
                        touching: CellValue::Slash,
                    });
                }
                if vx < w && vy < h {
                    neighbours.push(VertexNeighbour {
                        cell: Cell::new(vx, vy),
                        touching: CellValue::Backslash,
                    });
                }
                if vx < w && vy > 0 {
                    neighbours.push(VertexNeighbour {
                        cell: Cell::new(vx, vy - 1),
                        touching: CellValue::Slash,
                    });
                }
                if neighbours.is_empty() {
                    continue;
                }

                // nl: touches still needed; nu: undecided cells not
                // absorbed into the matched pair. A pair of neighbouring
                // undecided cells in one equivalence class supplies
                // exactly one touch between them, so it converts two
                // slots and one needed touch into nothing.
                let count = neighbours.len();
                let mut nu: i32 = 0;
                let mut nl: i32 = clue as i32;

                let mut last_cell = neighbours[count - 1].cell;
                let mut last_class: Option<usize> = if board.value(last_cell).is_unknown() {
                    Some(board.class_root(last_cell))
                } else {
                    None
                };
                let mut matched_pair: Option<(Cell, Cell)> = None;

                for n in &neighbours {
                    if board.value(n.cell).is_unknown() {
                        nu += 1;
                        if matched_pair.is_none() {
                            let class = board.class_root(n.cell);
                            if Some(class) == last_class && last_cell != n.cell {
                                matched_pair = Some((last_cell, n.cell));
                                nl -= 1;
                                nu -= 2;
                            } else {
                                last_class = Some(class);
                            }
                        }
                    } else {
                        last_class = None;
                        if board.value(n.cell) == n.touching {
                            nl -= 1;
                        }
                    }
                    last_cell = n.cell;
                }

                if nl < 0 || nl > nu {
                    continue;
                }

                let in_pair = |cell: Cell| match matched_pair {
                    Some((a, b)) => cell == a || cell == b,
                    None => false,
                };

                if nu > 0 && (nl == 0 || nl == nu) {
                    // Everything left is forced: touching when touches are
                    // still needed, avoiding when the clue is satisfied.
                    for n in &neighbours {
                        if in_pair(n.cell) || !board.value(n.cell).is_unknown() {
                            continue;
                        }
                        let value = if nl > 0 {
                            n.touching
                        } else {
                            n.touching.opposite()
                        };
                        if !board.would_form_loop(n.cell, value) {
                            board.place_value(n.cell, value);
                            done_something = true;
                            progress = true;
                        }
                    }
                } else if nu == 2 && nl == 1 {
                    // Two loose undecided cells, one touch needed: if they
                    // neighbour each other in the cyclic order they must
                    // carry the same diagonal.
                    let mut first: Option<usize> = None;
                    for (i, n) in neighbours.iter().enumerate() {
                        if !board.value(n.cell).is_unknown() || in_pair(n.cell) {
                            continue;
                        }
                        match first {
                            None => first = Some(i),
                            Some(at) => {
                                if at == i - 1 || (at == 0 && i == count - 1) {
                                    if board.mark_equivalent(neighbours[at].cell, n.cell) {
                                        done_something = true;
                                        progress = true;
                                    }
                                    break;
                                }
                            }
                        }
                    }
                }
            }
        }

        if done_something {
            continue;
        }

        // Phase 2: loop avoidance, dead-end avoidance, equivalence
        // filling, cell by cell.
        for y in 0..h {
            for x in 0..w {
                let cell = Cell::new(x, y);
                if !board.value(cell).is_unknown() {
                    continue;
                }

                let mut force_slash = false;
                let mut force_backslash = false;

                match board.class_value(cell) {
                    CellValue::Slash => force_slash = true,
                    CellValue::Backslash => force_backslash = true,
                    CellValue::Unknown => {}
                }

                let [tl, tr, bl, br] = cell.corners();

                // A backslash here would close a loop or strand two
                // landlocked groups: the slash is forced. Symmetrically
                // for the slash.
                if board.vertex_root(tl) == board.vertex_root(br) {
                    force_slash = true;
                }
                if !force_slash
                    && !board.group_border(tl)
                    && !board.group_border(br)
                    && board.group_exits(tl) <= 1
                    && board.group_exits(br) <= 1
                {
                    force_slash = true;
                }

                if board.vertex_root(tr) == board.vertex_root(bl) {
                    force_backslash = true;
                }
                if !force_backslash
                    && !board.group_border(tr)
                    && !board.group_border(bl)
                    && board.group_exits(tr) <= 1
                    && board.group_exits(bl) <= 1
                {
                    force_backslash = true;
                }

                // Both directions forced means a contradiction; leave it
                // for the outer validity check.
                if force_slash && force_backslash {
                    continue;
                }
                if force_slash {
                    board.place_value(cell, CellValue::Slash);
                    done_something = true;
                    progress = true;
                } else if force_backslash {
                    board.place_value(cell, CellValue::Backslash);
                    done_something = true;
                    progress = true;
                }
            }
        }

        if done_something {
            continue;
        }

        // Phase 3: v-shape mask propagation on the board's own masks.
        for y in 0..h {
            for x in 0..w {
                let cell = Cell::new(x, y);
                let value = board.value(cell);

                if !value.is_unknown() {
                    if x > 0 {
                        let left = Cell::new(x - 1, y);
                        let bits = if value == CellValue::Slash {
                            V_LEFT
                        } else {
                            V_RIGHT
                        };
                        if board.clear_vbitmap(left, bits) {
                            done_something = true;
                            progress = true;
                        }
                    }
                    if x + 1 < w {
                        let bits = if value == CellValue::Slash {
                            V_RIGHT
                        } else {
                            V_LEFT
                        };
                        if board.clear_vbitmap(cell, bits) {
                            done_something = true;
                            progress = true;
                        }
                    }
                    if y > 0 {
                        let above = Cell::new(x, y - 1);
                        let bits = if value == CellValue::Slash {
                            V_ABOVE
                        } else {
                            V_BELOW
                        };
                        if board.clear_vbitmap(above, bits) {
                            done_something = true;
                            progress = true;
                        }
                    }
                    if y + 1 < h {
                        let bits = if value == CellValue::Slash {
                            V_BELOW
                        } else {
                            V_ABOVE
                        };
                        if board.clear_vbitmap(cell, bits) {
                            done_something = true;
                            progress = true;
                        }
                    }
                }

                if x + 1 < w
                    && board.vbitmap(cell) & V_HORIZONTAL == 0
                    && board.mark_equivalent(cell, Cell::new(x + 1, y))
                {
                    done_something = true;
                    progress = true;
                }
                if y + 1 < h
                    && board.vbitmap(cell) & V_VERTICAL == 0
                    && board.mark_equivalent(cell, Cell::new(x, y + 1))
                {
                    done_something = true;
                    progress = true;
                }
            }
        }

        // Mask clearings from interior clues.
        for vy in 1..h {
            for vx in 1..w {
                let Some(clue) = board.clue(Vertex::new(vx, vy)) else {
                    continue;
                };
                let tl = Cell::new(vx - 1, vy - 1);
                let bl = Cell::new(vx - 1, vy);
                let tr = Cell::new(vx, vy - 1);

                match clue {
                    1 => {
                        for (cell, bits) in
                            [(tl, SLASH_SELF_CLEAR), (bl, V_LEFT), (tr, V_ABOVE)]
                        {
                            if board.clear_vbitmap(cell, bits) {
                                done_something = true;
                                progress = true;
                            }
                        }
                    }
                    3 => {
                        for (cell, bits) in
                            [(tl, BACKSLASH_SELF_CLEAR), (bl, V_RIGHT), (tr, V_BELOW)]
                        {
                            if board.clear_vbitmap(cell, bits) {
                                done_something = true;
                                progress = true;
                            }
                        }
                    }
                    2 => {
                        let tl_horizontal = board.vbitmap(tl) & V_HORIZONTAL;
                        let bl_horizontal = board.vbitmap(bl) & V_HORIZONTAL;
                        if board.clear_vbitmap(tl, V_HORIZONTAL ^ bl_horizontal) {
                            done_something = true;
                            progress = true;
                        }
                        if board.clear_vbitmap(bl, V_HORIZONTAL ^ tl_horizontal) {
                            done_something = true;
                            progress = true;
                        }

                        let tl_vertical = board.vbitmap(tl) & V_VERTICAL;
                        let tr_vertical = board.vbitmap(tr) & V_VERTICAL;
                        if board.clear_vbitmap(tl, V_VERTICAL ^ tr_vertical) {
                            done_something = true;
                            progress = true;
                        }
                        if board.clear_vbitmap(tr, V_VERTICAL ^ tl_vertical) {
                            done_something = true;
                            progress = true;
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    progress
}
