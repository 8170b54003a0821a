// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Vertex connectivity index: union-find over lattice vertices.
//!
//! Two vertices are united exactly when a diagonal is placed whose two
//! endpoints they are, so `find(u) == find(v)` holds iff `u` and `v` are
//! connected by placed diagonals. Attempting to unite two vertices already
//! in the same group means the placement would close a loop, and is
//! refused.
//!
//! Each group root carries two aggregates used by dead-end detection:
//!
//! - `exits`: the group's remaining potential incidences. An unclued vertex
//!   starts with 4 and is decremented whenever a diagonal runs past it
//!   without touching it; a clued vertex contributes its fixed clue value
//!   and is never decremented. Uniting two groups costs the merged group 2
//!   exits, one per endpoint consumed by the new edge.
//! - `border`: whether any member lies on the outer boundary of the grid.
//!
//! `find` path-compresses, so even queries mutate the parent array; the
//! parent and rank arrays are part of the board snapshot for that reason.

/// Snapshot of the connectivity index, taken by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinkState {
    parent: Vec<usize>,
    rank: Vec<u8>,
    exits: Vec<i32>,
    border: Vec<bool>,
}

#[derive(Debug, Clone)]
pub(crate) struct VertexLinks {
    parent: Vec<usize>,
    rank: Vec<u8>,
    exits: Vec<i32>,
    border: Vec<bool>,
}

impl VertexLinks {
    /// Build the index with every vertex in its own group, seeded with the
    /// given per-vertex exit budgets and border flags.
    pub(crate) fn new(exits: Vec<i32>, border: Vec<bool>) -> Self {
        debug_assert_eq!(exits.len(), border.len());
        let n = exits.len();
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            exits,
            border,
        }
    }

    /// Group root, with path compression.
    pub(crate) fn find(&mut self, v: usize) -> usize {
        let mut root = v;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut at = v;
        while self.parent[at] != root {
            let next = self.parent[at];
            self.parent[at] = root;
            at = next;
        }
        root
    }

    /// Unite the groups of `a` and `b` for a newly placed diagonal.
    ///
    /// Returns `false` without mutating anything when both are already in
    /// the same group (the placement would close a loop). On success the
    /// merged root's exits are `exits(a) + exits(b) - 2` and its border
    /// flag is the OR of the two groups.
    pub(crate) fn unite(&mut self, a: usize, b: usize) -> bool {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return false;
        }

        let merged_exits = self.exits[ra] + self.exits[rb] - 2;
        let merged_border = self.border[ra] || self.border[rb];

        if self.rank[ra] < self.rank[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        if self.rank[ra] == self.rank[rb] {
            self.rank[ra] += 1;
        }

        self.exits[ra] = merged_exits;
        self.border[ra] = merged_border;
        true
    }

    pub(crate) fn exits(&mut self, v: usize) -> i32 {
        let root = self.find(v);
        self.exits[root]
    }

    pub(crate) fn border(&mut self, v: usize) -> bool {
        let root = self.find(v);
        self.border[root]
    }

    /// Take one exit off `v`'s group, for a diagonal that runs past `v`.
    pub(crate) fn decrement_exits(&mut self, v: usize) {
        let root = self.find(v);
        self.exits[root] -= 1;
    }

    pub(crate) fn save(&self) -> LinkState {
        LinkState {
            parent: self.parent.clone(),
            rank: self.rank.clone(),
            exits: self.exits.clone(),
            border: self.border.clone(),
        }
    }

    pub(crate) fn restore(&mut self, state: &LinkState) {
        self.parent.clone_from(&state.parent);
        self.rank.clone_from(&state.rank);
        self.exits.clone_from(&state.exits);
        self.border.clone_from(&state.border);
    }
}
