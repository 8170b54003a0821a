// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cell equivalence classes.
//!
//! Two cells are put in the same class when a deduction proves they must
//! carry the same (possibly still unknown) diagonal. Each class root
//! carries a `slashval`: the class's common value once any member is known
//! or inferred. Merging two classes whose slash values are both known but
//! differ is refused; the caller treats that as "no progress".

use crate::grid::CellValue;

/// Snapshot of the equivalence index, taken by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClassState {
    parent: Vec<usize>,
    rank: Vec<u8>,
    slashval: Vec<CellValue>,
}

#[derive(Debug, Clone)]
pub(crate) struct CellClasses {
    parent: Vec<usize>,
    rank: Vec<u8>,
    slashval: Vec<CellValue>,
}

impl CellClasses {
    pub(crate) fn new(cell_count: usize) -> Self {
        Self {
            parent: (0..cell_count).collect(),
            rank: vec![0; cell_count],
            slashval: vec![CellValue::Unknown; cell_count],
        }
    }

    /// Class root, with path compression.
    pub(crate) fn find(&mut self, cell: usize) -> usize {
        let mut root = cell;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut at = cell;
        while self.parent[at] != root {
            let next = self.parent[at];
            self.parent[at] = root;
            at = next;
        }
        root
    }

    /// The class's common value, if any member is known.
    pub(crate) fn value(&mut self, cell: usize) -> CellValue {
        let root = self.find(cell);
        self.slashval[root]
    }

    /// Record that `cell`'s class is now known to hold `value`.
    pub(crate) fn set_value(&mut self, cell: usize, value: CellValue) {
        let root = self.find(cell);
        self.slashval[root] = value;
    }

    /// Merge the classes of `a` and `b`.
    ///
    /// Returns `true` iff a real merge occurred. Refuses (returning
    /// `false`) when the cells are already equivalent, or when both classes
    /// have known, conflicting slash values. The merged class keeps
    /// whichever value was known.
    pub(crate) fn merge(&mut self, a: usize, b: usize) -> bool {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return false;
        }

        let va = self.slashval[ra];
        let vb = self.slashval[rb];
        if !va.is_unknown() && !vb.is_unknown() && va != vb {
            return false;
        }
        let merged = if va.is_unknown() { vb } else { va };

        if self.rank[ra] < self.rank[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        if self.rank[ra] == self.rank[rb] {
            self.rank[ra] += 1;
        }

        self.slashval[ra] = merged;
        true
    }

    pub(crate) fn save(&self) -> ClassState {
        ClassState {
            parent: self.parent.clone(),
            rank: self.rank.clone(),
            slashval: self.slashval.clone(),
        }
    }

    pub(crate) fn restore(&mut self, state: &ClassState) {
        self.parent.clone_from(&state.parent);
        self.rank.clone_from(&state.rank);
        self.slashval.clone_from(&state.slashval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_and_shared_value() {
        let mut classes = CellClasses::new(4);
        assert!(classes.merge(0, 1));
        classes.set_value(0, CellValue::Slash);
        assert_eq!(classes.value(1), CellValue::Slash);
        assert_eq!(classes.value(2), CellValue::Unknown);
    }

    #[test]
    fn test_merge_keeps_known_value() {
        let mut classes = CellClasses::new(4);
        classes.set_value(2, CellValue::Backslash);
        assert!(classes.merge(1, 2));
        assert_eq!(classes.value(1), CellValue::Backslash);
    }

    #[test]
    fn test_merge_refuses_conflict() {
        let mut classes = CellClasses::new(4);
        classes.set_value(0, CellValue::Slash);
        classes.set_value(1, CellValue::Backslash);
        assert!(!classes.merge(0, 1));
        assert_ne!(classes.find(0), classes.find(1));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut classes = CellClasses::new(4);
        assert!(classes.merge(0, 3));
        assert!(!classes.merge(3, 0));
    }
}
