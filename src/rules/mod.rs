// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The production-rule library.
//!
//! Each rule is a pure `fn(&mut Board) -> bool` returning whether it made
//! progress. A rule must never leave the board in an invalid state:
//! placements that would close a loop or overshoot a clue are silently
//! skipped inside the rule. The engine applies rules in [`RULES`] order,
//! cheapest first, restarting from the top on any progress, since earlier
//! rules often enable later ones.
//!
//! # Organization
//!
//! - [`clues`]: deductions local to one or two clued vertices
//! - [`connectivity`]: loop and dead-end avoidance via the vertex groups
//! - [`equivalence`]: establishing and filling cell equivalence classes
//! - [`vbitmap`]: the v-shape mask fixpoint
//! - [`unified`]: a single fixpoint fusing the above, in the manner of
//!   Simon Tatham's solver
//!
//! Scores and tiers are reported in the solve result for external
//! telemetry and also gate rules by the caller's maximum tier.

pub mod clues;
pub mod connectivity;
pub mod equivalence;
pub mod unified;
pub mod vbitmap;

use crate::board::Board;
use crate::grid::{Cell, CellValue, Vertex, VertexNeighbour};
use strum::EnumCount;
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

/// Tier reserved for the branching search; no production rule uses it.
pub const BRANCH_TIER: u8 = 3;

/// Identity of each production rule, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumCountMacro, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum RuleKind {
    ClueFinishB,
    ClueFinishA,
    NoLoops,
    EdgeClueConstraints,
    BorderTwoVShape,
    #[strum(serialize = "loop_avoidance_2")]
    LoopAvoidance2,
    VPatternWithThree,
    AdjacentOnes,
    AdjacentThrees,
    DeadEndAvoidance,
    EquivalenceClasses,
    VbitmapPropagation,
    SimonUnified,
}

/// One entry of the rule table.
pub struct Rule {
    pub kind: RuleKind,
    /// Contribution to the work score each time the rule fires.
    pub score: u32,
    /// Difficulty tier; rules above the caller's maximum are skipped.
    pub tier: u8,
    pub apply: fn(&mut Board) -> bool,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        self.kind.into()
    }
}

/// The full rule table, in application order.
pub static RULES: [Rule; RuleKind::COUNT] = [
    Rule {
        kind: RuleKind::ClueFinishB,
        score: 1,
        tier: 1,
        apply: clues::clue_finish_b,
    },
    Rule {
        kind: RuleKind::ClueFinishA,
        score: 2,
        tier: 1,
        apply: clues::clue_finish_a,
    },
    Rule {
        kind: RuleKind::NoLoops,
        score: 2,
        tier: 1,
        apply: connectivity::no_loops,
    },
    Rule {
        kind: RuleKind::EdgeClueConstraints,
        score: 2,
        tier: 2,
        apply: clues::edge_clue_constraints,
    },
    Rule {
        kind: RuleKind::BorderTwoVShape,
        score: 3,
        tier: 2,
        apply: clues::border_two_v_shape,
    },
    Rule {
        kind: RuleKind::LoopAvoidance2,
        score: 5,
        tier: 1,
        apply: connectivity::loop_avoidance_2,
    },
    Rule {
        kind: RuleKind::VPatternWithThree,
        score: 6,
        tier: 2,
        apply: clues::v_pattern_with_three,
    },
    Rule {
        kind: RuleKind::AdjacentOnes,
        score: 8,
        tier: 2,
        apply: clues::adjacent_ones,
    },
    Rule {
        kind: RuleKind::AdjacentThrees,
        score: 8,
        tier: 2,
        apply: clues::adjacent_threes,
    },
    Rule {
        kind: RuleKind::DeadEndAvoidance,
        score: 9,
        tier: 2,
        apply: connectivity::dead_end_avoidance,
    },
    Rule {
        kind: RuleKind::EquivalenceClasses,
        score: 9,
        tier: 2,
        apply: equivalence::equivalence_classes,
    },
    Rule {
        kind: RuleKind::VbitmapPropagation,
        score: 9,
        tier: 2,
        apply: vbitmap::vbitmap_propagation,
    },
    Rule {
        kind: RuleKind::SimonUnified,
        score: 9,
        tier: 2,
        apply: unified::simon_unified,
    },
];

/// Look up a rule by kind.
pub fn rule(kind: RuleKind) -> &'static Rule {
    // Table order matches declaration order.
    &RULES[kind as usize]
}

/// The rules enabled at `max_tier`, in application order. A maximum of 10
/// or more means no filtering.
pub fn rules_up_to_tier(max_tier: u8) -> Vec<&'static Rule> {
    RULES.iter().filter(|r| r.tier <= max_tier).collect()
}

/// Tally of the cells around one clued vertex.
pub(crate) struct VertexTally {
    pub current: usize,
    pub unknowns: Vec<VertexNeighbour>,
}

pub(crate) fn tally(board: &Board, vertex: Vertex) -> VertexTally {
    let mut current = 0;
    let mut unknowns = Vec::new();
    for n in board.vertex_neighbours(vertex) {
        let value = board.value(n.cell);
        if value.is_unknown() {
            unknowns.push(n);
        } else if value == n.touching {
            current += 1;
        }
    }
    VertexTally { current, unknowns }
}

/// Place `value` unless it would close a loop; `true` iff placed.
pub(crate) fn place_if_safe(board: &mut Board, cell: Cell, value: CellValue) -> bool {
    if board.would_form_loop(cell, value) {
        return false;
    }
    board.place_value(cell, value)
}
