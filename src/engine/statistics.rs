// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Per-rule firing counters, sized by the rule enumeration and incremented
//! by the rule runner. Purely observational: solve results are derived
//! from the runner's own accounting, not from these counters.

use crate::rules::RuleKind;
use log::debug;
use strum::{EnumCount, IntoEnumIterator};

#[derive(Debug)]
pub struct Statistics {
    fired: [u64; RuleKind::COUNT],
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            fired: [0; RuleKind::COUNT],
        }
    }
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Note one firing of the given rule.
    pub(crate) fn record(&mut self, kind: RuleKind) {
        self.fired[kind as usize] += 1;
    }

    /// How often a rule fired during this solve.
    pub fn fired(&self, kind: RuleKind) -> u64 {
        self.fired[kind as usize]
    }

    /// Total rule firings across the whole table.
    pub fn total_fired(&self) -> u64 {
        self.fired.iter().sum()
    }

    /// Emit the non-zero counters at debug level.
    pub(crate) fn log_summary(&self) {
        for kind in RuleKind::iter() {
            let count = self.fired(kind);
            if count > 0 {
                let name: &'static str = kind.into();
                debug!("rule {} fired {} time(s)", name, count);
            }
        }
    }
}
