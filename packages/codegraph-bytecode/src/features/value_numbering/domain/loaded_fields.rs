//! Field-load census
//!
//! Redundant-load elimination only pays off for fields loaded more than once.

use crate::features::flow_graph::domain::{ControlFlowGraph, FieldRef};
use rustc_hash::FxHashMap;

/// Number of load sites per field in one method
#[derive(Debug, Clone, Default)]
pub struct LoadedFieldSet {
    load_counts: FxHashMap<FieldRef, usize>,
}

impl LoadedFieldSet {
    pub fn from_cfg(cfg: &ControlFlowGraph) -> Self {
        let mut load_counts: FxHashMap<FieldRef, usize> = FxHashMap::default();
        for (_, instruction) in cfg.locations() {
            if let Some(field) = instruction.loaded_field() {
                *load_counts.entry(field.clone()).or_default() += 1;
            }
        }
        Self { load_counts }
    }

    pub fn load_count(&self, field: &FieldRef) -> usize {
        self.load_counts.get(field).copied().unwrap_or(0)
    }

    /// Reference-typed and loaded at more than one site
    pub fn is_profitable(&self, field: &FieldRef) -> bool {
        field.is_reference && self.load_count(field) > 1
    }

    pub fn len(&self) -> usize {
        self.load_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.load_counts.is_empty()
    }
}
