//! Execution plan

use rustc_hash::FxHashMap;

/// Detectors run together, in order, during one pass over the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisPass {
    detectors: Vec<String>,
}

impl AnalysisPass {
    pub fn new(detectors: Vec<String>) -> Self {
        Self { detectors }
    }

    pub fn detectors(&self) -> &[String] {
        &self.detectors
    }

    pub fn contains(&self, id: &str) -> bool {
        self.detectors.iter().any(|d| d == id)
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

/// Ordered passes; every registered detector appears in exactly one
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionPlan {
    passes: Vec<AnalysisPass>,
    pass_of: FxHashMap<String, usize>,
}

impl ExecutionPlan {
    pub(crate) fn new(passes: Vec<AnalysisPass>) -> Self {
        let pass_of = passes
            .iter()
            .enumerate()
            .flat_map(|(i, pass)| pass.detectors().iter().map(move |id| (id.clone(), i)))
            .collect();
        Self { passes, pass_of }
    }

    pub fn passes(&self) -> &[AnalysisPass] {
        &self.passes
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    /// Index of the pass running `id`
    pub fn pass_of(&self, id: &str) -> Option<usize> {
        self.pass_of.get(id).copied()
    }

    /// Every detector id, pass by pass
    pub fn execution_order(&self) -> Vec<&str> {
        self.passes
            .iter()
            .flat_map(|p| p.detectors().iter().map(String::as_str))
            .collect()
    }

    pub fn detector_count(&self) -> usize {
        self.pass_of.len()
    }

    /// `a` runs before `b` (earlier pass, or earlier within the same pass)
    pub fn runs_before(&self, a: &str, b: &str) -> bool {
        let order = self.execution_order();
        let pos = |id: &str| order.iter().position(|d| *d == id);
        matches!((pos(a), pos(b)), (Some(x), Some(y)) if x < y)
    }
}
