//! Per-method result

use serde::{Deserialize, Serialize};

/// Parameters a method dereferences unconditionally
///
/// Callers passing a possibly-null argument at one of these positions will
/// hit a null dereference whenever the callee returns normally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerefSummary {
    pub method: String,
    /// Formal parameters excluding `this`
    pub param_count: usize,
    /// Ascending parameter indices
    pub dereferenced_params: Vec<usize>,
    /// Entry fact was dead code (every path throws or is malformed)
    pub unreachable: bool,
}

impl DerefSummary {
    pub fn is_dereferenced(&self, param: usize) -> bool {
        self.dereferenced_params.binary_search(&param).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.dereferenced_params.is_empty()
    }
}
