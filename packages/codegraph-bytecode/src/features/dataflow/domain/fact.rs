//! Fact meta-states

/// Lattice position shared by every fact type
///
/// - `Top`: no information yet (identity of meet); also marks code not reached
/// - `Bottom`: contradiction / dead code (absorbing under meet)
/// - `Valid`: an ordinary fact carrying analysis data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FactState {
    #[default]
    Top,
    Bottom,
    Valid,
}

impl FactState {
    /// Meet of meta-states; `None` when both are valid and the payloads must be merged
    pub fn meet(self, other: FactState) -> Option<FactState> {
        match (self, other) {
            (Self::Bottom, _) | (_, Self::Bottom) => Some(Self::Bottom),
            (Self::Top, s) | (s, Self::Top) => Some(s),
            (Self::Valid, Self::Valid) => None,
        }
    }
}
