//! Analysis direction

/// Direction information flows through the CFG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Entry to exit; facts meet over predecessors
    Forward,
    /// Exit to entry; facts meet over successors
    Backward,
}

impl Direction {
    pub fn is_forward(self) -> bool {
        self == Self::Forward
    }
}
