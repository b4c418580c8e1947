//! Value numbers

use std::fmt;

/// Symbolic identity of a runtime value: two program points holding the
/// same number are guaranteed to hold the same value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueNumber(pub u32);

impl ValueNumber {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ValueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Per-method allocator of fresh value numbers
#[derive(Debug, Default)]
pub struct ValueNumberFactory {
    next: u32,
}

impl ValueNumberFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self) -> ValueNumber {
        let vn = ValueNumber(self.next);
        self.next += 1;
        vn
    }

    /// Numbers minted so far
    pub fn count(&self) -> usize {
        self.next as usize
    }
}
