//! Basic blocks and method metadata

use super::instruction::Instruction;
use super::location::{BlockId, Location};

/// Block role in the CFG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Logical method entry (no instructions)
    Entry,
    /// Logical method exit (no instructions); every return / throw edge ends here
    Exit,
    Normal,
    /// Implicit null check of the reference dereferenced at `thrower`.
    /// Its fall-through successor holds the dereference; its exception
    /// successor models the NullPointerException.
    NullCheck { thrower: Location },
}

/// Straight-line instruction sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicBlock {
    pub id: BlockId,
    pub kind: BlockKind,
    pub instructions: Vec<Instruction>,
}

impl BasicBlock {
    pub fn new(id: BlockId, kind: BlockKind, instructions: Vec<Instruction>) -> Self {
        Self {
            id,
            kind,
            instructions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Location the null check guards, if this is a null-check block
    pub fn null_check_thrower(&self) -> Option<Location> {
        match self.kind {
            BlockKind::NullCheck { thrower } => Some(thrower),
            _ => None,
        }
    }

    /// Instructions paired with their locations
    pub fn located(
        &self,
    ) -> impl DoubleEndedIterator<Item = (Location, &Instruction)> + ExactSizeIterator + '_ {
        self.instructions
            .iter()
            .enumerate()
            .map(move |(i, instr)| (Location::new(self.id, i), instr))
    }
}

/// Shape of the analysed method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub is_static: bool,
    /// Formal parameters excluding `this`
    pub param_count: usize,
    /// Local variable slots (at least `param_count + !is_static`)
    pub max_locals: usize,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>, is_static: bool, param_count: usize) -> Self {
        let receiver = usize::from(!is_static);
        Self {
            name: name.into(),
            is_static,
            param_count,
            max_locals: param_count + receiver,
        }
    }

    /// Builder: Set max_locals (never below the parameter slots)
    pub fn with_max_locals(mut self, max_locals: usize) -> Self {
        self.max_locals = max_locals.max(self.first_param_slot() + self.param_count);
        self
    }

    /// Slot of the first formal parameter (1 for instance methods)
    pub fn first_param_slot(&self) -> usize {
        usize::from(!self.is_static)
    }

    /// Local slot of formal parameter `param`
    pub fn param_slot(&self, param: usize) -> usize {
        self.first_param_slot() + param
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_slots() {
        let instance = MethodInfo::new("f", false, 2);
        assert_eq!(instance.max_locals, 3);
        assert_eq!(instance.param_slot(0), 1);

        let stat = MethodInfo::new("g", true, 2).with_max_locals(1);
        assert_eq!(stat.max_locals, 2);
        assert_eq!(stat.param_slot(1), 1);
    }

    #[test]
    fn test_null_check_thrower() {
        let thrower = Location::new(BlockId(2), 0);
        let block = BasicBlock::new(BlockId(1), BlockKind::NullCheck { thrower }, vec![]);
        assert_eq!(block.null_check_thrower(), Some(thrower));
        assert!(block.is_empty());
    }
}
