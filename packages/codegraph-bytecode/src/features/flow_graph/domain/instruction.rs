//! Stack-machine instruction model
//!
//! Just enough bytecode shape for the analyses: operand-stack effects, field
//! and method references, and which operand an instruction dereferences.
//! Arithmetic and other value-agnostic opcodes collapse into `Other`.

use crate::features::class_hierarchy::domain::ClassId;
use std::fmt;
use std::sync::Arc;

/// Field reference (`owner.name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldRef {
    pub owner: ClassId,
    pub name: Arc<str>,
    pub is_static: bool,
    /// Field holds a reference (object or array), not a primitive
    pub is_reference: bool,
}

impl FieldRef {
    pub fn instance(owner: impl Into<ClassId>, name: &str, is_reference: bool) -> Self {
        Self {
            owner: owner.into(),
            name: Arc::from(name),
            is_static: false,
            is_reference,
        }
    }

    pub fn static_field(owner: impl Into<ClassId>, name: &str, is_reference: bool) -> Self {
        Self {
            owner: owner.into(),
            name: Arc::from(name),
            is_static: true,
            is_reference,
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}

/// Called method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    pub owner: ClassId,
    pub name: Arc<str>,
    /// Arguments excluding the receiver
    pub arg_count: usize,
    /// Instance call (pops a receiver below the arguments)
    pub has_receiver: bool,
    pub returns_value: bool,
}

impl MethodRef {
    pub fn virtual_call(
        owner: impl Into<ClassId>,
        name: &str,
        arg_count: usize,
        returns_value: bool,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: Arc::from(name),
            arg_count,
            has_receiver: true,
            returns_value,
        }
    }

    pub fn static_call(
        owner: impl Into<ClassId>,
        name: &str,
        arg_count: usize,
        returns_value: bool,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: Arc::from(name),
            arg_count,
            has_receiver: false,
            returns_value,
        }
    }
}

/// Constant operand
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    Null,
    Int(i64),
    Str(Arc<str>),
}

/// One bytecode instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Push local slot
    LoadLocal(u16),
    /// Pop into local slot
    StoreLocal(u16),
    Const(Constant),
    /// `ref → value`
    GetField(FieldRef),
    /// `ref, value →`
    PutField(FieldRef),
    /// `→ value`
    GetStatic(FieldRef),
    /// `value →`
    PutStatic(FieldRef),
    /// `[receiver], args… → [result]`
    Invoke(MethodRef),
    /// `→ ref`
    New(ClassId),
    /// `array → length`
    ArrayLength,
    Dup,
    Pop,
    /// Conditional jump popping `pops` operands
    Branch { pops: u8 },
    Return { has_value: bool },
    /// `exception →`
    Throw,
    Nop,
    /// Any value-agnostic opcode (arithmetic, casts, compares)
    Other { pops: u8, pushes: u8 },
}

impl Instruction {
    /// Operands consumed from the stack
    pub fn stack_pops(&self) -> usize {
        match self {
            Self::LoadLocal(_) | Self::Const(_) | Self::GetStatic(_) | Self::New(_) | Self::Nop => 0,
            Self::StoreLocal(_) | Self::GetField(_) | Self::PutStatic(_) | Self::ArrayLength => 1,
            Self::Pop | Self::Throw => 1,
            Self::Dup => 1,
            Self::PutField(_) => 2,
            Self::Invoke(m) => m.arg_count + usize::from(m.has_receiver),
            Self::Branch { pops } => *pops as usize,
            Self::Return { has_value } => usize::from(*has_value),
            Self::Other { pops, .. } => *pops as usize,
        }
    }

    /// Operands produced onto the stack
    pub fn stack_pushes(&self) -> usize {
        match self {
            Self::LoadLocal(_)
            | Self::Const(_)
            | Self::GetField(_)
            | Self::GetStatic(_)
            | Self::New(_)
            | Self::ArrayLength => 1,
            Self::Dup => 2,
            Self::Invoke(m) => usize::from(m.returns_value),
            Self::Other { pushes, .. } => *pushes as usize,
            _ => 0,
        }
    }

    /// Stack depth (0 = top, before execution) of the reference this
    /// instruction dereferences, if any
    pub fn dereferenced_operand(&self) -> Option<usize> {
        match self {
            Self::GetField(f) if !f.is_static => Some(0),
            Self::PutField(f) if !f.is_static => Some(1),
            Self::ArrayLength | Self::Throw => Some(0),
            Self::Invoke(m) if m.has_receiver => Some(m.arg_count),
            _ => None,
        }
    }

    /// Field read by this instruction
    pub fn loaded_field(&self) -> Option<&FieldRef> {
        match self {
            Self::GetField(f) | Self::GetStatic(f) => Some(f),
            _ => None,
        }
    }

    /// Ends the method (return or throw)
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Return { .. } | Self::Throw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_effects() {
        let put = Instruction::PutField(FieldRef::instance("a.A", "f", true));
        assert_eq!((put.stack_pops(), put.stack_pushes()), (2, 0));

        let call = Instruction::Invoke(MethodRef::virtual_call("a.A", "m", 2, true));
        assert_eq!((call.stack_pops(), call.stack_pushes()), (3, 1));

        let dup = Instruction::Dup;
        assert_eq!((dup.stack_pops(), dup.stack_pushes()), (1, 2));
    }

    #[test]
    fn test_dereferenced_operand() {
        let get = Instruction::GetField(FieldRef::instance("a.A", "f", true));
        assert_eq!(get.dereferenced_operand(), Some(0));

        let put = Instruction::PutField(FieldRef::instance("a.A", "f", true));
        assert_eq!(put.dereferenced_operand(), Some(1));

        let call = Instruction::Invoke(MethodRef::virtual_call("a.A", "m", 2, false));
        assert_eq!(call.dereferenced_operand(), Some(2));

        let static_call = Instruction::Invoke(MethodRef::static_call("a.A", "m", 2, false));
        assert_eq!(static_call.dereferenced_operand(), None);

        let get_static = Instruction::GetStatic(FieldRef::static_field("a.A", "s", true));
        assert_eq!(get_static.dereferenced_operand(), None);
    }
}
