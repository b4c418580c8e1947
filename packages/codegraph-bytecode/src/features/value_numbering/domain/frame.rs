//! Value-number frames
//!
//! A frame mirrors the JVM frame (locals + operand stack) with value numbers
//! in place of values, plus the field loads currently available for reuse.

use super::value_number::ValueNumber;
use crate::features::dataflow::domain::FactState;
use crate::features::flow_graph::domain::FieldRef;
use rustc_hash::FxHashMap;

/// Key of an available field load: `(Some(reference), field)` for instance
/// fields, `(None, field)` for statics
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvailableLoad {
    pub reference: Option<ValueNumber>,
    pub field: FieldRef,
}

impl AvailableLoad {
    pub fn instance(reference: ValueNumber, field: FieldRef) -> Self {
        Self {
            reference: Some(reference),
            field,
        }
    }

    pub fn static_field(field: FieldRef) -> Self {
        Self {
            reference: None,
            field,
        }
    }
}

/// Forward value-numbering fact
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueNumberFrame {
    pub state: FactState,
    pub locals: Vec<ValueNumber>,
    pub stack: Vec<ValueNumber>,
    pub available_loads: FxHashMap<AvailableLoad, ValueNumber>,
}

impl ValueNumberFrame {
    pub fn top() -> Self {
        Self::default()
    }

    /// Valid frame with the given locals and an empty stack
    pub fn with_locals(locals: Vec<ValueNumber>) -> Self {
        Self {
            state: FactState::Valid,
            locals,
            stack: Vec::new(),
            available_loads: FxHashMap::default(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.state == FactState::Valid
    }

    pub fn is_top(&self) -> bool {
        self.state == FactState::Top
    }

    pub fn is_bottom(&self) -> bool {
        self.state == FactState::Bottom
    }

    pub fn set_top(&mut self) {
        self.state = FactState::Top;
        self.clear_slots();
    }

    pub fn set_bottom(&mut self) {
        self.state = FactState::Bottom;
        self.clear_slots();
    }

    fn clear_slots(&mut self) {
        self.locals.clear();
        self.stack.clear();
        self.available_loads.clear();
    }

    pub fn local(&self, slot: usize) -> Option<ValueNumber> {
        self.locals.get(slot).copied()
    }

    /// Stack value at `depth` (0 = top of stack)
    pub fn stack_value(&self, depth: usize) -> Option<ValueNumber> {
        self.stack
            .len()
            .checked_sub(depth + 1)
            .map(|i| self.stack[i])
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of locals + stack slots
    pub fn slot_count(&self) -> usize {
        self.locals.len() + self.stack.len()
    }

    /// Value of slot `i` where locals come first, then the stack bottom-up
    pub fn slot(&self, i: usize) -> Option<ValueNumber> {
        if i < self.locals.len() {
            Some(self.locals[i])
        } else {
            self.stack.get(i - self.locals.len()).copied()
        }
    }

    pub fn set_slot(&mut self, i: usize, value: ValueNumber) {
        if i < self.locals.len() {
            self.locals[i] = value;
        } else if let Some(s) = self.stack.get_mut(i - self.locals.len()) {
            *s = value;
        }
    }

    /// Pop `count` operands, returned bottom-first; `None` on underflow
    pub fn pop_operands(&mut self, count: usize) -> Option<Vec<ValueNumber>> {
        let split = self.stack.len().checked_sub(count)?;
        Some(self.stack.split_off(split))
    }

    pub fn push(&mut self, value: ValueNumber) {
        self.stack.push(value);
    }

    pub fn available_load(&self, load: &AvailableLoad) -> Option<ValueNumber> {
        self.available_loads.get(load).copied()
    }

    pub fn make_available(&mut self, load: AvailableLoad, value: ValueNumber) {
        self.available_loads.insert(load, value);
    }

    /// Forget every available load of `field`, whatever the reference
    pub fn kill_loads_of(&mut self, field: &FieldRef) {
        self.available_loads.retain(|load, _| &load.field != field);
    }

    pub fn kill_all_loads(&mut self) {
        self.available_loads.clear();
    }

    /// Keep only loads available with the same value in `other`
    pub fn intersect_loads(&mut self, other: &ValueNumberFrame) {
        self.available_loads
            .retain(|load, value| other.available_loads.get(load) == Some(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> FieldRef {
        FieldRef::instance("com.acme.Node", name, true)
    }

    #[test]
    fn test_stack_access() {
        let mut frame = ValueNumberFrame::with_locals(vec![ValueNumber(0)]);
        frame.push(ValueNumber(1));
        frame.push(ValueNumber(2));

        assert_eq!(frame.stack_value(0), Some(ValueNumber(2)));
        assert_eq!(frame.stack_value(1), Some(ValueNumber(1)));
        assert_eq!(frame.stack_value(2), None);
        assert_eq!(frame.slot(2), Some(ValueNumber(2)));

        assert_eq!(
            frame.pop_operands(2),
            Some(vec![ValueNumber(1), ValueNumber(2)])
        );
        assert_eq!(frame.pop_operands(1), None);
    }

    #[test]
    fn test_kill_and_intersect_loads() {
        let mut a = ValueNumberFrame::with_locals(vec![]);
        a.make_available(AvailableLoad::instance(ValueNumber(0), field("next")), ValueNumber(5));
        a.make_available(AvailableLoad::instance(ValueNumber(1), field("next")), ValueNumber(6));
        a.make_available(AvailableLoad::instance(ValueNumber(0), field("prev")), ValueNumber(7));

        let mut b = a.clone();
        b.make_available(AvailableLoad::instance(ValueNumber(0), field("prev")), ValueNumber(8));
        a.intersect_loads(&b);
        assert_eq!(a.available_loads.len(), 2);

        a.kill_loads_of(&field("next"));
        assert!(a.available_loads.is_empty());
    }
}
