//! Unconditional-dereference facts

use crate::features::dataflow::domain::FactState;
use bitvec::prelude::{BitVec, Lsb0};

/// Parameters (excluding `this`) dereferenced on every path to the exit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnconditionalDerefSet {
    pub state: FactState,
    params: BitVec<usize, Lsb0>,
}

impl UnconditionalDerefSet {
    pub fn top() -> Self {
        Self::default()
    }

    /// Valid set with every parameter clear
    pub fn empty(param_count: usize) -> Self {
        Self {
            state: FactState::Valid,
            params: BitVec::repeat(false, param_count),
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
        self.params.clear();
    }

    pub fn set_bottom(&mut self) {
        self.state = FactState::Bottom;
        self.params.clear();
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn is_dereferenced(&self, param: usize) -> bool {
        self.params.get(param).map(|bit| *bit).unwrap_or(false)
    }

    /// Mark `param`; out-of-range indices are ignored
    pub fn set_dereferenced(&mut self, param: usize) {
        if param < self.params.len() {
            self.params.set(param, true);
        }
    }

    pub fn dereferenced_params(&self) -> impl Iterator<Item = usize> + '_ {
        self.params.iter_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.params.not_any()
    }

    /// Meet: intersection of valid sets, top identity, bottom absorbing
    pub fn meet_with(&mut self, other: &UnconditionalDerefSet) {
        match self.state.meet(other.state) {
            Some(FactState::Valid) if self.is_top() => self.clone_from(other),
            Some(FactState::Valid) => {}
            Some(FactState::Top) => self.set_top(),
            Some(FactState::Bottom) => self.set_bottom(),
            None => {
                let len = self.params.len().min(other.params.len());
                self.params.truncate(len);
                for i in 0..len {
                    if !other.params[i] {
                        self.params.set(i, false);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(params: &[usize]) -> UnconditionalDerefSet {
        let mut set = UnconditionalDerefSet::empty(3);
        for p in params {
            set.set_dereferenced(*p);
        }
        set
    }

    #[test]
    fn test_meet_is_intersection() {
        let mut a = with(&[0, 1]);
        a.meet_with(&with(&[1, 2]));
        assert_eq!(a.dereferenced_params().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_top_identity_bottom_absorbing() {
        let mut top = UnconditionalDerefSet::top();
        top.meet_with(&with(&[2]));
        assert_eq!(top, with(&[2]));

        let mut a = with(&[0]);
        a.meet_with(&UnconditionalDerefSet::top());
        assert_eq!(a, with(&[0]));

        let mut bottom = UnconditionalDerefSet::top();
        bottom.set_bottom();
        let mut b = with(&[0]);
        b.meet_with(&bottom);
        assert!(b.is_bottom());
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut set = UnconditionalDerefSet::empty(1);
        set.set_dereferenced(4);
        assert!(set.is_empty());
        assert!(!set.is_dereferenced(4));
    }
}
