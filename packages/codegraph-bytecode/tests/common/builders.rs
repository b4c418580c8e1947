//! Test data builders

use codegraph_bytecode::features::flow_graph::{
    BlockId, CfgBuilder, ControlFlowGraph, FieldRef, Instruction, Location, MethodInfo,
};
use codegraph_bytecode::features::scheduler::{DetectorDeclaration, DetectorRegistry};

/// A registry declaring `detectors` in order
pub fn registry(plugin: &str, detectors: &[&str]) -> DetectorRegistry {
    detectors.iter().fold(DetectorRegistry::new(plugin), |r, id| {
        r.detector(DetectorDeclaration::new(*id))
    })
}

/// Reference field used by the dereference fixtures
pub fn field(name: &str) -> FieldRef {
    FieldRef::instance("app.Node", name, true)
}

/// Builder for methods that load one parameter and dereference it behind a
/// null check:
///
/// ```text
/// entry → load(p) → check → deref(p.f) → exit
///             └──(bypass)──→ skip ──────→ exit
/// ```
#[derive(Debug, Clone)]
pub struct GuardedDerefMethod {
    name: String,
    is_static: bool,
    param_count: usize,
    param: usize,
    bypass: bool,
    taken_exception: bool,
}

impl GuardedDerefMethod {
    pub fn new(param_count: usize, param: usize) -> Self {
        Self {
            name: "m".to_string(),
            is_static: true,
            param_count,
            param,
            bypass: false,
            taken_exception: false,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn instance(mut self) -> Self {
        self.is_static = false;
        self
    }

    /// Add a path to the exit that skips the dereference
    pub fn with_bypass(mut self) -> Self {
        self.bypass = true;
        self
    }

    /// Mark the null check's exception edge as known taken
    pub fn with_taken_exception(mut self) -> Self {
        self.taken_exception = true;
        self
    }

    /// Location of the dereference
    pub fn thrower() -> Location {
        // B0 entry, B1 exit, B2 load, B3 check, B4 deref
        Location::new(BlockId(4), 0)
    }

    pub fn build(self) -> ControlFlowGraph {
        let method = MethodInfo::new(self.name, self.is_static, self.param_count);
        let slot = method.param_slot(self.param) as u16;
        let mut b = CfgBuilder::new(method);

        let load = b.block(vec![Instruction::LoadLocal(slot), Instruction::Branch { pops: 0 }]);
        let check = b.null_check(Self::thrower());
        let deref = b.block(vec![
            Instruction::GetField(field("next")),
            Instruction::Return { has_value: true },
        ]);
        let skip = b.block(vec![Instruction::Return { has_value: true }]);

        let entry = b.entry();
        let exit = b.exit();
        b.fall_through(entry, load)
            .fall_through(load, check)
            .fall_through(check, deref)
            .return_edge(deref)
            .return_edge(skip);
        if self.taken_exception {
            b.taken_exception(check, exit);
        } else {
            b.implicit_exception(check, exit);
        }
        if self.bypass {
            b.branch(load, skip);
        }
        b.build().unwrap()
    }
}
