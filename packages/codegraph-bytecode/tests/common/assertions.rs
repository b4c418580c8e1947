//! Custom assertions for hierarchy and scheduling tests

use codegraph_bytecode::features::class_hierarchy::{
    ClassLookupFailure, SubtypeOracle, TypeDescriptor,
};
use codegraph_bytecode::features::scheduler::ExecutionPlan;

fn ty(name: &str) -> TypeDescriptor {
    TypeDescriptor::parse(name).unwrap_or_else(|| panic!("bad type descriptor '{name}'"))
}

/// Assert `sub <: sup`
pub fn assert_subtype(oracle: &SubtypeOracle, sub: &str, sup: &str) {
    assert_eq!(
        oracle.is_subtype(&ty(sub), &ty(sup)),
        Ok(true),
        "expected {sub} <: {sup}"
    );
}

/// Assert a definite `false`
pub fn assert_not_subtype(oracle: &SubtypeOracle, sub: &str, sup: &str) {
    assert_eq!(
        oracle.is_subtype(&ty(sub), &ty(sup)),
        Ok(false),
        "expected {sub} not <: {sup}"
    );
}

/// Assert the query cannot be answered soundly
pub fn assert_lookup_failure(oracle: &SubtypeOracle, sub: &str, sup: &str) -> ClassLookupFailure {
    match oracle.is_subtype(&ty(sub), &ty(sup)) {
        Err(failure) => failure,
        Ok(answer) => panic!("expected ClassLookupFailure for {sub} <: {sup}, got {answer}"),
    }
}

/// Assert `a` is scheduled strictly before `b`
pub fn assert_runs_before(plan: &ExecutionPlan, a: &str, b: &str) {
    assert!(
        plan.runs_before(a, b),
        "expected {a} before {b}, order: {:?}",
        plan.execution_order()
    );
}
