//! Dataflow benchmarks
//!
//! Generated "ladder" methods: each rung loads a parameter, null-checks it,
//! loads the same field twice and calls out on one side of a diamond.
//! - value numbering: forward solve with redundant-load elimination
//! - unconditional dereference: value numbering + backward solve
//! - per-method runner: sequential vs rayon

use codegraph_bytecode::config::{DataflowConfig, ParallelConfig, ValueNumberConfig};
use codegraph_bytecode::features::flow_graph::{
    BlockId, CfgBuilder, ControlFlowGraph, FieldRef, Instruction, Location, MethodInfo, MethodRef,
};
use codegraph_bytecode::features::unconditional_deref::{
    UnconditionalDerefUseCase, UnconditionalDerefUseCaseImpl,
};
use codegraph_bytecode::features::value_numbering::run_value_numbering;
use codegraph_bytecode::MethodAnalysisRunner;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const PARAMS: usize = 4;

fn ladder(rungs: usize) -> ControlFlowGraph {
    let next = FieldRef::instance("bench.Node", "next", true);
    let mut b = CfgBuilder::new(MethodInfo::new(format!("ladder{rungs}"), true, PARAMS));
    let exit = b.exit();
    let mut prev = b.entry();

    for rung in 0..rungs {
        let slot = (rung % PARAMS) as u16;
        let load = b.block(vec![Instruction::LoadLocal(slot)]);
        let check_id = b.next_id();
        let check = b.null_check(Location::new(BlockId(check_id.0 + 1), 0));
        let deref = b.block(vec![
            Instruction::GetField(next.clone()),
            Instruction::Pop,
            Instruction::LoadLocal(slot),
            Instruction::GetField(next.clone()),
            Instruction::Branch { pops: 1 },
        ]);
        let call = b.block(vec![Instruction::Invoke(MethodRef::static_call(
            "bench.Util",
            "touch",
            0,
            false,
        ))]);
        let join = b.block(vec![Instruction::Nop]);

        b.fall_through(prev, load)
            .fall_through(load, check)
            .fall_through(check, deref)
            .implicit_exception(check, exit)
            .fall_through(deref, call)
            .branch(deref, join)
            .fall_through(call, join);
        prev = join;
    }

    let ret = b.block(vec![Instruction::Return { has_value: false }]);
    b.fall_through(prev, ret).return_edge(ret);
    b.build().expect("ladder is well formed")
}

// ============================================================================
// Single method
// ============================================================================

fn bench_value_numbering(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_numbering");

    for rungs in [8, 64, 256] {
        let cfg = ladder(rungs);
        group.throughput(Throughput::Elements(cfg.instruction_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rungs), &cfg, |b, cfg| {
            b.iter(|| {
                let vn = run_value_numbering(
                    cfg,
                    DataflowConfig::default(),
                    ValueNumberConfig::default(),
                )
                .unwrap();
                black_box(vn.analysis().value_count())
            });
        });
    }

    group.finish();
}

fn bench_unconditional_deref(c: &mut Criterion) {
    let mut group = c.benchmark_group("unconditional_deref");
    let use_case = UnconditionalDerefUseCaseImpl::default();

    for rungs in [8, 64, 256] {
        let cfg = ladder(rungs);
        group.throughput(Throughput::Elements(cfg.block_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rungs), &cfg, |b, cfg| {
            b.iter(|| black_box(use_case.analyze_method(cfg).unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Many methods
// ============================================================================

fn bench_method_runner(c: &mut Criterion) {
    let mut group = c.benchmark_group("method_runner");
    let cfgs: Vec<ControlFlowGraph> = (0..256).map(|i| ladder(4 + i % 32)).collect();
    let use_case = UnconditionalDerefUseCaseImpl::default();
    group.throughput(Throughput::Elements(cfgs.len() as u64));

    for (name, enable) in [("sequential", false), ("rayon", true)] {
        let runner = MethodAnalysisRunner::new(ParallelConfig::default().enable_rayon(enable));
        group.bench_function(name, |b| {
            b.iter(|| black_box(runner.analyze_derefs(&cfgs, &use_case)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_value_numbering,
    bench_unconditional_deref,
    bench_method_runner
);
criterion_main!(benches);
