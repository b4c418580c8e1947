//! Per-method parallel runner
//!
//! Methods are independent: each task owns its CFG facts, value-number
//! factory and cache. With the `parallel` feature and `enable_rayon`, work
//! runs on a dedicated rayon pool sized from `ParallelConfig`; otherwise it
//! runs sequentially on the caller's thread.

use crate::config::ParallelConfig;
use crate::features::dataflow::infrastructure::DataflowError;
use crate::features::flow_graph::domain::ControlFlowGraph;
use crate::features::unconditional_deref::application::UnconditionalDerefUseCase;
use crate::features::unconditional_deref::domain::DerefSummary;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct MethodAnalysisRunner {
    config: ParallelConfig,
}

impl MethodAnalysisRunner {
    pub fn new(config: ParallelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Apply `f` to every item; results keep input order
    pub fn run<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.config.enable_rayon && items.len() > 1 {
            if let Some(results) = self.run_parallel(items, &f) {
                return results;
            }
        }
        items.iter().map(&f).collect()
    }

    #[cfg(feature = "parallel")]
    fn run_parallel<T, R, F>(&self, items: &[T], f: &F) -> Option<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.effective_workers())
            .stack_size(self.config.stack_size_mb * 1024 * 1024)
            .thread_name(|i| format!("bytecode-worker-{}", i))
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!(error = %e, "thread pool unavailable, running sequentially");
                return None;
            }
        };

        let min_len = self.config.batch_size.max(1);
        Some(pool.install(|| items.par_iter().with_min_len(min_len).map(f).collect()))
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel<T, R, F>(&self, _items: &[T], _f: &F) -> Option<Vec<R>>
    where
        F: Fn(&T) -> R,
    {
        None
    }

    /// Unconditionally dereferenced parameters of every method
    pub fn analyze_derefs<U>(
        &self,
        cfgs: &[ControlFlowGraph],
        use_case: &U,
    ) -> Vec<Result<DerefSummary, DataflowError>>
    where
        U: UnconditionalDerefUseCase + ?Sized,
    {
        let results = self.run(cfgs, |cfg| use_case.analyze_method(cfg));
        let failed = results.iter().filter(|r| r.is_err()).count();
        tracing::debug!(methods = cfgs.len(), failed, "method analyses finished");
        results
    }
}
