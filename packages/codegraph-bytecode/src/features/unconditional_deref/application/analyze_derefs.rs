//! Unconditional Dereference UseCase
//!
//! Runs value numbering, resolves guarded dereference sites to parameters,
//! then solves the backward analysis and reports the entry fact.

use crate::config::{DataflowConfig, ValidatedConfig, ValueNumberConfig};
use crate::features::dataflow::infrastructure::{Dataflow, DataflowError};
use crate::features::flow_graph::domain::ControlFlowGraph;
use crate::features::unconditional_deref::domain::DerefSummary;
use crate::features::unconditional_deref::infrastructure::{
    ThrowerMap, UnconditionalDerefAnalysis,
};
use crate::features::value_numbering::infrastructure::run_value_numbering;

/// Unconditional Dereference UseCase Trait
pub trait UnconditionalDerefUseCase: Send + Sync {
    fn analyze_method(&self, cfg: &ControlFlowGraph) -> Result<DerefSummary, DataflowError>;
}

/// Unconditional Dereference UseCase Implementation
#[derive(Debug, Clone, Default)]
pub struct UnconditionalDerefUseCaseImpl {
    dataflow: DataflowConfig,
    value_numbering: ValueNumberConfig,
}

impl UnconditionalDerefUseCaseImpl {
    pub fn new(dataflow: DataflowConfig, value_numbering: ValueNumberConfig) -> Self {
        Self {
            dataflow,
            value_numbering,
        }
    }

    pub fn from_config(config: &ValidatedConfig) -> Self {
        Self::new(config.dataflow(), config.value_numbering())
    }
}

impl UnconditionalDerefUseCase for UnconditionalDerefUseCaseImpl {
    fn analyze_method(&self, cfg: &ControlFlowGraph) -> Result<DerefSummary, DataflowError> {
        let mut value_numbers =
            run_value_numbering(cfg, self.dataflow.clone(), self.value_numbering.clone())?;
        let throwers = ThrowerMap::resolve(cfg, &mut value_numbers)?;

        let method = cfg.method();
        let analysis = UnconditionalDerefAnalysis::new(method.param_count, throwers);
        let dataflow = Dataflow::run(cfg, analysis, self.dataflow.clone())?;
        let entry = dataflow.entry_fact();

        let summary = DerefSummary {
            method: method.name.clone(),
            param_count: method.param_count,
            dereferenced_params: entry.dereferenced_params().collect(),
            unreachable: !entry.is_valid(),
        };
        tracing::debug!(
            method = %summary.method,
            params = ?summary.dereferenced_params,
            "unconditional dereferences"
        );
        Ok(summary)
    }
}
