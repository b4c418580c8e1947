//! Analysis session
//!
//! Owns everything with session lifetime: the configuration, the subtype
//! oracle (inheritance graph + query caches) and the missing-class channel.
//! `reset` starts a new session with an empty graph; nothing is global.

use super::method_runner::MethodAnalysisRunner;
use crate::config::ValidatedConfig;
use crate::errors::Result;
use crate::features::class_hierarchy::domain::ClassId;
use crate::features::class_hierarchy::infrastructure::{
    ClassLookupFailure, SubtypeOracle, TracingMissingClassReporter,
};
use crate::features::class_hierarchy::ports::{ClassMetadataProvider, MissingClassReporter};
use crate::features::dataflow::infrastructure::DataflowError;
use crate::features::flow_graph::domain::ControlFlowGraph;
use crate::features::scheduler::domain::{DetectorRegistry, ExecutionPlan};
use crate::features::scheduler::infrastructure::ExecutionPlanBuilder;
use crate::features::unconditional_deref::application::UnconditionalDerefUseCaseImpl;
use crate::features::unconditional_deref::domain::DerefSummary;
use std::sync::Arc;
use uuid::Uuid;

pub struct AnalysisSession {
    id: Uuid,
    config: ValidatedConfig,
    provider: Arc<dyn ClassMetadataProvider>,
    reporter: Arc<dyn MissingClassReporter>,
    oracle: SubtypeOracle,
}

impl AnalysisSession {
    pub fn new(
        config: ValidatedConfig,
        provider: Arc<dyn ClassMetadataProvider>,
        reporter: Arc<dyn MissingClassReporter>,
    ) -> Self {
        let id = Uuid::new_v4();
        let oracle = SubtypeOracle::new(provider.clone(), reporter.clone(), config.hierarchy());
        tracing::info!(session = %id, preset = %config.preset(), "analysis session started");
        Self {
            id,
            config,
            provider,
            reporter,
            oracle,
        }
    }

    /// Default configuration; missing classes are logged
    pub fn with_provider(provider: Arc<dyn ClassMetadataProvider>) -> Self {
        Self::new(
            ValidatedConfig::default(),
            provider,
            Arc::new(TracingMissingClassReporter),
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    pub fn oracle(&self) -> &SubtypeOracle {
        &self.oracle
    }

    /// Add classes and their ancestors; returns the classes that could not be resolved
    pub fn load_classes<'c>(
        &self,
        ids: impl IntoIterator<Item = &'c ClassId>,
    ) -> Vec<ClassLookupFailure> {
        let failures: Vec<ClassLookupFailure> = ids
            .into_iter()
            .filter_map(|id| self.oracle.add_class(id).err())
            .collect();
        tracing::debug!(
            session = %self.id,
            vertices = self.oracle.vertex_count(),
            unresolved = failures.len(),
            "classes loaded"
        );
        failures
    }

    pub fn method_runner(&self) -> MethodAnalysisRunner {
        MethodAnalysisRunner::new(self.config.parallel())
    }

    /// Unconditionally dereferenced parameters, one result per method
    pub fn unconditional_derefs(
        &self,
        cfgs: &[ControlFlowGraph],
    ) -> Vec<std::result::Result<DerefSummary, DataflowError>> {
        let use_case = UnconditionalDerefUseCaseImpl::from_config(&self.config);
        self.method_runner().analyze_derefs(cfgs, &use_case)
    }

    /// Schedule the detectors of `registries` into passes
    pub fn plan_detectors(
        &self,
        registries: impl IntoIterator<Item = DetectorRegistry>,
    ) -> Result<ExecutionPlan> {
        let mut builder = ExecutionPlanBuilder::with_config(self.config.scheduler());
        for registry in registries {
            builder.add_registry(registry);
        }
        Ok(builder.build()?)
    }

    /// End this session and start a fresh one with the same collaborators
    pub fn reset(&mut self) {
        let previous = self.id;
        self.id = Uuid::new_v4();
        self.oracle = SubtypeOracle::new(
            self.provider.clone(),
            self.reporter.clone(),
            self.config.hierarchy(),
        );
        tracing::info!(previous = %previous, session = %self.id, "analysis session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::class_hierarchy::domain::TypeDescriptor;
    use crate::features::class_hierarchy::infrastructure::{
        InMemoryClassProvider, MissingClassCollector,
    };
    use crate::features::class_hierarchy::domain::ClassMetadata;

    fn session(collector: Arc<MissingClassCollector>) -> AnalysisSession {
        let provider = InMemoryClassProvider::with_jdk_roots()
            .with_class(ClassMetadata::class("com.acme.Dog", Some("com.acme.Animal"), &[]))
            .with_class(ClassMetadata::class("com.acme.Animal", Some("java.lang.Object"), &[]));
        AnalysisSession::new(ValidatedConfig::default(), Arc::new(provider), collector)
    }

    #[test]
    fn test_reset_starts_empty_session() {
        let collector = Arc::new(MissingClassCollector::default());
        let mut session = session(collector.clone());
        let first_id = session.id();

        let failures = session.load_classes(&[ClassId::new("com.acme.Dog"), ClassId::new("com.acme.Ghost")]);
        assert_eq!(failures.len(), 1);
        assert!(session.oracle().contains(&ClassId::new("com.acme.Animal")));
        assert_eq!(collector.len(), 1);

        session.reset();
        assert_ne!(session.id(), first_id);
        assert_eq!(session.oracle().vertex_count(), 0);

        let dog = TypeDescriptor::parse("com.acme.Dog").unwrap();
        let animal = TypeDescriptor::parse("com.acme.Animal").unwrap();
        assert_eq!(session.oracle().is_subtype(&dog, &animal), Ok(true));
    }
}
