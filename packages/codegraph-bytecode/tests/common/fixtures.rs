//! Class hierarchy fixtures

use codegraph_bytecode::features::class_hierarchy::{
    ClassMetadata, InMemoryClassProvider, MissingClassCollector, SubtypeOracle,
};
use codegraph_bytecode::config::HierarchyConfig;
use std::sync::Arc;

/// Animal hierarchy:
///
/// ```text
/// Object ← Animal ← Dog ← Puppy
///            ↑ ← Cat          Pet (interface) ← Dog, Cat
/// ```
pub fn fixture_zoo() -> InMemoryClassProvider {
    InMemoryClassProvider::with_jdk_roots()
        .with_class(ClassMetadata::interface("zoo.Pet", &[]))
        .with_class(ClassMetadata::class("zoo.Animal", Some("java.lang.Object"), &[]))
        .with_class(ClassMetadata::class("zoo.Dog", Some("zoo.Animal"), &["zoo.Pet"]))
        .with_class(ClassMetadata::class("zoo.Cat", Some("zoo.Animal"), &["zoo.Pet"]))
        .with_class(ClassMetadata::class("zoo.Puppy", Some("zoo.Dog"), &[]))
}

/// `C <: B <: A` with A's superclass `lib.Gone` absent from the classpath
pub fn fixture_broken_chain() -> InMemoryClassProvider {
    InMemoryClassProvider::with_jdk_roots()
        .with_class(ClassMetadata::class("app.A", Some("lib.Gone"), &[]))
        .with_class(ClassMetadata::class("app.B", Some("app.A"), &[]))
        .with_class(ClassMetadata::class("app.C", Some("app.B"), &[]))
        .with_class(ClassMetadata::class("app.Other", Some("java.lang.Object"), &[]))
}

/// Oracle over `provider` with a collecting reporter
pub fn oracle_with(provider: InMemoryClassProvider) -> (SubtypeOracle, Arc<MissingClassCollector>) {
    let collector = Arc::new(MissingClassCollector::new());
    let oracle = SubtypeOracle::new(Arc::new(provider), collector.clone(), HierarchyConfig::default());
    (oracle, collector)
}
