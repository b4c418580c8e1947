//! In-memory class metadata provider

use crate::features::class_hierarchy::domain::{ClassId, ClassMetadata};
use crate::features::class_hierarchy::ports::ClassMetadataProvider;
use rustc_hash::FxHashMap;

/// Provider backed by a map, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryClassProvider {
    classes: FxHashMap<ClassId, ClassMetadata>,
}

impl InMemoryClassProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider pre-populated with `java.lang.Object`, `java.io.Serializable`
    /// and `java.lang.Cloneable`
    pub fn with_jdk_roots() -> Self {
        Self::new()
            .with_class(ClassMetadata::class(ClassId::object(), None, &[]))
            .with_class(ClassMetadata::interface(ClassId::serializable(), &[]))
            .with_class(ClassMetadata::interface(ClassId::cloneable(), &[]))
    }

    /// Builder: add a class
    pub fn with_class(mut self, metadata: ClassMetadata) -> Self {
        self.insert(metadata);
        self
    }

    /// Add or replace a class
    pub fn insert(&mut self, metadata: ClassMetadata) {
        self.classes.insert(metadata.id.clone(), metadata);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassMetadataProvider for InMemoryClassProvider {
    fn resolve(&self, id: &ClassId) -> Option<ClassMetadata> {
        self.classes.get(id).cloned()
    }
}

impl FromIterator<ClassMetadata> for InMemoryClassProvider {
    fn from_iter<T: IntoIterator<Item = ClassMetadata>>(iter: T) -> Self {
        let mut provider = Self::new();
        for metadata in iter {
            provider.insert(metadata);
        }
        provider
    }
}
