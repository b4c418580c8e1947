//! Inheritance graph vertices and edges

use super::class_id::ClassId;

/// Whether the class metadata could be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Resolved,
    /// Placeholder for a class the provider could not supply
    Missing,
}

/// One class or interface in the inheritance graph
///
/// A missing vertex never becomes resolved during a session, and `finished`
/// flips to true exactly once: when all direct supertypes have been added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassVertex {
    pub id: ClassId,
    pub state: ResolutionState,
    /// Approximate for missing vertices (inferred from the edge that created them)
    pub is_interface: bool,
    pub finished: bool,
}

impl ClassVertex {
    pub fn resolved(id: ClassId, is_interface: bool) -> Self {
        Self {
            id,
            state: ResolutionState::Resolved,
            is_interface,
            finished: false,
        }
    }

    /// Missing vertices are finished on creation: there is nothing to expand.
    pub fn missing(id: ClassId, is_interface: bool) -> Self {
        Self {
            id,
            state: ResolutionState::Missing,
            is_interface,
            finished: true,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.state == ResolutionState::Resolved
    }

    pub fn is_missing(&self) -> bool {
        self.state == ResolutionState::Missing
    }
}

/// Edge label: vertex → direct supertype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InheritanceEdgeKind {
    Superclass,
    Interface,
}

/// Metadata the provider returns for a resolvable class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMetadata {
    pub id: ClassId,
    /// `None` only for the hierarchy root
    pub superclass: Option<ClassId>,
    pub interfaces: Vec<ClassId>,
    pub is_interface: bool,
}

impl ClassMetadata {
    /// Concrete or abstract class
    pub fn class(
        id: impl Into<ClassId>,
        superclass: Option<&str>,
        interfaces: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            superclass: superclass.map(ClassId::new),
            interfaces: interfaces.iter().map(ClassId::new).collect(),
            is_interface: false,
        }
    }

    /// Interface; JVM interfaces carry `java.lang.Object` as superclass
    pub fn interface(id: impl Into<ClassId>, super_interfaces: &[&str]) -> Self {
        Self {
            id: id.into(),
            superclass: Some(ClassId::object()),
            interfaces: super_interfaces.iter().map(ClassId::new).collect(),
            is_interface: true,
        }
    }

    /// Direct supertypes with their edge labels, superclass first
    pub fn direct_supertypes(&self) -> impl Iterator<Item = (&ClassId, InheritanceEdgeKind)> {
        self.superclass
            .iter()
            .map(|s| (s, InheritanceEdgeKind::Superclass))
            .chain(
                self.interfaces
                    .iter()
                    .map(|i| (i, InheritanceEdgeKind::Interface)),
            )
    }
}
