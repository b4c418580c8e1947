//! Class hierarchy ports
//!
//! Boundaries to the outside world:
//! - [`ClassMetadataProvider`]: supplies superclass / interface lists (the class-file reader)
//! - [`MissingClassReporter`]: side channel for classes that could not be loaded

use super::domain::{ClassId, ClassMetadata};

/// Supplies class metadata on demand
///
/// Implementations must be deterministic within a session: resolving the same
/// id twice returns the same answer.
pub trait ClassMetadataProvider: Send + Sync {
    /// `None` when the class cannot be found on the analysed classpath
    fn resolve(&self, id: &ClassId) -> Option<ClassMetadata>;
}

/// Receives missing-class notifications
///
/// Called exactly once per distinct missing class per session. Never an error:
/// analysis continues with a placeholder vertex. The oracle releases its graph
/// lock before reporting, so an implementation may query the oracle.
pub trait MissingClassReporter: Send + Sync {
    fn report(&self, id: &ClassId);
}

impl<P: ClassMetadataProvider + ?Sized> ClassMetadataProvider for std::sync::Arc<P> {
    fn resolve(&self, id: &ClassId) -> Option<ClassMetadata> {
        (**self).resolve(id)
    }
}

impl<R: MissingClassReporter + ?Sized> MissingClassReporter for std::sync::Arc<R> {
    fn report(&self, id: &ClassId) {
        (**self).report(id)
    }
}
