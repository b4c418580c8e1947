//! Class hierarchy errors

use crate::features::class_hierarchy::domain::ClassId;
use thiserror::Error;

/// A hierarchy query that cannot be answered soundly
///
/// Raised instead of `false` whenever a negative answer might be wrong
/// because some ancestor could not be loaded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassLookupFailure {
    /// The class itself is not on the classpath
    #[error("class {0} could not be resolved")]
    Unresolved(ClassId),

    /// A negative subtype answer would depend on missing ancestors
    #[error("cannot decide whether {subtype} is a subtype of {supertype}: the hierarchy of {subtype} contains missing classes")]
    Indeterminate { subtype: ClassId, supertype: ClassId },

    /// Superclass chains could not be followed to a common ancestor
    #[error("no common superclass of {0} and {1} could be found: a superclass chain is incomplete")]
    NoCommonSuperclass(ClassId, ClassId),
}

impl ClassLookupFailure {
    /// Class whose lookup triggered the failure
    pub fn class(&self) -> &ClassId {
        match self {
            Self::Unresolved(id) => id,
            Self::Indeterminate { subtype, .. } => subtype,
            Self::NoCommonSuperclass(a, _) => a,
        }
    }
}
