//! Cached query results

use super::class_id::ClassId;
use rustc_hash::FxHashSet;

/// Known supertypes of a class
///
/// Includes the class itself when it is resolved. When
/// `encountered_missing_classes` is set the set may be incomplete, so a
/// negative membership answer is not trustworthy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupertypeQueryResult {
    pub supertypes: FxHashSet<ClassId>,
    pub encountered_missing_classes: bool,
}

impl SupertypeQueryResult {
    pub fn contains(&self, id: &ClassId) -> bool {
        self.supertypes.contains(id)
    }

    /// `Some(answer)` when the answer is sound, `None` when the class is absent
    /// and some ancestor could not be resolved.
    pub fn is_member(&self, id: &ClassId) -> Option<bool> {
        if self.supertypes.contains(id) {
            Some(true)
        } else if self.encountered_missing_classes {
            None
        } else {
            Some(false)
        }
    }

    pub fn len(&self) -> usize {
        self.supertypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supertypes.is_empty()
    }
}

/// Known subtypes of a class, including the class itself
pub type SubtypeSet = FxHashSet<ClassId>;
