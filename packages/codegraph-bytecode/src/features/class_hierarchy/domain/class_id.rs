//! Class identifiers

use std::fmt;
use std::sync::Arc;

/// Fully-qualified, dotted class name (`java.lang.String`)
///
/// Cheap to clone: the name is shared behind an `Arc<str>`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(Arc<str>);

/// Root of every reference type
pub const OBJECT: &str = "java.lang.Object";
/// Implemented by every array type
pub const SERIALIZABLE: &str = "java.io.Serializable";
/// Implemented by every array type
pub const CLONEABLE: &str = "java.lang.Cloneable";

impl ClassId {
    /// Create from a dotted name. Slash-separated internal names are normalised.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        if name.contains('/') {
            Self(Arc::from(name.replace('/', ".")))
        } else {
            Self(Arc::from(name))
        }
    }

    pub fn object() -> Self {
        Self::new(OBJECT)
    }

    pub fn serializable() -> Self {
        Self::new(SERIALIZABLE)
    }

    pub fn cloneable() -> Self {
        Self::new(CLONEABLE)
    }

    /// Dotted name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_object(&self) -> bool {
        &*self.0 == OBJECT
    }

    /// True for the three supertypes every array type has
    pub fn is_array_supertype(&self) -> bool {
        matches!(&*self.0, OBJECT | SERIALIZABLE | CLONEABLE)
    }

    /// Unqualified name (`String` for `java.lang.String`)
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ClassId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_names_are_normalised() {
        assert_eq!(ClassId::new("java/lang/String"), ClassId::new("java.lang.String"));
    }

    #[test]
    fn test_well_known_ids() {
        assert!(ClassId::object().is_object());
        assert!(ClassId::cloneable().is_array_supertype());
        assert!(!ClassId::new("com.acme.Dog").is_array_supertype());
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(ClassId::new("com.acme.Dog").simple_name(), "Dog");
        assert_eq!(ClassId::new("Dog").simple_name(), "Dog");
    }
}
