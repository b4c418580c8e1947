//! Type descriptors for subtype queries
//!
//! Syntax accepted by [`TypeDescriptor::parse`]:
//! - primitive: `int`, `boolean`, ... (the eight JVM primitives)
//! - class: `com.acme.Dog` (or `com/acme/Dog`)
//! - array: base followed by one `[]` per dimension (`int[][]`, `com.acme.Dog[]`)

use super::class_id::ClassId;
use std::fmt;

/// JVM primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "char" => Self::Char,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

/// Element type of an array
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseType {
    Primitive(PrimitiveType),
    Class(ClassId),
}

impl BaseType {
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Class(_))
    }
}

/// A value type as seen by subtype queries
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(PrimitiveType),
    /// Ordinary (non-array) class or interface
    Object(ClassId),
    /// `dimensions >= 1`
    Array { base: BaseType, dimensions: u32 },
}

impl TypeDescriptor {
    pub fn object(id: impl Into<ClassId>) -> Self {
        Self::Object(id.into())
    }

    /// Build `base` with `dimensions` array dimensions; zero dimensions yields the base itself
    pub fn with_dimensions(base: BaseType, dimensions: u32) -> Self {
        match (dimensions, base) {
            (0, BaseType::Primitive(p)) => Self::Primitive(p),
            (0, BaseType::Class(c)) => Self::Object(c),
            (dimensions, base) => Self::Array { base, dimensions },
        }
    }

    /// Parse a type name. Returns `None` for empty names or malformed brackets.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        let mut base = name;
        let mut dimensions = 0u32;
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped;
            dimensions += 1;
        }
        if base.is_empty() || base.contains('[') || base.contains(']') {
            return None;
        }
        let base = match PrimitiveType::from_name(base) {
            Some(p) => BaseType::Primitive(p),
            None => BaseType::Class(ClassId::new(base)),
        };
        Some(Self::with_dimensions(base, dimensions))
    }

    /// Objects and arrays
    pub fn is_reference(&self) -> bool {
        !matches!(self, Self::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array { .. })
    }

    pub fn dimensions(&self) -> u32 {
        match self {
            Self::Array { dimensions, .. } => *dimensions,
            _ => 0,
        }
    }

    /// Class id of an ordinary object type
    pub fn as_class(&self) -> Option<&ClassId> {
        match self {
            Self::Object(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.as_str()),
            Self::Object(id) => write!(f, "{}", id),
            Self::Array { base, dimensions } => {
                match base {
                    BaseType::Primitive(p) => f.write_str(p.as_str())?,
                    BaseType::Class(id) => write!(f, "{}", id)?,
                }
                for _ in 0..*dimensions {
                    f.write_str("[]")?;
                }
                Ok(())
            }
        }
    }
}

impl From<ClassId> for TypeDescriptor {
    fn from(id: ClassId) -> Self {
        Self::Object(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitive_and_class() {
        assert_eq!(
            TypeDescriptor::parse("int"),
            Some(TypeDescriptor::Primitive(PrimitiveType::Int))
        );
        assert_eq!(
            TypeDescriptor::parse("com.acme.Dog"),
            Some(TypeDescriptor::object("com.acme.Dog"))
        );
    }

    #[test]
    fn test_parse_arrays() {
        let t = TypeDescriptor::parse("int[][]").unwrap();
        assert_eq!(
            t,
            TypeDescriptor::Array {
                base: BaseType::Primitive(PrimitiveType::Int),
                dimensions: 2
            }
        );
        assert_eq!(t.to_string(), "int[][]");
        assert_eq!(TypeDescriptor::parse("com.acme.Dog[]").unwrap().dimensions(), 1);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(TypeDescriptor::parse(""), None);
        assert_eq!(TypeDescriptor::parse("[]"), None);
        assert_eq!(TypeDescriptor::parse("int[]x"), None);
    }

    #[test]
    fn test_with_zero_dimensions_is_base() {
        let t = TypeDescriptor::with_dimensions(BaseType::Class(ClassId::object()), 0);
        assert_eq!(t, TypeDescriptor::Object(ClassId::object()));
        assert!(!t.is_array());
        assert!(t.is_reference());
    }
}
