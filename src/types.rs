//! Type handles for the persistent object model
//!
//! The reflection layer hands the resolver *descriptions* of CLR-style types,
//! not live types. `TypeRef` is that description: a stable name plus the
//! capability flags the resolvers actually branch on (value vs reference,
//! persistent entity, user-defined database type). `SemanticType` wraps a
//! `TypeRef` with the optional/nullable layer a declaration may carry.

use std::borrow::Cow;
use std::fmt;

/// A reflected type, reduced to the facts schema resolution needs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    name: Cow<'static, str>,
    is_value_type: bool,
    is_entity: bool,
    is_udt: bool,
}

impl TypeRef {
    /// A value type (numeric, boolean, date, guid, ...)
    pub fn scalar(name: impl Into<Cow<'static, str>>) -> Self {
        TypeRef {
            name: name.into(),
            is_value_type: true,
            is_entity: false,
            is_udt: false,
        }
    }

    /// A reference type that is not an entity (string, byte array, ...)
    pub fn reference(name: impl Into<Cow<'static, str>>) -> Self {
        TypeRef {
            name: name.into(),
            is_value_type: false,
            is_entity: false,
            is_udt: false,
        }
    }

    /// A persistent entity type (satisfies the identifiable capability)
    pub fn entity(name: impl Into<Cow<'static, str>>) -> Self {
        TypeRef {
            name: name.into(),
            is_value_type: false,
            is_entity: true,
            is_udt: false,
        }
    }

    /// A type carrying the user-defined-database-type marker
    pub fn udt(name: impl Into<Cow<'static, str>>) -> Self {
        TypeRef {
            name: name.into(),
            is_value_type: false,
            is_entity: false,
            is_udt: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_value_type(&self) -> bool {
        self.is_value_type
    }

    pub fn is_entity(&self) -> bool {
        self.is_entity
    }

    pub fn is_udt(&self) -> bool {
        self.is_udt
    }

    // Well-known primitives. Seeding and callers must agree on these keys,
    // so they are constructors here rather than ad-hoc literals.

    pub fn bool_() -> Self {
        Self::scalar("bool")
    }

    pub fn byte() -> Self {
        Self::scalar("byte")
    }

    pub fn int16() -> Self {
        Self::scalar("short")
    }

    pub fn int32() -> Self {
        Self::scalar("int")
    }

    pub fn int64() -> Self {
        Self::scalar("long")
    }

    pub fn float32() -> Self {
        Self::scalar("float")
    }

    pub fn float64() -> Self {
        Self::scalar("double")
    }

    pub fn decimal() -> Self {
        Self::scalar("decimal")
    }

    pub fn char_() -> Self {
        Self::scalar("char")
    }

    pub fn date_time() -> Self {
        Self::scalar("DateTime")
    }

    pub fn time_span() -> Self {
        Self::scalar("TimeSpan")
    }

    pub fn guid() -> Self {
        Self::scalar("Guid")
    }

    pub fn string() -> Self {
        Self::reference("string")
    }

    pub fn byte_array() -> Self {
        Self::reference("byte[]")
    }

    pub fn hierarchy_id() -> Self {
        Self::udt("SqlHierarchyId")
    }

    pub fn geography() -> Self {
        Self::udt("SqlGeography")
    }

    pub fn geometry() -> Self {
        Self::udt("SqlGeometry")
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A declared type: the underlying type plus its optional wrapper, if any
///
/// `Optional(decimal)` models a `decimal?`-style declaration. Resolution keys
/// always use the clean (unwrapped) type; nullability also looks at the
/// wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticType {
    base: TypeRef,
    optional: bool,
}

impl SemanticType {
    pub fn plain(base: TypeRef) -> Self {
        SemanticType {
            base,
            optional: false,
        }
    }

    pub fn optional(base: TypeRef) -> Self {
        SemanticType {
            base,
            optional: true,
        }
    }

    /// The type with any optional wrapper stripped
    pub fn clean(&self) -> &TypeRef {
        &self.base
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Reference types (and optional value types) admit NULL by default
    pub fn admits_null(&self) -> bool {
        !self.base.is_value_type() || self.optional
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "{}?", self.base)
        } else {
            write!(f, "{}", self.base)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_optional_wrapper() {
        let declared = SemanticType::optional(TypeRef::decimal());
        assert_eq!(declared.clean(), &TypeRef::decimal());
        assert!(declared.is_optional());
    }

    #[test]
    fn test_admits_null() {
        assert!(!SemanticType::plain(TypeRef::int32()).admits_null());
        assert!(SemanticType::optional(TypeRef::int32()).admits_null());
        assert!(SemanticType::plain(TypeRef::string()).admits_null());
        assert!(SemanticType::plain(TypeRef::entity("Customer")).admits_null());
    }

    #[test]
    fn test_display_marks_optional() {
        assert_eq!(
            SemanticType::optional(TypeRef::int32()).to_string(),
            "int?"
        );
        assert_eq!(SemanticType::plain(TypeRef::string()).to_string(), "string");
    }
}
