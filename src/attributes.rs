//! Declarative schema attributes
//!
//! A closed set of attribute facts captured from the entity model at
//! registration time. Resolvers only ever pattern-match this set; no runtime
//! type introspection happens anywhere downstream.

use std::fmt;

use crate::error::SchemaError;
use crate::sql_type::SqlDbType;
use crate::types::TypeRef;

/// Where an attribute may legally be attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeTarget {
    /// A field or property declaration
    Field,
    /// A type declaration
    Type,
}

impl fmt::Display for AttributeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeTarget::Field => f.write_str("Field"),
            AttributeTarget::Type => f.write_str("Type"),
        }
    }
}

/// One declarative schema fact attached to a route
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaAttribute {
    /// The column admits NULL regardless of the declared type
    Nullable,
    /// The column rejects NULL regardless of the declared type
    NotNullable,
    /// Explicit column type and/or size/scale, superseding registry lookup
    SqlType {
        db_type: Option<SqlDbType>,
        size: Option<i32>,
        scale: Option<i32>,
        udt_type_name: Option<String>,
    },
    /// The column is backed by a unique index
    UniqueIndex { allow_multiple_nulls: bool },
    /// Polymorphic reference restricted to the listed concrete types
    ImplementedBy(Vec<TypeRef>),
    /// Polymorphic reference open to every registered persistent type
    ImplementedByAll,
    /// Table name override; legal on type declarations only
    TableName(String),
}

impl SchemaAttribute {
    /// Shorthand for an explicit type with no size/scale
    pub fn sql_type(db_type: SqlDbType) -> Self {
        SchemaAttribute::SqlType {
            db_type: Some(db_type),
            size: None,
            scale: None,
            udt_type_name: None,
        }
    }

    /// Shorthand for a size-only override (type still resolved from the
    /// registry)
    pub fn sql_size(size: i32) -> Self {
        SchemaAttribute::SqlType {
            db_type: None,
            size: Some(size),
            scale: None,
            udt_type_name: None,
        }
    }

    pub fn target(&self) -> AttributeTarget {
        match self {
            SchemaAttribute::TableName(_) => AttributeTarget::Type,
            _ => AttributeTarget::Field,
        }
    }

    /// The attribute name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            SchemaAttribute::Nullable => "Nullable",
            SchemaAttribute::NotNullable => "NotNullable",
            SchemaAttribute::SqlType { .. } => "SqlType",
            SchemaAttribute::UniqueIndex { .. } => "UniqueIndex",
            SchemaAttribute::ImplementedBy(_) => "ImplementedBy",
            SchemaAttribute::ImplementedByAll => "ImplementedByAll",
            SchemaAttribute::TableName(_) => "TableName",
        }
    }
}

/// Ordered attribute list for one route
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AttributeSet(Vec<SchemaAttribute>);

impl AttributeSet {
    pub fn new(attributes: Vec<SchemaAttribute>) -> Self {
        AttributeSet(attributes)
    }

    pub fn empty() -> Self {
        AttributeSet(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaAttribute> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check every attribute is legal on `target`; offenders are reported by
    /// name, comma separated, in declaration order
    pub fn assert_valid_on(&self, target: AttributeTarget) -> Result<(), SchemaError> {
        let offending: Vec<&str> = self
            .0
            .iter()
            .filter(|attr| attr.target() != target)
            .map(SchemaAttribute::name)
            .collect();

        if offending.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::IncompatibleAttribute {
                target: target.to_string(),
                names: offending.join(", "),
            })
        }
    }

    pub fn has_nullable(&self) -> bool {
        self.0.iter().any(|a| matches!(a, SchemaAttribute::Nullable))
    }

    pub fn has_not_nullable(&self) -> bool {
        self.0
            .iter()
            .any(|a| matches!(a, SchemaAttribute::NotNullable))
    }

    /// The first explicit SqlType attribute, if any
    pub fn explicit_sql_type(&self) -> Option<&SchemaAttribute> {
        self.0
            .iter()
            .find(|a| matches!(a, SchemaAttribute::SqlType { .. }))
    }

    /// All unique-index markers; the caller rejects ambiguity
    pub fn unique_index_markers(&self) -> Vec<&SchemaAttribute> {
        self.0
            .iter()
            .filter(|a| matches!(a, SchemaAttribute::UniqueIndex { .. }))
            .collect()
    }

    /// The first implementations marker (ImplementedBy / ImplementedByAll)
    pub fn implementations_marker(&self) -> Option<&SchemaAttribute> {
        self.0.iter().find(|a| {
            matches!(
                a,
                SchemaAttribute::ImplementedBy(_) | SchemaAttribute::ImplementedByAll
            )
        })
    }
}

impl From<Vec<SchemaAttribute>> for AttributeSet {
    fn from(attributes: Vec<SchemaAttribute>) -> Self {
        AttributeSet(attributes)
    }
}
