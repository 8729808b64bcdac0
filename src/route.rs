//! Routes into the persistent entity graph
//!
//! A route names one location in an entity's type graph: the entity root, a
//! field or property, a collection element, or the lite-reference pseudo-route
//! behind a polymorphic reference. Routes are immutable, cheap to clone and
//! hash by content, so they double as lookup keys for the override table.
//!
//! The attributes a route carries are the ones captured from the entity model
//! when it was registered; collection items carry none of their own and borrow
//! their parent field's at resolution time.

use std::fmt;
use std::sync::Arc;

use crate::attributes::{AttributeSet, SchemaAttribute};
use crate::types::{SemanticType, TypeRef};

/// Syntactic role of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Root,
    FieldOrProperty,
    CollectionItem,
    LiteReference,
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteKind::Root => f.write_str("Root"),
            RouteKind::FieldOrProperty => f.write_str("FieldOrProperty"),
            RouteKind::CollectionItem => f.write_str("CollectionItem"),
            RouteKind::LiteReference => f.write_str("LiteReference"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct RouteNode {
    kind: RouteKind,
    parent: Option<Route>,
    member: Option<String>,
    declared: SemanticType,
    attributes: AttributeSet,
}

/// One location in a persistent entity's type graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    inner: Arc<RouteNode>,
}

impl Route {
    /// The root of an entity's graph
    pub fn root(entity: TypeRef) -> Self {
        Route {
            inner: Arc::new(RouteNode {
                kind: RouteKind::Root,
                parent: None,
                member: None,
                declared: SemanticType::plain(entity),
                attributes: AttributeSet::empty(),
            }),
        }
    }

    /// A field or property under this route, with the attributes captured
    /// from the entity model
    pub fn field(
        &self,
        name: impl Into<String>,
        declared: SemanticType,
        attributes: Vec<SchemaAttribute>,
    ) -> Self {
        Route {
            inner: Arc::new(RouteNode {
                kind: RouteKind::FieldOrProperty,
                parent: Some(self.clone()),
                member: Some(name.into()),
                declared,
                attributes: AttributeSet::new(attributes),
            }),
        }
    }

    /// The element type of a collection-valued field. Collection items carry
    /// no attributes of their own.
    pub fn collection_item(&self, declared: SemanticType) -> Self {
        debug_assert_eq!(self.kind(), RouteKind::FieldOrProperty);
        Route {
            inner: Arc::new(RouteNode {
                kind: RouteKind::CollectionItem,
                parent: Some(self.clone()),
                member: None,
                declared,
                attributes: AttributeSet::empty(),
            }),
        }
    }

    /// The lite-reference pseudo-route behind a polymorphic reference field
    pub fn lite_reference(&self, entity: TypeRef) -> Self {
        Route {
            inner: Arc::new(RouteNode {
                kind: RouteKind::LiteReference,
                parent: Some(self.clone()),
                member: None,
                declared: SemanticType::plain(entity),
                attributes: AttributeSet::empty(),
            }),
        }
    }

    pub fn kind(&self) -> RouteKind {
        self.inner.kind
    }

    pub fn parent(&self) -> Option<&Route> {
        self.inner.parent.as_ref()
    }

    pub fn member_name(&self) -> Option<&str> {
        self.inner.member.as_deref()
    }

    /// The declared type at this location, optional wrapper included
    pub fn declared_type(&self) -> &SemanticType {
        &self.inner.declared
    }

    /// The attributes captured for this route itself (not the effective set;
    /// overrides and collection-item delegation live in `SchemaSettings`)
    pub fn reflected_attributes(&self) -> &AttributeSet {
        &self.inner.attributes
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            RouteKind::Root => write!(f, "{}", self.inner.declared.clean()),
            RouteKind::FieldOrProperty => {
                if let Some(parent) = &self.inner.parent {
                    write!(f, "{}.", parent)?;
                }
                f.write_str(self.inner.member.as_deref().unwrap_or("?"))
            }
            RouteKind::CollectionItem => {
                if let Some(parent) = &self.inner.parent {
                    write!(f, "{}/", parent)?;
                }
                f.write_str("Item")
            }
            RouteKind::LiteReference => {
                if let Some(parent) = &self.inner.parent {
                    write!(f, "{}.", parent)?;
                }
                f.write_str("Lite")
            }
        }
    }
}
