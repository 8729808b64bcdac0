//! schema-settings: schema metadata resolution for persistent entity models
//!
//! This library turns type-level metadata about a persistent object model
//! (entities, fields, collection items) into concrete relational-schema
//! facts: SQL type and size/scale, nullability, polymorphic implementation
//! sets, index kind. Declarative attributes captured at entity registration
//! drive resolution, selective per-route overrides supersede them, and
//! engine-specific rewrites adapt the result to the target SQL Server
//! variant.
//!
//! It produces declarative facts only: no SQL text, no DDL, no migrations.

pub mod attributes;
pub mod engine;
pub mod error;
pub mod route;
pub mod settings;
pub mod sql_type;
pub mod types;

pub use attributes::{AttributeSet, AttributeTarget, SchemaAttribute};
pub use engine::SqlEngine;
pub use error::SchemaError;
pub use route::{Route, RouteKind};
pub use settings::{Implementations, IndexKind, SchemaSettings};
pub use sql_type::{SqlDbType, SqlTypePair};
pub use types::{SemanticType, TypeRef};
