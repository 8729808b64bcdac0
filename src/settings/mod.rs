//! Schema settings façade
//!
//! `SchemaSettings` owns the registries and answers every per-route schema
//! question: effective attributes, nullability, polymorphic implementations,
//! SQL type/size/scale, index kind, disambiguated names. Each query runs the
//! shared effective-attribute step first and then its own derivation; no
//! query depends on another query's output.
//!
//! Lifecycle is two-phase: populate the registries single-threaded during
//! bootstrap, call [`SchemaSettings::freeze`], then share the value read-only
//! (typically behind an `Arc`). Mutation after the freeze is rejected with
//! [`SchemaError::FrozenConfiguration`].

mod registry;

use crate::attributes::{AttributeSet, AttributeTarget, SchemaAttribute};
use crate::engine::SqlEngine;
use crate::error::SchemaError;
use crate::route::{Route, RouteKind};
use crate::sql_type::{self, SqlDbType, SqlTypePair};
use crate::types::TypeRef;

use registry::SchemaRegistries;

/// The set of concrete persistent types a polymorphic reference may hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Implementations {
    /// Any registered persistent type
    ByAll,
    /// A fixed, non-empty set of concrete types
    ByTypes(Vec<TypeRef>),
}

impl Implementations {
    pub fn is_by_all(&self) -> bool {
        matches!(self, Implementations::ByAll)
    }

    /// The fixed set, empty for `ByAll`
    pub fn types(&self) -> &[TypeRef] {
        match self {
            Implementations::ByAll => &[],
            Implementations::ByTypes(types) => types,
        }
    }

    fn contains(&self, type_ref: &TypeRef) -> bool {
        match self {
            Implementations::ByAll => false,
            Implementations::ByTypes(types) => types.contains(type_ref),
        }
    }
}

/// Index backing a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    None,
    Unique,
    UniqueAllowingMultipleNulls,
}

/// Schema resolution settings for one target engine
///
/// Built once at bootstrap, frozen, then shared read-only.
#[derive(Debug, Clone)]
pub struct SchemaSettings {
    engine: SqlEngine,
    frozen: bool,
    registries: SchemaRegistries,
    /// Upper bound on parameters per generated statement batch
    pub max_number_of_parameters: usize,
    /// Upper bound on statements per save query
    pub max_statements_in_save_queries: usize,
}

impl SchemaSettings {
    /// Create settings for `engine`, with the primitive type table and the
    /// default size/scale tables pre-seeded (2008+ additions included when
    /// the engine supports them)
    pub fn new(engine: SqlEngine) -> Self {
        SchemaSettings {
            engine,
            frozen: false,
            registries: SchemaRegistries::seeded(engine),
            max_number_of_parameters: 2000,
            max_statements_in_save_queries: 16,
        }
    }

    pub fn engine(&self) -> SqlEngine {
        self.engine
    }

    /// End the construction phase. Idempotent; every mutating call afterwards
    /// fails with `FrozenConfiguration`.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn ensure_mutable(&self, operation: &str) -> Result<(), SchemaError> {
        if self.frozen {
            return Err(SchemaError::FrozenConfiguration {
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Construction-phase registration
    // ------------------------------------------------------------------

    /// Supersede the captured attributes of `route` with `attributes`.
    ///
    /// Every attribute must be legal on a field; a route may only be
    /// overridden once.
    pub fn override_attributes(
        &mut self,
        route: Route,
        attributes: Vec<SchemaAttribute>,
    ) -> Result<(), SchemaError> {
        self.ensure_mutable("override attributes")?;

        let attributes = AttributeSet::new(attributes);
        attributes.assert_valid_on(AttributeTarget::Field)?;

        if self.registries.overridden_attributes.contains_key(&route) {
            return Err(SchemaError::DuplicateOverride {
                route: route.to_string(),
            });
        }

        self.registries.overridden_attributes.insert(route, attributes);
        Ok(())
    }

    pub fn is_overridden(&self, route: &Route) -> bool {
        self.registries.overridden_attributes.contains_key(route)
    }

    /// Map `type_ref` to a built-in column type
    pub fn register_type_value(
        &mut self,
        type_ref: TypeRef,
        db_type: SqlDbType,
    ) -> Result<(), SchemaError> {
        self.ensure_mutable("register type value")?;
        self.registries.type_values.insert(type_ref, db_type);
        Ok(())
    }

    /// Record the database-side name for a UDT-marked type
    pub fn register_udt_name(
        &mut self,
        type_ref: TypeRef,
        name: impl Into<String>,
    ) -> Result<(), SchemaError> {
        self.ensure_mutable("register UDT name")?;
        self.registries.udt_sql_names.insert(type_ref, name.into());
        Ok(())
    }

    pub fn set_default_size(
        &mut self,
        db_type: SqlDbType,
        size: i32,
    ) -> Result<(), SchemaError> {
        self.ensure_mutable("set default size")?;
        self.registries.default_sizes.insert(db_type, size);
        Ok(())
    }

    pub fn set_default_scale(
        &mut self,
        db_type: SqlDbType,
        scale: i32,
    ) -> Result<(), SchemaError> {
        self.ensure_mutable("set default scale")?;
        self.registries.default_scales.insert(db_type, scale);
        Ok(())
    }

    /// Record a collision-free display name for `type_ref`.
    ///
    /// Registrations accumulate; earlier entries stay resolvable.
    pub fn disambiguate(
        &mut self,
        type_ref: TypeRef,
        clean_name: impl Into<String>,
    ) -> Result<(), SchemaError> {
        self.ensure_mutable("disambiguate type name")?;
        self.registries
            .disambiguated_names
            .insert(type_ref, clean_name.into());
        Ok(())
    }

    pub fn lookup_clean_name(&self, type_ref: &TypeRef) -> Option<&str> {
        self.registries
            .disambiguated_names
            .get(type_ref)
            .map(String::as_str)
    }

    // ------------------------------------------------------------------
    // Per-route queries
    // ------------------------------------------------------------------

    /// The effective attribute set of `route`: its override if one is
    /// registered, else the attributes captured for the route (collection
    /// items borrow their parent field's).
    ///
    /// Root and lite-reference routes carry no field-level attributes.
    pub fn effective_attributes<'a>(
        &'a self,
        route: &'a Route,
    ) -> Result<&'a AttributeSet, SchemaError> {
        if matches!(route.kind(), RouteKind::Root | RouteKind::LiteReference) {
            return Err(SchemaError::UnsupportedRouteKind {
                kind: route.kind().to_string(),
            });
        }

        if let Some(overridden) = self.registries.overridden_attributes.get(route) {
            return Ok(overridden);
        }

        match route.kind() {
            RouteKind::FieldOrProperty => Ok(route.reflected_attributes()),
            RouteKind::CollectionItem => match route.parent() {
                Some(parent) => Ok(parent.reflected_attributes()),
                None => Err(SchemaError::UnsupportedRouteKind {
                    kind: route.kind().to_string(),
                }),
            },
            RouteKind::Root | RouteKind::LiteReference => unreachable!(),
        }
    }

    /// Whether the column for `route` admits NULL.
    ///
    /// `force_null` wins unconditionally; explicit markers come next; absent
    /// both, reference types and optional value types default to nullable.
    pub fn is_nullable(&self, route: &Route, force_null: bool) -> Result<bool, SchemaError> {
        if force_null {
            return Ok(true);
        }

        let attrs = self.effective_attributes(route)?;

        if attrs.has_not_nullable() {
            return Ok(false);
        }
        if attrs.has_nullable() {
            return Ok(true);
        }

        Ok(route.declared_type().admits_null())
    }

    /// The index backing the column for `route`. More than one unique-index
    /// marker is ambiguous and rejected.
    pub fn get_index_kind(&self, route: &Route) -> Result<IndexKind, SchemaError> {
        let markers = self.effective_attributes(route)?.unique_index_markers();

        match markers.as_slice() {
            [] => Ok(IndexKind::None),
            [SchemaAttribute::UniqueIndex {
                allow_multiple_nulls,
            }] => Ok(if *allow_multiple_nulls {
                IndexKind::UniqueAllowingMultipleNulls
            } else {
                IndexKind::Unique
            }),
            [_] => unreachable!("unique_index_markers yields UniqueIndex only"),
            _ => Err(SchemaError::ConflictingIndexMarkers {
                route: route.to_string(),
            }),
        }
    }

    /// The polymorphic reference policy of an association route
    pub fn get_implementations(&self, route: &Route) -> Result<Implementations, SchemaError> {
        let clean = route.declared_type().clean();
        if !clean.is_entity() {
            return Err(SchemaError::NotAPersistentReference {
                route: route.to_string(),
                type_name: clean.name().to_string(),
            });
        }

        let attrs = self.effective_attributes(route)?;

        match attrs.implementations_marker() {
            Some(SchemaAttribute::ImplementedByAll) => Ok(Implementations::ByAll),
            Some(SchemaAttribute::ImplementedBy(types)) => {
                let malformed =
                    types.is_empty() || types.iter().any(|t| !t.is_entity());
                if malformed {
                    return Err(SchemaError::IncompatibleAttribute {
                        target: AttributeTarget::Field.to_string(),
                        names: "ImplementedBy".to_string(),
                    });
                }
                Ok(Implementations::ByTypes(types.clone()))
            }
            _ => Ok(Implementations::ByTypes(vec![clean.clone()])),
        }
    }

    /// Fail unless `route` has a fixed implementation set containing
    /// `type_to_implement`. An implemented-by-all route never satisfies this.
    pub fn assert_implemented_by(
        &self,
        route: &Route,
        type_to_implement: &TypeRef,
    ) -> Result<(), SchemaError> {
        let implementations = self.get_implementations(route)?;

        if !implementations.contains(type_to_implement) {
            return Err(SchemaError::ImplementationNotAllowed {
                route: route.to_string(),
                type_name: type_to_implement.name().to_string(),
            });
        }
        Ok(())
    }

    /// Non-failing form of [`assert_implemented_by`]; `false` for
    /// implemented-by-all routes regardless of the type asked about.
    ///
    /// [`assert_implemented_by`]: SchemaSettings::assert_implemented_by
    pub fn is_implemented_by(
        &self,
        route: &Route,
        type_to_implement: &TypeRef,
    ) -> Result<bool, SchemaError> {
        Ok(self.get_implementations(route)?.contains(type_to_implement))
    }

    /// The column type for `route`: an explicit SqlType attribute wins, else
    /// the clean declared type resolves through the registries
    pub fn get_sql_type(&self, route: &Route) -> Result<SqlTypePair, SchemaError> {
        let attrs = self.effective_attributes(route)?;
        let clean = route.declared_type().clean();

        if let Some(SchemaAttribute::SqlType {
            db_type: Some(db_type),
            udt_type_name,
            ..
        }) = attrs.explicit_sql_type()
        {
            if db_type.is_user_defined() {
                return match udt_type_name {
                    Some(name) => Ok(SqlTypePair::udt(name.clone())),
                    None => Err(SchemaError::UnregisteredUdtName {
                        type_name: clean.name().to_string(),
                    }),
                };
            }
            return Ok(SqlTypePair::plain(*db_type));
        }

        self.sql_type_pair_for(clean)
    }

    /// Resolve a clean type through the type registry, then the UDT name
    /// table. Types mapped by neither have no schema representation.
    pub fn sql_type_pair_for(&self, type_ref: &TypeRef) -> Result<SqlTypePair, SchemaError> {
        if let Some(db_type) = self.registries.type_values.get(type_ref).copied() {
            // A Udt tag in the type table carries no name of its own; the
            // pair still comes from the UDT name table
            if db_type.is_user_defined() {
                return self.registered_udt_pair(type_ref);
            }
            return Ok(SqlTypePair::plain(db_type));
        }

        if type_ref.is_udt() {
            return self.registered_udt_pair(type_ref);
        }

        Err(SchemaError::UnmappedType {
            type_name: type_ref.name().to_string(),
        })
    }

    fn registered_udt_pair(&self, type_ref: &TypeRef) -> Result<SqlTypePair, SchemaError> {
        match self.registries.udt_sql_names.get(type_ref) {
            Some(name) => Ok(SqlTypePair::udt(name.clone())),
            None => Err(SchemaError::UnregisteredUdtName {
                type_name: type_ref.name().to_string(),
            }),
        }
    }

    /// Registry lookup without the UDT fallback
    pub fn default_sql_type(&self, type_ref: &TypeRef) -> Result<SqlDbType, SchemaError> {
        self.registries
            .type_values
            .get(type_ref)
            .copied()
            .ok_or_else(|| SchemaError::UnmappedType {
                type_name: type_ref.name().to_string(),
            })
    }

    /// The database-side name of a UDT-marked type; `None` when the type
    /// carries no UDT marker at all
    pub fn udt_name(&self, type_ref: &TypeRef) -> Result<Option<&str>, SchemaError> {
        if !type_ref.is_udt() {
            return Ok(None);
        }

        self.registries
            .udt_sql_names
            .get(type_ref)
            .map(|name| Some(name.as_str()))
            .ok_or_else(|| SchemaError::UnregisteredUdtName {
                type_name: type_ref.name().to_string(),
            })
    }

    /// Whether `type_ref` has any schema representation at all
    pub fn is_db_type(&self, type_ref: &TypeRef) -> bool {
        self.registries.type_values.contains_key(type_ref)
            || (type_ref.is_udt() && self.registries.udt_sql_names.contains_key(type_ref))
    }

    /// The column size for `route` once its type has resolved to `db_type`:
    /// explicit attribute size, else the default size table, else `None`
    /// (engine default/unbounded)
    pub fn get_sql_size(
        &self,
        route: &Route,
        db_type: SqlDbType,
    ) -> Result<Option<i32>, SchemaError> {
        if let Some(SchemaAttribute::SqlType {
            size: Some(size), ..
        }) = self.effective_attributes(route)?.explicit_sql_type()
        {
            return Ok(Some(*size));
        }

        Ok(self.registries.default_sizes.get(&db_type).copied())
    }

    /// Scale resolution, symmetric to [`get_sql_size`]
    ///
    /// [`get_sql_size`]: SchemaSettings::get_sql_size
    pub fn get_sql_scale(
        &self,
        route: &Route,
        db_type: SqlDbType,
    ) -> Result<Option<i32>, SchemaError> {
        if let Some(SchemaAttribute::SqlType {
            scale: Some(scale), ..
        }) = self.effective_attributes(route)?.explicit_sql_type()
        {
            return Ok(Some(*scale));
        }

        Ok(self.registries.default_scales.get(&db_type).copied())
    }

    /// Rewrite a resolved (type, size) for engines that cannot represent it.
    /// Idempotent; see [`crate::sql_type::apply_engine_quirks`].
    pub fn apply_engine_quirks(
        &self,
        db_type: SqlDbType,
        size: Option<i32>,
    ) -> (SqlDbType, Option<i32>) {
        sql_type::apply_engine_quirks(self.engine, db_type, size)
    }
}
