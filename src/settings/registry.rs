//! Registries backing `SchemaSettings`
//!
//! All tables are populated during the single-threaded construction phase and
//! read-only once the settings freeze. Seed data follows the SQL Server
//! primitive mappings, with the 2008+ additions gated on the engine.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::attributes::AttributeSet;
use crate::engine::SqlEngine;
use crate::route::Route;
use crate::sql_type::SqlDbType;
use crate::types::TypeRef;

static PRIMITIVE_TYPE_VALUES: LazyLock<Vec<(TypeRef, SqlDbType)>> = LazyLock::new(|| {
    vec![
        (TypeRef::bool_(), SqlDbType::Bit),
        (TypeRef::byte(), SqlDbType::TinyInt),
        (TypeRef::int16(), SqlDbType::SmallInt),
        (TypeRef::int32(), SqlDbType::Int),
        (TypeRef::int64(), SqlDbType::BigInt),
        (TypeRef::float32(), SqlDbType::Real),
        (TypeRef::float64(), SqlDbType::Float),
        (TypeRef::decimal(), SqlDbType::Decimal),
        (TypeRef::char_(), SqlDbType::NChar),
        (TypeRef::string(), SqlDbType::NVarChar),
        (TypeRef::date_time(), SqlDbType::DateTime),
        (TypeRef::byte_array(), SqlDbType::VarBinary),
        (TypeRef::guid(), SqlDbType::UniqueIdentifier),
    ]
});

static DEFAULT_SIZES: LazyLock<Vec<(SqlDbType, i32)>> = LazyLock::new(|| {
    vec![
        (SqlDbType::NVarChar, 200),
        (SqlDbType::VarChar, 200),
        (SqlDbType::Image, 8000),
        (SqlDbType::VarBinary, i32::MAX),
        (SqlDbType::Binary, 8000),
        (SqlDbType::Char, 1),
        (SqlDbType::NChar, 1),
        (SqlDbType::Decimal, 18),
    ]
});

static DEFAULT_SCALES: LazyLock<Vec<(SqlDbType, i32)>> =
    LazyLock::new(|| vec![(SqlDbType::Decimal, 2)]);

/// The mutable-then-frozen lookup tables
#[derive(Debug, Clone)]
pub(crate) struct SchemaRegistries {
    pub(crate) type_values: HashMap<TypeRef, SqlDbType>,
    pub(crate) udt_sql_names: HashMap<TypeRef, String>,
    pub(crate) default_sizes: HashMap<SqlDbType, i32>,
    pub(crate) default_scales: HashMap<SqlDbType, i32>,
    pub(crate) overridden_attributes: HashMap<Route, AttributeSet>,
    pub(crate) disambiguated_names: HashMap<TypeRef, String>,
}

impl SchemaRegistries {
    pub(crate) fn seeded(engine: SqlEngine) -> Self {
        let mut type_values: HashMap<TypeRef, SqlDbType> =
            PRIMITIVE_TYPE_VALUES.iter().cloned().collect();
        let mut udt_sql_names = HashMap::new();

        if engine.supports_udt_extensions() {
            type_values.insert(TypeRef::time_span(), SqlDbType::Time);

            udt_sql_names.insert(TypeRef::hierarchy_id(), "HierarchyId".to_string());
            udt_sql_names.insert(TypeRef::geography(), "Geography".to_string());
            udt_sql_names.insert(TypeRef::geometry(), "Geometry".to_string());
        }

        SchemaRegistries {
            type_values,
            udt_sql_names,
            default_sizes: DEFAULT_SIZES.iter().copied().collect(),
            default_scales: DEFAULT_SCALES.iter().copied().collect(),
            overridden_attributes: HashMap::new(),
            disambiguated_names: HashMap::new(),
        }
    }
}
