//! SQL column type tags and the engine-specific rewrite

use std::fmt;

use crate::engine::SqlEngine;

/// SQL Server column type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlDbType {
    Bit,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Real,
    Float,
    Decimal,
    Char,
    NChar,
    VarChar,
    NVarChar,
    Text,
    NText,
    DateTime,
    Time,
    Binary,
    VarBinary,
    Image,
    UniqueIdentifier,
    Udt,
}

impl SqlDbType {
    /// Variable-length character types subject to the 4000-character cap on
    /// Compact Edition
    pub fn is_variable_character(self) -> bool {
        matches!(self, SqlDbType::VarChar | SqlDbType::NVarChar)
    }

    pub fn is_user_defined(self) -> bool {
        self == SqlDbType::Udt
    }

    /// The T-SQL type name, for diagnostics
    pub fn type_name(self) -> &'static str {
        match self {
            SqlDbType::Bit => "bit",
            SqlDbType::TinyInt => "tinyint",
            SqlDbType::SmallInt => "smallint",
            SqlDbType::Int => "int",
            SqlDbType::BigInt => "bigint",
            SqlDbType::Real => "real",
            SqlDbType::Float => "float",
            SqlDbType::Decimal => "decimal",
            SqlDbType::Char => "char",
            SqlDbType::NChar => "nchar",
            SqlDbType::VarChar => "varchar",
            SqlDbType::NVarChar => "nvarchar",
            SqlDbType::Text => "text",
            SqlDbType::NText => "ntext",
            SqlDbType::DateTime => "datetime",
            SqlDbType::Time => "time",
            SqlDbType::Binary => "binary",
            SqlDbType::VarBinary => "varbinary",
            SqlDbType::Image => "image",
            SqlDbType::UniqueIdentifier => "uniqueidentifier",
            SqlDbType::Udt => "udt",
        }
    }
}

impl fmt::Display for SqlDbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A resolved column type: the type tag plus, for user-defined types only,
/// the registered UDT name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlTypePair {
    db_type: SqlDbType,
    udt_type_name: Option<String>,
}

impl SqlTypePair {
    /// A built-in type. Never carries a UDT name.
    pub fn plain(db_type: SqlDbType) -> Self {
        debug_assert!(!db_type.is_user_defined());
        SqlTypePair {
            db_type,
            udt_type_name: None,
        }
    }

    /// A user-defined type addressed by its registered name
    pub fn udt(name: impl Into<String>) -> Self {
        SqlTypePair {
            db_type: SqlDbType::Udt,
            udt_type_name: Some(name.into()),
        }
    }

    pub fn db_type(&self) -> SqlDbType {
        self.db_type
    }

    pub fn udt_type_name(&self) -> Option<&str> {
        self.udt_type_name.as_deref()
    }
}

/// Rewrite a resolved (type, size) for engines that cannot represent it.
///
/// Compact Edition caps nvarchar/varchar at 4000 characters; anything longer
/// becomes the large-text type with no size. Idempotent: ntext is not a
/// variable character type, so a second pass leaves the result unchanged.
pub fn apply_engine_quirks(
    engine: SqlEngine,
    db_type: SqlDbType,
    size: Option<i32>,
) -> (SqlDbType, Option<i32>) {
    if engine.requires_large_text_rewrite()
        && db_type.is_variable_character()
        && size.is_some_and(|s| s > 4000)
    {
        return (SqlDbType::NText, None);
    }
    (db_type, size)
}
