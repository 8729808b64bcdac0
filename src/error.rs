//! Error types for schema-settings

use thiserror::Error;

/// Errors that can occur while resolving schema metadata
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Route of kind {kind} carries no field-level attributes")]
    UnsupportedRouteKind { kind: String },

    #[error("The following attributes are not compatible with target {target}: {names}")]
    IncompatibleAttribute { target: String, names: String },

    #[error("Attributes for route {route} are already overridden")]
    DuplicateOverride { route: String },

    #[error("{type_name} (route {route}) is not a persistent entity type")]
    NotAPersistentReference { route: String, type_name: String },

    #[error("Route {route} is not implemented by {type_name}")]
    ImplementationNotAllowed { route: String, type_name: String },

    #[error("Type {type_name} is marked as a user-defined type but has no registered UDT name")]
    UnregisteredUdtName { type_name: String },

    #[error("Type {type_name} has no schema representation registered")]
    UnmappedType { type_name: String },

    #[error("Route {route} has more than one unique index marker")]
    ConflictingIndexMarkers { route: String },

    #[error("Cannot {operation}: settings are frozen")]
    FrozenConfiguration { operation: String },
}
