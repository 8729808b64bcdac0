//! Target database engine selection
//!
//! Engines are ordered by feature capability so feature checks are ordering
//! comparisons instead of per-engine branches scattered through resolvers.

/// Target SQL Server variant, ordered by capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SqlEngine {
    CompactEdition,
    Server2005,
    Server2008,
    Server2012,
}

impl SqlEngine {
    /// Time columns and the spatial/hierarchy UDTs exist from 2008 onward
    pub fn supports_udt_extensions(self) -> bool {
        self >= SqlEngine::Server2008
    }

    /// Compact Edition caps character columns at 4000; longer text must be
    /// stored in the large-text type instead
    pub fn requires_large_text_rewrite(self) -> bool {
        self == SqlEngine::CompactEdition
    }
}
