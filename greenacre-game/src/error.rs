//! Typed engine errors.
//!
//! The engine favors total functions; these errors cover the two
//! programming-error classes the core can still surface: catalog lookups
//! with an id the catalog has never heard of, and invariant violations on
//! state supplied by the host shell.

use thiserror::Error;

/// Errors raised by core engine queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// An item id was not present in the catalog. The catalog is immutable
    /// and validated at startup, so hitting this at runtime means the
    /// caller fabricated or corrupted an id.
    #[error("unknown item id '{item_id}' in catalog lookup")]
    CatalogLookup { item_id: String },

    /// A state invariant was violated, e.g. cow happiness outside [0, 1].
    #[error("invariant violated: {what} (got {value})")]
    InvariantViolation { what: &'static str, value: String },
}

impl EngineError {
    /// Shorthand constructor for catalog lookup failures.
    #[must_use]
    pub fn catalog_lookup(item_id: &str) -> Self {
        Self::CatalogLookup {
            item_id: item_id.to_string(),
        }
    }
}
