//! Graph compilation errors.

use thiserror::Error;
use unit_rules::{CatalogError, NumericField, UnitTypeId};

/// Errors that abort a graph build. No partial graph is returned.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The catalog is malformed or a relation does not resolve.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A tuning rule names a unit type that is not in the catalog.
    #[error("tuning for unit type {unit} references unknown unit type {reference}")]
    UnknownTuningReference {
        unit: UnitTypeId,
        reference: UnitTypeId,
    },

    /// Population stats were supplied without an entry for a rated field.
    #[error("no population stats for field '{0}'")]
    MissingFieldStats(NumericField),

    /// The tuning table could not be parsed.
    #[error("invalid tuning table: {0}")]
    Tuning(#[from] toml::de::Error),
}
