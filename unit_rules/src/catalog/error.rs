//! Catalog errors.

use thiserror::Error;

use crate::entities::UnitTypeId;

/// Errors raised while assembling a unit-type catalog.
///
/// All of these are definition errors: the catalog is unusable and any
/// build depending on it must abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate unit type id {0}")]
    DuplicateId(UnitTypeId),

    #[error("duplicate unit type name '{0}'")]
    DuplicateName(String),

    #[error("unit type '{referenced_by}' references unknown unit type '{name}'")]
    UnknownUnitType { referenced_by: String, name: String },

    #[error("unknown unit type id {0}")]
    UnknownUnitId(UnitTypeId),
}
