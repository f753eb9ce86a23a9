//! Unit-type definitions for the catalog.

mod components;
mod unit_type;

pub use components::*;
pub use unit_type::*;

use serde::{Deserialize, Serialize};

/// Unique identifier for unit types.
///
/// Identifiers are small non-negative integers assigned by the catalog
/// source; they are stable across builds and appear verbatim in node
/// identifiers (`unit/<id>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitTypeId(pub u32);

impl UnitTypeId {
    /// Create a unit type ID from its raw value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for UnitTypeId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for UnitTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
