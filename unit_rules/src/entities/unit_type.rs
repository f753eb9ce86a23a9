//! Unit type records and their external definition shape.

use serde::{Deserialize, Serialize};

use super::{Capabilities, UnitAttributes, UnitTypeId};

/// A fully resolved unit type in the catalog.
///
/// Records are built once by [`crate::UnitTypeTable`] and never mutated
/// afterwards. The `produces` and `produced_by` lists are kept mirrored by
/// the table: if A produces B, then B is produced by A.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitTypeRecord {
    #[serde(rename = "ID")]
    pub id: UnitTypeId,
    pub name: String,
    #[serde(flatten)]
    pub attributes: UnitAttributes,
    #[serde(flatten)]
    pub capabilities: Capabilities,
    /// Unit types this type can produce.
    pub produces: Vec<UnitTypeId>,
    /// Unit types that can produce this type.
    pub produced_by: Vec<UnitTypeId>,
}

impl UnitTypeRecord {
    /// Create a new record with default attributes and capabilities.
    pub fn new(id: impl Into<UnitTypeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: UnitAttributes::default(),
            capabilities: Capabilities::default(),
            produces: Vec::new(),
            produced_by: Vec::new(),
        }
    }

    /// Set the numeric attributes.
    pub fn with_attributes(mut self, attributes: UnitAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the capability flags.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Check whether this type produces the given type.
    pub fn can_produce(&self, other: UnitTypeId) -> bool {
        self.produces.contains(&other)
    }

    /// Check whether this type is produced by anything.
    pub fn is_produced(&self) -> bool {
        !self.produced_by.is_empty()
    }
}

/// A unit type as supplied by an external definition source.
///
/// Production relations reference other unit types by name; they are
/// resolved when the definitions are loaded into a [`crate::UnitTypeTable`].
/// Either side of a relation may be listed; the table mirrors them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitTypeDefinition {
    #[serde(rename = "ID")]
    pub id: UnitTypeId,
    pub name: String,
    #[serde(flatten)]
    pub attributes: UnitAttributes,
    #[serde(flatten)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub produces: Vec<String>,
    #[serde(default)]
    pub produced_by: Vec<String>,
}

impl UnitTypeDefinition {
    /// Create a new definition with default attributes and no relations.
    pub fn new(id: impl Into<UnitTypeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: UnitAttributes::default(),
            capabilities: Capabilities::default(),
            produces: Vec::new(),
            produced_by: Vec::new(),
        }
    }

    /// Set the numeric attributes.
    pub fn with_attributes(mut self, attributes: UnitAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the capability flags.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Add a unit type (by name) that this type produces.
    pub fn producing(mut self, name: impl Into<String>) -> Self {
        self.produces.push(name.into());
        self
    }

    /// Add a unit type (by name) that produces this type.
    pub fn produced_by(mut self, name: impl Into<String>) -> Self {
        self.produced_by.push(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let record = UnitTypeRecord::new(3, "Worker").with_capabilities(Capabilities::worker());
        assert_eq!(record.id, UnitTypeId(3));
        assert_eq!(record.name, "Worker");
        assert!(record.capabilities.can_harvest);
        assert!(!record.is_produced());
    }

    #[test]
    fn test_definition_builder() {
        let def = UnitTypeDefinition::new(1, "Base")
            .with_capabilities(Capabilities::structure())
            .producing("Worker");
        assert_eq!(def.produces, vec!["Worker".to_string()]);
        assert!(def.produced_by.is_empty());
    }

    #[test]
    fn test_definition_from_json() {
        let json = r#"{
            "ID": 3,
            "name": "Worker",
            "cost": 1,
            "hp": 1,
            "harvestAmount": 1,
            "canHarvest": true,
            "canMove": true,
            "canAttack": true,
            "producedBy": ["Base"]
        }"#;
        let def: UnitTypeDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.id, UnitTypeId(3));
        assert!(def.capabilities.can_harvest);
        assert_eq!(def.produced_by, vec!["Base".to_string()]);
        assert!(def.produces.is_empty());
        assert_eq!(def.attributes.move_time, 10);
    }

    #[test]
    fn test_definition_requires_name() {
        let result: Result<UnitTypeDefinition, _> = serde_json::from_str(r#"{"ID": 3}"#);
        assert!(result.is_err());
    }
}
