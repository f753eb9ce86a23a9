//! Catalog-specific tuning data for the preference rules.
//!
//! The generic rule table keys on capabilities and works for any catalog.
//! The data here is tied to concrete unit type IDs and has to be swapped
//! together with the catalog it was tuned for.

use serde::{Deserialize, Serialize};

use unit_rules::UnitTypeId;

use super::preference::{Comparison, Relation};
use crate::error::GraphError;

/// Tuning data for one catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogTuning {
    /// Unit type that harvesters keep a minimum density relative to.
    pub harvester_density_reference: Option<UnitTypeId>,

    /// Extra pairwise preferences per unit type.
    pub overrides: Vec<UnitOverride>,
}

/// Extra preferences layered on top of the generic rules for one unit type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitOverride {
    pub unit: UnitTypeId,
    #[serde(default)]
    pub rules: Vec<OverrideRule>,
}

/// A literal "prefers over/below" rule against a specific unit type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideRule {
    pub reference: UnitTypeId,
    #[serde(default = "default_override_relation")]
    pub relation: Relation,
    pub comparison: Comparison,
    pub fraction: f64,
    pub weight: f64,
    #[serde(default)]
    pub reverse_weight: f64,
}

fn default_override_relation() -> Relation {
    Relation::Enemy
}

impl OverrideRule {
    fn against(reference: u32, comparison: Comparison, fraction: f64, weight: f64) -> Self {
        Self {
            reference: UnitTypeId(reference),
            relation: Relation::Enemy,
            comparison,
            fraction,
            weight,
            reverse_weight: 0.0,
        }
    }
}

impl Default for CatalogTuning {
    fn default() -> Self {
        Self::reference()
    }
}

impl CatalogTuning {
    /// Tuning with no catalog-specific data at all.
    pub fn empty() -> Self {
        Self {
            harvester_density_reference: None,
            overrides: Vec::new(),
        }
    }

    /// Default tuning for the reference catalog.
    ///
    /// Harvesters keep their density relative to the Base (1). Light (4),
    /// Heavy (5) and Ranged (6) get one "over" and one "below" rule against
    /// the other two; the fractions and weights of those rules are
    /// placeholders to be replaced with the catalog's tuned values, usually
    /// through [`CatalogTuning::from_toml_str`].
    pub fn reference() -> Self {
        use Comparison::{Below, Over};

        Self {
            harvester_density_reference: Some(UnitTypeId(1)),
            overrides: vec![
                UnitOverride {
                    unit: UnitTypeId(4),
                    rules: vec![
                        OverrideRule::against(6, Over, 0.5, 1.5),
                        OverrideRule::against(5, Below, 0.3, 1.0),
                    ],
                },
                UnitOverride {
                    unit: UnitTypeId(5),
                    rules: vec![
                        OverrideRule::against(4, Over, 0.5, 2.0),
                        OverrideRule::against(6, Below, 0.4, 1.0),
                    ],
                },
                UnitOverride {
                    unit: UnitTypeId(6),
                    rules: vec![
                        OverrideRule::against(5, Over, 0.5, 1.5),
                        OverrideRule::against(4, Below, 0.3, 1.0),
                    ],
                },
            ],
        }
    }

    /// Parses tuning from a TOML string. Missing keys take the reference values.
    pub fn from_toml_str(content: &str) -> Result<Self, GraphError> {
        Ok(toml::from_str(content)?)
    }

    /// Override rules for a unit type, in declaration order.
    pub fn overrides_for(&self, unit: UnitTypeId) -> &[OverrideRule] {
        self.overrides
            .iter()
            .find(|o| o.unit == unit)
            .map(|o| o.rules.as_slice())
            .unwrap_or(&[])
    }
}
