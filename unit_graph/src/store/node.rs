//! Node identifiers - the subjects and objects of statements.

use serde::{Deserialize, Serialize};
use unit_rules::{ActionKind, NumericField, UnitTypeId};

use crate::compiler::RatingTier;

/// Class nodes that other nodes are typed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeClass {
    Unit,
    Action,
    Rating,
    Preference,
    Aim,
    Catalog,
}

impl NodeClass {
    fn category(&self) -> &'static str {
        match self {
            NodeClass::Unit => "unit",
            NodeClass::Action => "action",
            NodeClass::Rating => "rating",
            NodeClass::Preference => "preference",
            NodeClass::Aim => "aim",
            NodeClass::Catalog => "catalog",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            NodeClass::Unit => "Unit",
            NodeClass::Action => "Action",
            NodeClass::Rating => "Rating",
            NodeClass::Preference => "Preference",
            NodeClass::Aim => "Aim",
            NodeClass::Catalog => "Catalog",
        }
    }
}

/// Identifier of a node in the compiled graph.
///
/// The textual form is `<category>/<key>`, namespaced per entity kind so
/// consumers can predict identifiers without reading the graph:
/// `unit/3`, `action/Harvest`, `rating/hp/Good`, `preference/3/0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeId {
    /// A unit type, keyed by its catalog ID.
    Unit(UnitTypeId),

    /// One of the fixed action types.
    Action(ActionKind),

    /// A rating shared by every unit type in the same tier of a field.
    Rating {
        field: NumericField,
        tier: RatingTier,
    },

    /// A tier class (`rating/Good`).
    Tier(RatingTier),

    /// The n-th preference annotation emitted for a unit type.
    Preference { unit: UnitTypeId, index: u32 },

    /// The n-th aim annotation emitted for a unit type.
    Aim { unit: UnitTypeId, index: u32 },

    /// A class node (`unit/Unit`, `action/Action`, ...).
    Class(NodeClass),

    /// The single root that includes every unit and action type.
    CatalogRoot,
}

impl NodeId {
    /// Create a unit type node ID.
    pub fn unit(id: UnitTypeId) -> Self {
        NodeId::Unit(id)
    }

    /// Create an action type node ID.
    pub fn action(kind: ActionKind) -> Self {
        NodeId::Action(kind)
    }

    /// Create a rating node ID.
    pub fn rating(field: NumericField, tier: RatingTier) -> Self {
        NodeId::Rating { field, tier }
    }

    /// Convert the node ID to its textual identifier.
    pub fn as_string(&self) -> String {
        match self {
            NodeId::Unit(id) => format!("unit/{}", id),
            NodeId::Action(kind) => format!("action/{}", kind.name()),
            NodeId::Rating { field, tier } => format!("rating/{}/{}", field.name(), tier.name()),
            NodeId::Tier(tier) => format!("rating/{}", tier.name()),
            NodeId::Preference { unit, index } => format!("preference/{}/{}", unit, index),
            NodeId::Aim { unit, index } => format!("aim/{}/{}", unit, index),
            NodeId::Class(class) => format!("{}/{}", class.category(), class.name()),
            NodeId::CatalogRoot => "catalog/root".to_string(),
        }
    }

    /// Get the entity kind of this node, which is also its namespace.
    pub fn category(&self) -> &'static str {
        match self {
            NodeId::Unit(_) => "unit",
            NodeId::Action(_) => "action",
            NodeId::Rating { .. } | NodeId::Tier(_) => "rating",
            NodeId::Preference { .. } => "preference",
            NodeId::Aim { .. } => "aim",
            NodeId::Class(class) => class.category(),
            NodeId::CatalogRoot => "catalog",
        }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

/// Handle to a node created in a sink, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeHandle(pub usize);
