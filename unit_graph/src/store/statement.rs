//! Statement definitions - subject, predicate, object facts in the graph.

use serde::{Deserialize, Serialize};
use unit_rules::NumericField;

use super::NodeId;

/// Predicates used by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    Type,
    Label,

    // Capabilities
    Does,
    DoneBy,
    Targets,
    TargetedBy,
    Creates,
    CreatedBy,
    Produces,
    ProducedBy,
    IsResource,
    IsStockpile,

    // Ratings
    Has(NumericField),
    Ranks,
    RankedBy,
    Tier,
    Describes,
    DescribedBy,

    // Catalog root
    Includes,
    IncludedBy,

    // Preferences
    Prefers,
    Action,
    Reference,
    Relation,
    Comparison,
    Fraction,
    Weight,
    ReverseWeight,

    // Aims
    AimsAt,
    Priority,
    Target,
    Range,
    GuardStatistic,
    GuardLevel,
}

impl Predicate {
    /// Local name of the predicate.
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::Type => "type",
            Predicate::Label => "label",
            Predicate::Does => "does",
            Predicate::DoneBy => "doneBy",
            Predicate::Targets => "targets",
            Predicate::TargetedBy => "targetedBy",
            Predicate::Creates => "creates",
            Predicate::CreatedBy => "createdBy",
            Predicate::Produces => "produces",
            Predicate::ProducedBy => "producedBy",
            Predicate::IsResource => "isResource",
            Predicate::IsStockpile => "isStockpile",
            Predicate::Has(field) => field.has_predicate(),
            Predicate::Ranks => "ranks",
            Predicate::RankedBy => "rankedBy",
            Predicate::Tier => "tier",
            Predicate::Describes => "describes",
            Predicate::DescribedBy => "describedBy",
            Predicate::Includes => "includes",
            Predicate::IncludedBy => "includedBy",
            Predicate::Prefers => "prefers",
            Predicate::Action => "action",
            Predicate::Reference => "reference",
            Predicate::Relation => "relation",
            Predicate::Comparison => "comparison",
            Predicate::Fraction => "fraction",
            Predicate::Weight => "weight",
            Predicate::ReverseWeight => "reverseWeight",
            Predicate::AimsAt => "aimsAt",
            Predicate::Priority => "priority",
            Predicate::Target => "target",
            Predicate::Range => "range",
            Predicate::GuardStatistic => "guardStatistic",
            Predicate::GuardLevel => "guardLevel",
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A literal value attached directly to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int(v)
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::Int(i64::from(v))
    }
}

impl From<u32> for Literal {
    fn from(v: u32) -> Self {
        Literal::Int(i64::from(v))
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Float(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::Text(v.to_string())
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Literal::Text(v)
    }
}

/// Object position of a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Object {
    Node(NodeId),
    Literal(Literal),
}

impl Object {
    /// The node, if this object is one.
    pub fn as_node(&self) -> Option<&NodeId> {
        match self {
            Object::Node(id) => Some(id),
            Object::Literal(_) => None,
        }
    }

    /// The literal, if this object is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Object::Literal(lit) => Some(lit),
            Object::Node(_) => None,
        }
    }
}

/// A single fact in the compiled graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub subject: NodeId,
    pub predicate: Predicate,
    pub object: Object,
}

impl Statement {
    /// Create a statement linking two nodes.
    pub fn link(subject: NodeId, predicate: Predicate, object: NodeId) -> Self {
        Self {
            subject,
            predicate,
            object: Object::Node(object),
        }
    }

    /// Create a statement attaching a literal to a node.
    pub fn literal(subject: NodeId, predicate: Predicate, value: impl Into<Literal>) -> Self {
        Self {
            subject,
            predicate,
            object: Object::Literal(value.into()),
        }
    }

    /// Check whether this statement links `subject` to `object` via `predicate`.
    pub fn links(&self, subject: &NodeId, predicate: Predicate, object: &NodeId) -> bool {
        self.subject == *subject && self.predicate == predicate && self.object.as_node() == Some(object)
    }
}
