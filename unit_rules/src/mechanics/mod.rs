//! Game mechanics: the closed action catalog and the rated numeric fields.

use serde::{Deserialize, Serialize};

use crate::entities::UnitTypeRecord;

/// The fixed set of actions a unit type may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    /// Idle for a tick. Every unit type can do this.
    None,
    Move,
    Harvest,
    /// Bring harvested resources back to a stockpile.
    Return,
    Produce,
    Attack,
}

impl ActionKind {
    /// All action kinds in catalog order.
    pub const ALL: [ActionKind; 6] = [
        ActionKind::None,
        ActionKind::Move,
        ActionKind::Harvest,
        ActionKind::Return,
        ActionKind::Produce,
        ActionKind::Attack,
    ];

    /// Display name, also used as the node identifier suffix.
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::None => "None",
            ActionKind::Move => "Move",
            ActionKind::Harvest => "Harvest",
            ActionKind::Return => "Return",
            ActionKind::Produce => "Produce",
            ActionKind::Attack => "Attack",
        }
    }

    /// Numeric action code used by the game engine.
    pub fn code(&self) -> u8 {
        match self {
            ActionKind::None => 0,
            ActionKind::Move => 1,
            ActionKind::Harvest => 2,
            ActionKind::Return => 3,
            ActionKind::Produce => 4,
            ActionKind::Attack => 5,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric attributes that are rated against the catalog population.
///
/// Each field knows how to read itself from a record, which capability it
/// depends on, whether higher values are better, and which action it
/// describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericField {
    Cost,
    Hp,
    MinDamage,
    MaxDamage,
    AttackRange,
    ProduceTime,
    MoveTime,
    AttackTime,
    HarvestTime,
    ReturnTime,
    HarvestAmount,
}

impl NumericField {
    /// All rated fields in rating order.
    pub const ALL: [NumericField; 11] = [
        NumericField::Cost,
        NumericField::Hp,
        NumericField::MinDamage,
        NumericField::MaxDamage,
        NumericField::AttackRange,
        NumericField::ProduceTime,
        NumericField::MoveTime,
        NumericField::AttackTime,
        NumericField::HarvestTime,
        NumericField::ReturnTime,
        NumericField::HarvestAmount,
    ];

    /// Field name as it appears in definitions.
    pub fn name(&self) -> &'static str {
        match self {
            NumericField::Cost => "cost",
            NumericField::Hp => "hp",
            NumericField::MinDamage => "minDamage",
            NumericField::MaxDamage => "maxDamage",
            NumericField::AttackRange => "attackRange",
            NumericField::ProduceTime => "produceTime",
            NumericField::MoveTime => "moveTime",
            NumericField::AttackTime => "attackTime",
            NumericField::HarvestTime => "harvestTime",
            NumericField::ReturnTime => "returnTime",
            NumericField::HarvestAmount => "harvestAmount",
        }
    }

    /// Look up a field by its definition name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Read this field from a record.
    pub fn value(&self, record: &UnitTypeRecord) -> i32 {
        let a = &record.attributes;
        match self {
            NumericField::Cost => a.cost,
            NumericField::Hp => a.hp,
            NumericField::MinDamage => a.min_damage,
            NumericField::MaxDamage => a.max_damage,
            NumericField::AttackRange => a.attack_range,
            NumericField::ProduceTime => a.produce_time,
            NumericField::MoveTime => a.move_time,
            NumericField::AttackTime => a.attack_time,
            NumericField::HarvestTime => a.harvest_time,
            NumericField::ReturnTime => a.return_time,
            NumericField::HarvestAmount => a.harvest_amount,
        }
    }

    /// Whether this field means anything for the given record.
    pub fn applies_to(&self, record: &UnitTypeRecord) -> bool {
        let caps = &record.capabilities;
        match self {
            NumericField::MinDamage
            | NumericField::MaxDamage
            | NumericField::AttackRange
            | NumericField::AttackTime => caps.can_attack,
            NumericField::MoveTime => caps.can_move,
            NumericField::HarvestTime | NumericField::ReturnTime | NumericField::HarvestAmount => {
                caps.can_harvest
            }
            NumericField::Cost | NumericField::Hp | NumericField::ProduceTime => true,
        }
    }

    /// Higher is better for ascending fields; lower is better otherwise.
    pub fn is_ascending(&self) -> bool {
        !matches!(
            self,
            NumericField::Cost
                | NumericField::ProduceTime
                | NumericField::MoveTime
                | NumericField::AttackTime
                | NumericField::HarvestTime
                | NumericField::ReturnTime
        )
    }

    /// The action this field is most associated with.
    pub fn described_action(&self) -> Option<ActionKind> {
        match self {
            NumericField::Cost | NumericField::ProduceTime => Some(ActionKind::Produce),
            NumericField::MinDamage
            | NumericField::MaxDamage
            | NumericField::AttackRange
            | NumericField::AttackTime => Some(ActionKind::Attack),
            NumericField::MoveTime => Some(ActionKind::Move),
            NumericField::HarvestTime | NumericField::HarvestAmount => Some(ActionKind::Harvest),
            NumericField::ReturnTime => Some(ActionKind::Return),
            NumericField::Hp => None,
        }
    }

    /// Name of the literal predicate carrying the raw value, e.g. `hasMinDamage`.
    pub fn has_predicate(&self) -> &'static str {
        match self {
            NumericField::Cost => "hasCost",
            NumericField::Hp => "hasHp",
            NumericField::MinDamage => "hasMinDamage",
            NumericField::MaxDamage => "hasMaxDamage",
            NumericField::AttackRange => "hasAttackRange",
            NumericField::ProduceTime => "hasProduceTime",
            NumericField::MoveTime => "hasMoveTime",
            NumericField::AttackTime => "hasAttackTime",
            NumericField::HarvestTime => "hasHarvestTime",
            NumericField::ReturnTime => "hasReturnTime",
            NumericField::HarvestAmount => "hasHarvestAmount",
        }
    }
}

impl std::fmt::Display for NumericField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
