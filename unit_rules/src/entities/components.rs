//! Attribute and capability components of a unit type.

use serde::{Deserialize, Serialize};

/// Numeric attributes of a unit type.
///
/// Defaults follow the reference game engine: one point of cost, hit points
/// and damage, melee range, ten ticks for every timed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnitAttributes {
    pub cost: i32,
    pub hp: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub attack_range: i32,
    pub produce_time: i32,
    pub move_time: i32,
    pub attack_time: i32,
    pub harvest_time: i32,
    pub return_time: i32,
    /// Resources gathered by a single harvest action.
    pub harvest_amount: i32,
    /// Sight radius for partially observable games. Not rated.
    pub sight_radius: i32,
}

impl Default for UnitAttributes {
    fn default() -> Self {
        Self {
            cost: 1,
            hp: 1,
            min_damage: 1,
            max_damage: 1,
            attack_range: 1,
            produce_time: 10,
            move_time: 10,
            attack_time: 10,
            harvest_time: 10,
            return_time: 10,
            harvest_amount: 1,
            sight_radius: 4,
        }
    }
}

/// Boolean capability flags of a unit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capabilities {
    /// Can this unit type be harvested?
    pub is_resource: bool,
    /// Can resources be returned to this unit type?
    pub is_stockpile: bool,
    pub can_harvest: bool,
    pub can_move: bool,
    pub can_attack: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            is_resource: false,
            is_stockpile: false,
            can_harvest: false,
            can_move: true,
            can_attack: true,
        }
    }
}

impl Capabilities {
    /// Capabilities of an inert resource field.
    pub fn resource() -> Self {
        Self {
            is_resource: true,
            can_move: false,
            can_attack: false,
            ..Self::default()
        }
    }

    /// Capabilities of an immobile structure that cannot fight.
    pub fn structure() -> Self {
        Self {
            can_move: false,
            can_attack: false,
            ..Self::default()
        }
    }

    /// Capabilities of a mobile unit that gathers resources and fights.
    pub fn worker() -> Self {
        Self {
            can_harvest: true,
            ..Self::default()
        }
    }

    /// Attacks without being able to harvest.
    pub fn is_attacker(&self) -> bool {
        self.can_attack && !self.can_harvest
    }
}
