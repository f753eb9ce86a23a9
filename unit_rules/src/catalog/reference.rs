//! The standard seven-type catalog of the reference game.

use super::{CatalogError, UnitTypeTable};
use crate::entities::{Capabilities, UnitAttributes, UnitTypeDefinition};

impl UnitTypeTable {
    /// The reference catalog: Resource, Base, Barracks, Worker, Light, Heavy
    /// and Ranged with IDs 0 through 6.
    pub fn reference() -> Result<Self, CatalogError> {
        Self::from_definitions(reference_definitions())
    }
}

/// Definitions of the reference catalog, in ID order.
pub fn reference_definitions() -> Vec<UnitTypeDefinition> {
    let base = UnitAttributes::default();
    vec![
        UnitTypeDefinition::new(0, "Resource").with_capabilities(Capabilities::resource()),
        UnitTypeDefinition::new(1, "Base")
            .with_attributes(UnitAttributes {
                cost: 10,
                hp: 10,
                produce_time: 250,
                sight_radius: 5,
                ..base
            })
            .with_capabilities(Capabilities {
                is_stockpile: true,
                ..Capabilities::structure()
            })
            .producing("Worker"),
        UnitTypeDefinition::new(2, "Barracks")
            .with_attributes(UnitAttributes {
                cost: 5,
                hp: 4,
                produce_time: 200,
                sight_radius: 3,
                ..base
            })
            .with_capabilities(Capabilities::structure())
            .producing("Light")
            .producing("Heavy")
            .producing("Ranged"),
        UnitTypeDefinition::new(3, "Worker")
            .with_attributes(UnitAttributes {
                produce_time: 50,
                attack_time: 5,
                harvest_time: 20,
                sight_radius: 3,
                ..base
            })
            .with_capabilities(Capabilities::worker())
            .producing("Base")
            .producing("Barracks"),
        UnitTypeDefinition::new(4, "Light")
            .with_attributes(UnitAttributes {
                cost: 2,
                hp: 4,
                min_damage: 2,
                max_damage: 2,
                produce_time: 80,
                move_time: 8,
                attack_time: 5,
                sight_radius: 2,
                ..base
            }),
        UnitTypeDefinition::new(5, "Heavy")
            .with_attributes(UnitAttributes {
                cost: 2,
                hp: 4,
                min_damage: 4,
                max_damage: 4,
                produce_time: 120,
                move_time: 12,
                attack_time: 5,
                sight_radius: 2,
                ..base
            }),
        UnitTypeDefinition::new(6, "Ranged")
            .with_attributes(UnitAttributes {
                cost: 2,
                hp: 1,
                attack_range: 3,
                produce_time: 100,
                attack_time: 5,
                sight_radius: 3,
                ..base
            }),
    ]
}
