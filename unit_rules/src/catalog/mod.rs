//! The unit-type catalog - an immutable snapshot of every unit type in a game.

mod error;
mod reference;

pub use error::*;
pub use reference::reference_definitions;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::entities::{UnitTypeDefinition, UnitTypeId, UnitTypeRecord};
use crate::mechanics::NumericField;

/// Minimum and maximum of a numeric field over the whole population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStats {
    pub min: i32,
    pub max: i32,
}

impl FieldStats {
    /// Create stats from explicit bounds.
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Compute stats over a sequence of values. `None` if the sequence is empty.
    pub fn from_values(values: impl IntoIterator<Item = i32>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self::new(v, v)),
            Some(s) => Some(Self::new(s.min.min(v), s.max.max(v))),
        })
    }

    /// Width of the range.
    pub fn span(&self) -> i64 {
        i64::from(self.max) - i64::from(self.min)
    }

    /// Every member of the population has the same value.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

/// Per-field stats for an entire catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationStats {
    fields: BTreeMap<NumericField, FieldStats>,
}

impl PopulationStats {
    /// Stats for a field, if the population is non-empty.
    pub fn get(&self, field: NumericField) -> Option<FieldStats> {
        self.fields.get(&field).copied()
    }

    /// Override the stats of one field.
    pub fn insert(&mut self, field: NumericField, stats: FieldStats) {
        self.fields.insert(field, stats);
    }

    /// Iterate over all known field stats.
    pub fn iter(&self) -> impl Iterator<Item = (NumericField, FieldStats)> + '_ {
        self.fields.iter().map(|(f, s)| (*f, *s))
    }
}

/// The catalog of unit types.
///
/// Unit types keep their insertion order, which is the order the graph
/// compiler walks them in. Names and IDs are each unique.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnitTypeTable {
    units: Vec<UnitTypeRecord>,

    #[serde(skip)]
    index_by_id: HashMap<UnitTypeId, usize>,

    #[serde(skip)]
    id_by_name: HashMap<String, UnitTypeId>,
}

impl UnitTypeTable {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from external definitions.
    ///
    /// Stubs for every definition are registered first so relations may
    /// reference types defined later in the list. Relations listed on
    /// either side are mirrored.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = UnitTypeDefinition>,
    ) -> Result<Self, CatalogError> {
        let definitions: Vec<_> = definitions.into_iter().collect();
        let mut table = Self::new();

        for def in &definitions {
            let record = UnitTypeRecord::new(def.id, def.name.clone())
                .with_attributes(def.attributes)
                .with_capabilities(def.capabilities);
            table.add_unit_type(record)?;
        }

        for def in &definitions {
            for name in &def.produces {
                let product = table.resolve_name(&def.name, name)?;
                table.add_production(def.id, product)?;
            }
            for name in &def.produced_by {
                let producer = table.resolve_name(&def.name, name)?;
                table.add_production(producer, def.id)?;
            }
        }

        Ok(table)
    }

    /// Add a unit type to the catalog.
    ///
    /// Any relations already on the record must point at unit types that
    /// are in the catalog; they are mirrored onto the other side.
    pub fn add_unit_type(&mut self, mut record: UnitTypeRecord) -> Result<UnitTypeId, CatalogError> {
        if self.index_by_id.contains_key(&record.id) {
            return Err(CatalogError::DuplicateId(record.id));
        }
        if self.id_by_name.contains_key(&record.name) {
            return Err(CatalogError::DuplicateName(record.name));
        }

        let id = record.id;
        let produces = std::mem::take(&mut record.produces);
        let produced_by = std::mem::take(&mut record.produced_by);
        for other in produces.iter().chain(produced_by.iter()) {
            if *other != id && !self.index_by_id.contains_key(other) {
                return Err(CatalogError::UnknownUnitId(*other));
            }
        }

        self.index_by_id.insert(id, self.units.len());
        self.id_by_name.insert(record.name.clone(), id);
        self.units.push(record);

        for product in produces {
            self.add_production(id, product)?;
        }
        for producer in produced_by {
            self.add_production(producer, id)?;
        }
        Ok(id)
    }

    /// Record that `producer` can produce `product`, mirroring the relation.
    pub fn add_production(
        &mut self,
        producer: UnitTypeId,
        product: UnitTypeId,
    ) -> Result<(), CatalogError> {
        let producer_idx = self.index_of(producer)?;
        let product_idx = self.index_of(product)?;

        let producer_record = &mut self.units[producer_idx];
        if !producer_record.produces.contains(&product) {
            producer_record.produces.push(product);
        }
        let product_record = &mut self.units[product_idx];
        if !product_record.produced_by.contains(&producer) {
            product_record.produced_by.push(producer);
        }
        Ok(())
    }

    /// Get a unit type by ID.
    pub fn get(&self, id: UnitTypeId) -> Option<&UnitTypeRecord> {
        self.index_by_id.get(&id).map(|idx| &self.units[*idx])
    }

    /// Get a unit type by ID, failing with a definition error if missing.
    pub fn require(&self, id: UnitTypeId) -> Result<&UnitTypeRecord, CatalogError> {
        self.get(id).ok_or(CatalogError::UnknownUnitId(id))
    }

    /// Get a unit type by name.
    pub fn get_by_name(&self, name: &str) -> Option<&UnitTypeRecord> {
        self.id_by_name.get(name).and_then(|id| self.get(*id))
    }

    /// Iterate over all unit types in catalog order.
    pub fn unit_types(&self) -> impl Iterator<Item = &UnitTypeRecord> {
        self.units.iter()
    }

    /// Unit types matching a predicate, in catalog order.
    pub fn find<F>(&self, predicate: F) -> Vec<&UnitTypeRecord>
    where
        F: Fn(&UnitTypeRecord) -> bool,
    {
        self.units.iter().filter(|u| predicate(u)).collect()
    }

    /// Number of unit types.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Stats of one field over every unit type in the catalog.
    pub fn field_stats(&self, field: NumericField) -> Option<FieldStats> {
        FieldStats::from_values(self.units.iter().map(|u| field.value(u)))
    }

    /// Stats of every rated field over the catalog.
    pub fn population_stats(&self) -> PopulationStats {
        let mut stats = PopulationStats::default();
        for field in NumericField::ALL {
            if let Some(s) = self.field_stats(field) {
                stats.insert(field, s);
            }
        }
        stats
    }

    fn index_of(&self, id: UnitTypeId) -> Result<usize, CatalogError> {
        self.index_by_id
            .get(&id)
            .copied()
            .ok_or(CatalogError::UnknownUnitId(id))
    }

    fn resolve_name(&self, referenced_by: &str, name: &str) -> Result<UnitTypeId, CatalogError> {
        self.id_by_name
            .get(name)
            .copied()
            .ok_or_else(|| CatalogError::UnknownUnitType {
                referenced_by: referenced_by.to_string(),
                name: name.to_string(),
            })
    }
}
