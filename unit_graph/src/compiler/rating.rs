//! Population-relative rating of numeric fields.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::trace;

use unit_rules::{FieldStats, NumericField, PopulationStats, UnitTypeRecord};

use crate::error::GraphError;
use crate::store::{Literal, NodeClass, NodeId, Predicate, StatementSink};

/// Three-tier rating of a value relative to the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RatingTier {
    Bad,
    Medium,
    Good,
}

impl RatingTier {
    /// All tiers from worst to best.
    pub const ALL: [RatingTier; 3] = [RatingTier::Bad, RatingTier::Medium, RatingTier::Good];

    /// Display name, also used in node identifiers.
    pub fn name(&self) -> &'static str {
        match self {
            RatingTier::Bad => "Bad",
            RatingTier::Medium => "Medium",
            RatingTier::Good => "Good",
        }
    }
}

impl std::fmt::Display for RatingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rate a value against population bounds.
///
/// With `band = (max - min) / 3`, values below `min + band` fall in the
/// low tier and values above `max - 2 * band` in the high tier; anything
/// else is Medium. For descending fields the low tier is Good and the high
/// tier is Bad. A degenerate population (`min == max`) is always Medium.
pub fn rate(value: i32, stats: FieldStats, ascending: bool) -> RatingTier {
    if stats.is_degenerate() {
        return RatingTier::Medium;
    }

    let min = f64::from(stats.min);
    let max = f64::from(stats.max);
    let value = f64::from(value);
    let band = (max - min) / 3.0;

    let (low, high) = if ascending {
        (RatingTier::Bad, RatingTier::Good)
    } else {
        (RatingTier::Good, RatingTier::Bad)
    };

    if value < min + band {
        low
    } else if value > max - 2.0 * band {
        high
    } else {
        RatingTier::Medium
    }
}

/// Rate one field of a record, or `None` if the field does not apply to it.
pub fn rate_field(
    field: NumericField,
    record: &UnitTypeRecord,
    population: &PopulationStats,
) -> Result<Option<RatingTier>, GraphError> {
    if !field.applies_to(record) {
        return Ok(None);
    }
    let stats = population
        .get(field)
        .ok_or(GraphError::MissingFieldStats(field))?;
    Ok(Some(rate(field.value(record), stats, field.is_ascending())))
}

/// Registry of rating nodes created during one build.
///
/// A rating node is keyed only by (field, tier) and is shared by every unit
/// type landing in that tier. The registry creates each node once and
/// describes it the first time it is seen.
#[derive(Debug, Clone, Default)]
pub struct RatingRegistry {
    registered: HashSet<NodeId>,
}

impl RatingRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the node for (field, tier), creating and describing it on first use.
    pub fn register<S: StatementSink>(
        &mut self,
        field: NumericField,
        tier: RatingTier,
        sink: &mut S,
    ) -> NodeId {
        let node = NodeId::rating(field, tier);
        if self.registered.insert(node.clone()) {
            sink.create_node(node.clone());
            sink.add_statement(&node, Predicate::Type, &NodeId::Class(NodeClass::Rating));
            sink.add_statement(&node, Predicate::Tier, &NodeId::Tier(tier));
            if let Some(action) = field.described_action() {
                sink.add_pair(
                    &node,
                    Predicate::Describes,
                    Predicate::DescribedBy,
                    &NodeId::action(action),
                );
            }
        }
        node
    }

    /// Number of rating nodes created so far.
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Check if no rating node has been created.
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}

/// Emit value literals and rank statements for every applicable field of a
/// record. Returns the number of fields ranked.
pub fn rate_attributes<S: StatementSink>(
    record: &UnitTypeRecord,
    population: &PopulationStats,
    registry: &mut RatingRegistry,
    sink: &mut S,
    emit_values: bool,
) -> Result<usize, GraphError> {
    let unit = NodeId::unit(record.id);
    let mut ranked = 0;

    for field in NumericField::ALL {
        let Some(tier) = rate_field(field, record, population)? else {
            trace!(unit = %record.name, field = %field, "field not applicable, skipping rating");
            continue;
        };

        if emit_values {
            sink.add_literal_statement(&unit, Predicate::Has(field), Literal::from(field.value(record)));
        }
        let rating = registry.register(field, tier, sink);
        sink.add_pair(&unit, Predicate::Ranks, Predicate::RankedBy, &rating);
        ranked += 1;
    }

    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GraphStore;
    use unit_rules::{ActionKind, Capabilities, UnitTypeTable};

    #[test]
    fn test_rate_ascending() {
        let stats = FieldStats::new(0, 9);
        assert_eq!(rate(0, stats, true), RatingTier::Bad);
        assert_eq!(rate(2, stats, true), RatingTier::Bad);
        assert_eq!(rate(3, stats, true), RatingTier::Medium);
        assert_eq!(rate(4, stats, true), RatingTier::Good);
        assert_eq!(rate(9, stats, true), RatingTier::Good);
    }

    #[test]
    fn test_rate_descending_inverts_tiers() {
        let stats = FieldStats::new(0, 9);
        assert_eq!(rate(0, stats, false), RatingTier::Good);
        assert_eq!(rate(3, stats, false), RatingTier::Medium);
        assert_eq!(rate(9, stats, false), RatingTier::Bad);
    }

    #[test]
    fn test_rate_degenerate_population_is_medium() {
        let stats = FieldStats::from_values([1, 1, 1]).unwrap();
        assert_eq!(rate(1, stats, true), RatingTier::Medium);
        assert_eq!(rate(1, stats, false), RatingTier::Medium);
    }

    #[test]
    fn test_rate_is_monotonic_for_ascending_fields() {
        let stats = FieldStats::new(-5, 20);
        let mut previous = RatingTier::Bad;
        for value in -5..=20 {
            let tier = rate(value, stats, true);
            assert!(tier >= previous, "tier dropped at value {}", value);
            previous = tier;
        }
    }

    #[test]
    fn test_rate_field_skips_inapplicable() {
        let table = UnitTypeTable::reference().unwrap();
        let population = table.population_stats();
        let resource = table.get_by_name("Resource").unwrap();

        assert_eq!(rate_field(NumericField::MinDamage, resource, &population).unwrap(), None);
        assert!(rate_field(NumericField::Hp, resource, &population).unwrap().is_some());
    }

    #[test]
    fn test_rate_field_missing_stats() {
        let record = UnitTypeRecord::new(0, "Lonely");
        let err = rate_field(NumericField::Cost, &record, &PopulationStats::default()).unwrap_err();
        assert!(matches!(err, GraphError::MissingFieldStats(NumericField::Cost)));
    }

    #[test]
    fn test_registry_creates_each_node_once() {
        let mut registry = RatingRegistry::new();
        let mut sink = GraphStore::new();

        let a = registry.register(NumericField::MinDamage, RatingTier::Good, &mut sink);
        let b = registry.register(NumericField::MinDamage, RatingTier::Good, &mut sink);

        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
        assert!(sink.has_node(&NodeId::rating(NumericField::MinDamage, RatingTier::Good)));
        assert!(!sink.has_node(&NodeId::rating(NumericField::MinDamage, RatingTier::Bad)));

        let attack = NodeId::action(ActionKind::Attack);
        assert_eq!(sink.count_statement(&a, Predicate::Describes, &attack), 1);
        assert_eq!(sink.count_statement(&attack, Predicate::DescribedBy, &a), 1);
        assert_eq!(sink.count_statement(&a, Predicate::Type, &NodeId::Class(NodeClass::Rating)), 1);
    }

    #[test]
    fn test_registry_hp_has_no_action() {
        let mut registry = RatingRegistry::new();
        let mut sink = GraphStore::new();

        let node = registry.register(NumericField::Hp, RatingTier::Bad, &mut sink);
        assert!(sink.objects(&node, Predicate::Describes).is_empty());
    }

    #[test]
    fn test_rate_attributes_for_resource() {
        let mut table = UnitTypeTable::new();
        table
            .add_unit_type(UnitTypeRecord::new(0, "Resource").with_capabilities(Capabilities::resource()))
            .unwrap();
        let population = table.population_stats();
        let resource = table.get(0.into()).unwrap();

        let mut registry = RatingRegistry::new();
        let mut sink = GraphStore::new();
        let ranked = rate_attributes(resource, &population, &mut registry, &mut sink, true).unwrap();

        // cost, hp, produceTime
        assert_eq!(ranked, 3);
        let unit = NodeId::unit(resource.id);
        let ranks = sink.objects(&unit, Predicate::Ranks);
        assert_eq!(
            ranks,
            vec![
                &NodeId::rating(NumericField::Cost, RatingTier::Medium),
                &NodeId::rating(NumericField::Hp, RatingTier::Medium),
                &NodeId::rating(NumericField::ProduceTime, RatingTier::Medium),
            ]
        );
        assert_eq!(sink.literal(&unit, Predicate::Has(NumericField::Cost)), Some(&Literal::Int(1)));
        assert!(sink.literal(&unit, Predicate::Has(NumericField::MinDamage)).is_none());
    }

    #[test]
    fn test_rate_attributes_without_values() {
        let table = UnitTypeTable::reference().unwrap();
        let population = table.population_stats();
        let worker = table.get_by_name("Worker").unwrap();

        let mut registry = RatingRegistry::new();
        let mut sink = GraphStore::new();
        let ranked = rate_attributes(worker, &population, &mut registry, &mut sink, false).unwrap();

        assert_eq!(ranked, NumericField::ALL.len());
        let unit = NodeId::unit(worker.id);
        assert!(sink.literal(&unit, Predicate::Has(NumericField::Cost)).is_none());
        assert_eq!(sink.objects(&unit, Predicate::Ranks).len(), ranked);
    }
}
