//! Heuristic preference and aim annotations.
//!
//! A static table maps capability categories to rule templates. For each
//! unit type the compiler walks the categories in order, instantiates the
//! templates of every category the unit falls into, then appends the
//! catalog-specific overrides from [`CatalogTuning`]. There is no other
//! logic: the weights are hand-authored data.

use serde::{Deserialize, Serialize};

use unit_rules::{ActionKind, UnitTypeId, UnitTypeRecord, UnitTypeTable};

use super::tuning::CatalogTuning;
use crate::error::GraphError;
use crate::store::{Literal, NodeClass, NodeId, Predicate, StatementSink};

/// Which units a preference or aim is about, relative to the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// The subject unit itself.
    #[serde(rename = "self")]
    Itself,
    Ally,
    Enemy,
    Friendly,
    Neutral,
    /// Whatever the subject is currently targeting.
    Target,
}

impl Relation {
    /// Tag used in the graph.
    pub fn tag(&self) -> &'static str {
        match self {
            Relation::Itself => "self",
            Relation::Ally => "ally",
            Relation::Enemy => "enemy",
            Relation::Friendly => "friendly",
            Relation::Neutral => "neutral",
            Relation::Target => "target",
        }
    }
}

/// Direction of a density threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Over,
    Below,
}

impl Comparison {
    /// Tag used in the graph.
    pub fn tag(&self) -> &'static str {
        match self {
            Comparison::Over => "over",
            Comparison::Below => "below",
        }
    }
}

/// Statistic a guard condition looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardStatistic {
    /// Resources held by the player.
    Resources,
}

impl GuardStatistic {
    pub fn name(&self) -> &'static str {
        match self {
            GuardStatistic::Resources => "resources",
        }
    }
}

/// Qualitative threshold of a guard condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardLevel {
    Low,
    High,
}

impl GuardLevel {
    pub fn name(&self) -> &'static str {
        match self {
            GuardLevel::Low => "low",
            GuardLevel::High => "high",
        }
    }
}

/// Condition under which an aim applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guard {
    pub statistic: GuardStatistic,
    pub level: GuardLevel,
}

impl Guard {
    pub const fn resources(level: GuardLevel) -> Self {
        Self {
            statistic: GuardStatistic::Resources,
            level,
        }
    }
}

/// A weighted "prefers" hint for one unit type.
///
/// With an action, the hint weighs that action against the relation class.
/// Without one, it is a density threshold: keep the share of `relation`
/// units (or of `reference` units, when given) over or below `fraction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceAnnotation {
    pub action: Option<ActionKind>,
    pub reference: Option<UnitTypeId>,
    pub relation: Relation,
    pub comparison: Option<Comparison>,
    pub fraction: f64,
    pub weight: f64,
    pub reverse_weight: f64,
}

/// A prioritized hint about where a unit type should direct attention.
/// Lower priorities are evaluated first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AimAnnotation {
    pub priority: u32,
    pub relation: Relation,
    pub weight: f64,
    pub target: Option<UnitTypeId>,
    pub range: Option<u32>,
    pub guard: Option<Guard>,
}

/// One instantiated rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Annotation {
    Prefers(PreferenceAnnotation),
    Aims(AimAnnotation),
}

/// Capability combinations that select rule templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Harvester,
    HarvesterProducer,
    AttackerProducer,
    Attacker,
    RangedAttacker,
    NonHarvestingAttacker,
    HarvestingAttacker,
}

impl Category {
    /// All categories in application order.
    pub const ALL: [Category; 7] = [
        Category::Harvester,
        Category::HarvesterProducer,
        Category::AttackerProducer,
        Category::Attacker,
        Category::RangedAttacker,
        Category::NonHarvestingAttacker,
        Category::HarvestingAttacker,
    ];

    /// Check whether a unit type falls into this category.
    pub fn matches(&self, record: &UnitTypeRecord, table: &UnitTypeTable) -> Result<bool, GraphError> {
        let caps = &record.capabilities;
        Ok(match self {
            Category::Harvester => caps.can_harvest,
            Category::HarvesterProducer => {
                produces_any(record, table, |u| u.capabilities.can_harvest)?
            }
            Category::AttackerProducer => {
                produces_any(record, table, |u| u.capabilities.is_attacker())?
            }
            Category::Attacker => caps.can_attack,
            Category::RangedAttacker => caps.can_attack && record.attributes.attack_range > 1,
            Category::NonHarvestingAttacker => caps.can_attack && !caps.can_harvest,
            Category::HarvestingAttacker => caps.can_attack && caps.can_harvest,
        })
    }

    fn rules(&self) -> &'static [RuleTemplate] {
        match self {
            Category::Harvester => HARVESTER_RULES,
            Category::HarvesterProducer => HARVESTER_PRODUCER_RULES,
            Category::AttackerProducer => ATTACKER_PRODUCER_RULES,
            Category::Attacker => ATTACKER_RULES,
            Category::RangedAttacker => RANGED_ATTACKER_RULES,
            Category::NonHarvestingAttacker => NON_HARVESTING_ATTACKER_RULES,
            Category::HarvestingAttacker => HARVESTING_ATTACKER_RULES,
        }
    }
}

fn produces_any<F>(record: &UnitTypeRecord, table: &UnitTypeTable, predicate: F) -> Result<bool, GraphError>
where
    F: Fn(&UnitTypeRecord) -> bool,
{
    for id in &record.produces {
        if predicate(table.require(*id)?) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Reference unit of a preference template.
#[derive(Debug, Clone, Copy)]
enum ReferenceSpec {
    /// No reference unit: any unit of the relation class.
    Any,
    /// The subject unit type.
    Subject,
    /// One annotation per unit type the subject produces.
    Products,
    /// The tuning's harvester density reference; skipped when unset.
    HarvesterDensity,
}

/// Target of an aim template.
#[derive(Debug, Clone, Copy)]
enum TargetSpec {
    Any,
    Resources,
    Harvesters,
    Stockpiles,
}

impl TargetSpec {
    fn matches(&self, record: &UnitTypeRecord) -> bool {
        let caps = &record.capabilities;
        match self {
            TargetSpec::Any => true,
            TargetSpec::Resources => caps.is_resource,
            TargetSpec::Harvesters => caps.can_harvest,
            TargetSpec::Stockpiles => caps.is_stockpile,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RuleTemplate {
    Prefers {
        action: Option<ActionKind>,
        reference: ReferenceSpec,
        relation: Relation,
        comparison: Option<Comparison>,
        fraction: f64,
        weight: f64,
        reverse_weight: f64,
    },
    Aims {
        priority: u32,
        relation: Relation,
        weight: f64,
        target: TargetSpec,
        range: Option<u32>,
        guard: Option<Guard>,
    },
}

const fn act(action: ActionKind, relation: Relation, weight: f64) -> RuleTemplate {
    RuleTemplate::Prefers {
        action: Some(action),
        reference: ReferenceSpec::Any,
        relation,
        comparison: None,
        fraction: 0.0,
        weight,
        reverse_weight: 0.0,
    }
}

const fn density(
    reference: ReferenceSpec,
    relation: Relation,
    comparison: Comparison,
    fraction: f64,
    weight: f64,
    reverse_weight: f64,
) -> RuleTemplate {
    RuleTemplate::Prefers {
        action: None,
        reference,
        relation,
        comparison: Some(comparison),
        fraction,
        weight,
        reverse_weight,
    }
}

const fn aim(
    priority: u32,
    relation: Relation,
    weight: f64,
    target: TargetSpec,
    range: Option<u32>,
    guard: Option<Guard>,
) -> RuleTemplate {
    RuleTemplate::Aims {
        priority,
        relation,
        weight,
        target,
        range,
        guard,
    }
}

const LOW_RESOURCES: Option<Guard> = Some(Guard::resources(GuardLevel::Low));
const HIGH_RESOURCES: Option<Guard> = Some(Guard::resources(GuardLevel::High));

const HARVESTER_RULES: &[RuleTemplate] = &[
    act(ActionKind::Harvest, Relation::Itself, 0.2),
    act(ActionKind::Attack, Relation::Target, 1.0),
    aim(0, Relation::Neutral, 5.0, TargetSpec::Resources, Some(3), LOW_RESOURCES),
    aim(1, Relation::Friendly, 2.0, TargetSpec::Harvesters, Some(2), LOW_RESOURCES),
    aim(0, Relation::Friendly, 5.0, TargetSpec::Stockpiles, Some(4), HIGH_RESOURCES),
    density(ReferenceSpec::Any, Relation::Friendly, Comparison::Below, 0.5, 4.0, 1.0),
    density(ReferenceSpec::HarvesterDensity, Relation::Friendly, Comparison::Over, 0.01, 1.0, 6.0),
];

const HARVESTER_PRODUCER_RULES: &[RuleTemplate] = &[
    act(ActionKind::Produce, Relation::Itself, -3.0),
    aim(0, Relation::Neutral, 1.0, TargetSpec::Resources, None, None),
    density(ReferenceSpec::Subject, Relation::Itself, Comparison::Below, 0.0, 4.0, 3.0),
    act(ActionKind::Attack, Relation::Target, 2.0),
];

const ATTACKER_PRODUCER_RULES: &[RuleTemplate] = &[
    act(ActionKind::Produce, Relation::Itself, -3.0),
    aim(0, Relation::Enemy, 1.0, TargetSpec::Stockpiles, None, None),
    density(ReferenceSpec::Subject, Relation::Friendly, Comparison::Over, 0.1, 0.3, 0.0),
    density(ReferenceSpec::Products, Relation::Friendly, Comparison::Over, 0.1, 0.3, 0.0),
];

const ATTACKER_RULES: &[RuleTemplate] = &[act(ActionKind::Attack, Relation::Itself, 4.5)];

const RANGED_ATTACKER_RULES: &[RuleTemplate] = &[
    act(ActionKind::None, Relation::Itself, 0.2),
    act(ActionKind::Attack, Relation::Target, 1.0),
    aim(0, Relation::Enemy, 5.0, TargetSpec::Any, Some(5), None),
];

const NON_HARVESTING_ATTACKER_RULES: &[RuleTemplate] = &[
    aim(0, Relation::Enemy, 5.0, TargetSpec::Any, Some(4), None),
    aim(1, Relation::Enemy, 3.5, TargetSpec::Harvesters, None, None),
    aim(2, Relation::Enemy, 3.0, TargetSpec::Stockpiles, None, None),
    density(ReferenceSpec::Any, Relation::Friendly, Comparison::Over, 0.1, 0.5, 0.0),
];

const HARVESTING_ATTACKER_RULES: &[RuleTemplate] = &[
    aim(2, Relation::Enemy, 5.0, TargetSpec::Any, Some(4), None),
    aim(3, Relation::Enemy, 3.5, TargetSpec::Harvesters, None, None),
    aim(3, Relation::Enemy, 3.0, TargetSpec::Stockpiles, None, None),
];

/// Instantiate every matching rule for a unit type, in emission order.
pub fn preference_rules(
    record: &UnitTypeRecord,
    table: &UnitTypeTable,
    tuning: &CatalogTuning,
) -> Result<Vec<Annotation>, GraphError> {
    let mut annotations = Vec::new();

    for category in Category::ALL {
        if !category.matches(record, table)? {
            continue;
        }
        for template in category.rules() {
            instantiate(template, record, table, tuning, &mut annotations)?;
        }
    }

    for rule in tuning.overrides_for(record.id) {
        check_reference(record, table, rule.reference)?;
        annotations.push(Annotation::Prefers(PreferenceAnnotation {
            action: None,
            reference: Some(rule.reference),
            relation: rule.relation,
            comparison: Some(rule.comparison),
            fraction: rule.fraction,
            weight: rule.weight,
            reverse_weight: rule.reverse_weight,
        }));
    }

    Ok(annotations)
}

fn instantiate(
    template: &RuleTemplate,
    record: &UnitTypeRecord,
    table: &UnitTypeTable,
    tuning: &CatalogTuning,
    out: &mut Vec<Annotation>,
) -> Result<(), GraphError> {
    match *template {
        RuleTemplate::Prefers {
            action,
            reference,
            relation,
            comparison,
            fraction,
            weight,
            reverse_weight,
        } => {
            let references: Vec<Option<UnitTypeId>> = match reference {
                ReferenceSpec::Any => vec![None],
                ReferenceSpec::Subject => vec![Some(record.id)],
                ReferenceSpec::Products => record.produces.iter().copied().map(Some).collect(),
                ReferenceSpec::HarvesterDensity => match tuning.harvester_density_reference {
                    Some(id) => {
                        check_reference(record, table, id)?;
                        vec![Some(id)]
                    }
                    None => Vec::new(),
                },
            };
            out.extend(references.into_iter().map(|reference| {
                Annotation::Prefers(PreferenceAnnotation {
                    action,
                    reference,
                    relation,
                    comparison,
                    fraction,
                    weight,
                    reverse_weight,
                })
            }));
        }
        RuleTemplate::Aims {
            priority,
            relation,
            weight,
            target,
            range,
            guard,
        } => {
            let mut targets: Vec<Option<UnitTypeId>> = match target {
                TargetSpec::Any => vec![None],
                spec => table
                    .find(|u| spec.matches(u))
                    .into_iter()
                    .map(|u| Some(u.id))
                    .collect(),
            };
            // A class with no members in this catalog still gets one
            // untargeted aim.
            if targets.is_empty() {
                targets.push(None);
            }
            out.extend(targets.into_iter().map(|target| {
                Annotation::Aims(AimAnnotation {
                    priority,
                    relation,
                    weight,
                    target,
                    range,
                    guard,
                })
            }));
        }
    }
    Ok(())
}

fn check_reference(
    record: &UnitTypeRecord,
    table: &UnitTypeTable,
    reference: UnitTypeId,
) -> Result<(), GraphError> {
    if table.get(reference).is_none() {
        return Err(GraphError::UnknownTuningReference {
            unit: record.id,
            reference,
        });
    }
    Ok(())
}

/// Number of annotations emitted for one unit type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationCount {
    pub preferences: u32,
    pub aims: u32,
}

/// Instantiate the rules for a unit type and write them to the sink.
///
/// Each annotation becomes its own node (`preference/<unit>/<n>` or
/// `aim/<unit>/<n>`) linked from the unit by `prefers` or `aimsAt`.
pub fn apply_preference_rules<S: StatementSink>(
    record: &UnitTypeRecord,
    table: &UnitTypeTable,
    tuning: &CatalogTuning,
    sink: &mut S,
) -> Result<AnnotationCount, GraphError> {
    let unit = NodeId::unit(record.id);
    let mut count = AnnotationCount::default();

    for annotation in preference_rules(record, table, tuning)? {
        match annotation {
            Annotation::Prefers(pref) => {
                let node = NodeId::Preference {
                    unit: record.id,
                    index: count.preferences,
                };
                emit_preference(sink, &unit, node, &pref);
                count.preferences += 1;
            }
            Annotation::Aims(aim) => {
                let node = NodeId::Aim {
                    unit: record.id,
                    index: count.aims,
                };
                emit_aim(sink, &unit, node, &aim);
                count.aims += 1;
            }
        }
    }

    Ok(count)
}

fn emit_preference<S: StatementSink>(sink: &mut S, unit: &NodeId, node: NodeId, pref: &PreferenceAnnotation) {
    sink.create_node(node.clone());
    sink.add_statement(unit, Predicate::Prefers, &node);
    sink.add_statement(&node, Predicate::Type, &NodeId::Class(NodeClass::Preference));
    if let Some(action) = pref.action {
        sink.add_statement(&node, Predicate::Action, &NodeId::action(action));
    }
    if let Some(reference) = pref.reference {
        sink.add_statement(&node, Predicate::Reference, &NodeId::unit(reference));
    }
    sink.add_literal_statement(&node, Predicate::Relation, Literal::from(pref.relation.tag()));
    if let Some(comparison) = pref.comparison {
        sink.add_literal_statement(&node, Predicate::Comparison, Literal::from(comparison.tag()));
    }
    sink.add_literal_statement(&node, Predicate::Fraction, Literal::Float(pref.fraction));
    sink.add_literal_statement(&node, Predicate::Weight, Literal::Float(pref.weight));
    sink.add_literal_statement(&node, Predicate::ReverseWeight, Literal::Float(pref.reverse_weight));
}

fn emit_aim<S: StatementSink>(sink: &mut S, unit: &NodeId, node: NodeId, aim: &AimAnnotation) {
    sink.create_node(node.clone());
    sink.add_statement(unit, Predicate::AimsAt, &node);
    sink.add_statement(&node, Predicate::Type, &NodeId::Class(NodeClass::Aim));
    sink.add_literal_statement(&node, Predicate::Priority, Literal::from(aim.priority));
    sink.add_literal_statement(&node, Predicate::Relation, Literal::from(aim.relation.tag()));
    sink.add_literal_statement(&node, Predicate::Weight, Literal::Float(aim.weight));
    if let Some(target) = aim.target {
        sink.add_statement(&node, Predicate::Target, &NodeId::unit(target));
    }
    if let Some(range) = aim.range {
        sink.add_literal_statement(&node, Predicate::Range, Literal::from(range));
    }
    if let Some(guard) = aim.guard {
        sink.add_literal_statement(&node, Predicate::GuardStatistic, Literal::from(guard.statistic.name()));
        sink.add_literal_statement(&node, Predicate::GuardLevel, Literal::from(guard.level.name()));
    }
}
