//! The build orchestrator.
//!
//! A build walks a fixed sequence of phases, once, over an immutable
//! catalog snapshot:
//!
//! 1. **CreateActionCatalog**: the six action nodes and the three tier classes
//! 2. **Per unit type**, in catalog order:
//!    a. CompileCapabilities
//!    b. ApplyPreferenceRules
//!    c. RateAttributes
//! 3. **LinkCatalogRoot**: one root including every action and unit node
//!
//! All per-build state (the rating registry, the visited set, the counters)
//! lives in a [`BuildRun`] that is dropped at the end. The sink is taken by
//! value and only handed back on success, so a failed build leaves nothing
//! behind.

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, trace};

use unit_rules::{ActionKind, PopulationStats, UnitTypeId, UnitTypeRecord, UnitTypeTable};

use super::capability::compile_capabilities;
use super::preference::apply_preference_rules;
use super::rating::{rate_attributes, RatingRegistry, RatingTier};
use super::tuning::CatalogTuning;
use crate::error::GraphError;
use crate::store::{GraphStore, Literal, NodeClass, NodeHandle, NodeId, Predicate, Statement, StatementSink};

/// Options for one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Catalog-specific preference tuning.
    pub tuning: CatalogTuning,

    /// Attach raw `has<Field>` literals before each rank statement.
    pub emit_values: bool,

    /// Precomputed population bounds. Computed from the catalog when `None`.
    pub population: Option<PopulationStats>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            tuning: CatalogTuning::reference(),
            emit_values: true,
            population: None,
        }
    }
}

impl BuildOptions {
    pub fn with_tuning(mut self, tuning: CatalogTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn without_values(mut self) -> Self {
        self.emit_values = false;
        self
    }

    pub fn with_population(mut self, population: PopulationStats) -> Self {
        self.population = Some(population);
        self
    }
}

/// Where a build currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    Init,
    CreateActionCatalog,
    CompileCapabilities(UnitTypeId),
    ApplyPreferenceRules(UnitTypeId),
    RateAttributes(UnitTypeId),
    LinkCatalogRoot,
    Done,
}

/// Counters collected during a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub unit_types: usize,
    pub action_types: usize,
    pub rating_nodes: usize,
    pub ranked_fields: usize,
    pub preferences: usize,
    pub aims: usize,
    pub statements: usize,
}

/// The result of a successful build.
#[derive(Debug, Clone)]
pub struct CompiledGraph<S = GraphStore> {
    store: S,
    unit_nodes: Vec<NodeId>,
    action_nodes: Vec<NodeId>,
    report: BuildReport,
}

impl<S> CompiledGraph<S> {
    /// The sink the graph was written to.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Identifiers of every unit type node, in catalog order.
    pub fn unit_type_nodes(&self) -> &[NodeId] {
        &self.unit_nodes
    }

    /// Identifiers of every action type node, in catalog order.
    pub fn action_type_nodes(&self) -> &[NodeId] {
        &self.action_nodes
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }
}

impl CompiledGraph<GraphStore> {
    /// All statements, in emission order.
    pub fn statements(&self) -> &[Statement] {
        self.store.statements()
    }
}

/// Compiles a unit type catalog into a graph.
pub struct GraphBuilder<'a> {
    table: &'a UnitTypeTable,
    options: BuildOptions,
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder with default options.
    pub fn new(table: &'a UnitTypeTable) -> Self {
        Self::with_options(table, BuildOptions::default())
    }

    pub fn with_options(table: &'a UnitTypeTable, options: BuildOptions) -> Self {
        Self { table, options }
    }

    /// Build into a fresh [`GraphStore`].
    pub fn build(self) -> Result<CompiledGraph, GraphError> {
        self.build_into(GraphStore::new())
    }

    /// Build into the given sink. On error the sink is dropped.
    pub fn build_into<S: StatementSink>(self, sink: S) -> Result<CompiledGraph<S>, GraphError> {
        let population = match &self.options.population {
            Some(stats) => stats.clone(),
            None => self.table.population_stats(),
        };

        info!(unit_types = self.table.len(), "building unit graph");
        let mut run = BuildRun::new(sink);

        run.enter(BuildPhase::CreateActionCatalog);
        run.create_action_catalog();

        for record in self.table.unit_types() {
            run.compile_unit(record, self.table, &self.options, &population)?;
        }

        run.enter(BuildPhase::LinkCatalogRoot);
        run.link_catalog_root();

        run.enter(BuildPhase::Done);
        let graph = run.finish();
        info!(
            unit_types = graph.report.unit_types,
            statements = graph.report.statements,
            rating_nodes = graph.report.rating_nodes,
            "unit graph built"
        );
        Ok(graph)
    }
}

/// Compile a catalog with default options.
pub fn compile(table: &UnitTypeTable) -> Result<CompiledGraph, GraphError> {
    GraphBuilder::new(table).build()
}

/// State local to one build invocation.
struct BuildRun<S> {
    sink: Tally<S>,
    phase: BuildPhase,
    registry: RatingRegistry,
    visited: HashSet<UnitTypeId>,
    unit_nodes: Vec<NodeId>,
    action_nodes: Vec<NodeId>,
    report: BuildReport,
}

impl<S: StatementSink> BuildRun<S> {
    fn new(sink: S) -> Self {
        Self {
            sink: Tally::new(sink),
            phase: BuildPhase::Init,
            registry: RatingRegistry::new(),
            visited: HashSet::new(),
            unit_nodes: Vec::new(),
            action_nodes: Vec::new(),
            report: BuildReport::default(),
        }
    }

    fn enter(&mut self, phase: BuildPhase) {
        trace!(from = ?self.phase, to = ?phase, "build phase");
        self.phase = phase;
    }

    fn create_action_catalog(&mut self) {
        for kind in ActionKind::ALL {
            let node = NodeId::action(kind);
            self.sink.create_node(node.clone());
            self.sink.add_statement(&node, Predicate::Type, &NodeId::Class(NodeClass::Action));
            self.sink.add_literal_statement(&node, Predicate::Label, Literal::from(kind.name()));
            self.action_nodes.push(node);
        }

        for tier in RatingTier::ALL {
            let node = NodeId::Tier(tier);
            self.sink.create_node(node.clone());
            self.sink.add_statement(&node, Predicate::Type, &NodeId::Class(NodeClass::Rating));
            self.sink.add_literal_statement(&node, Predicate::Label, Literal::from(tier.name()));
        }
    }

    fn compile_unit(
        &mut self,
        record: &UnitTypeRecord,
        table: &UnitTypeTable,
        options: &BuildOptions,
        population: &PopulationStats,
    ) -> Result<(), GraphError> {
        if !self.visited.insert(record.id) {
            return Ok(());
        }

        let unit = NodeId::unit(record.id);
        self.enter(BuildPhase::CompileCapabilities(record.id));
        self.sink.create_node(unit.clone());
        self.sink.add_statement(&unit, Predicate::Type, &NodeId::Class(NodeClass::Unit));
        self.sink.add_literal_statement(&unit, Predicate::Label, Literal::from(record.name.as_str()));
        compile_capabilities(record, table, &mut self.sink)?;

        self.enter(BuildPhase::ApplyPreferenceRules(record.id));
        let annotations = apply_preference_rules(record, table, &options.tuning, &mut self.sink)?;

        self.enter(BuildPhase::RateAttributes(record.id));
        let ranked = rate_attributes(
            record,
            population,
            &mut self.registry,
            &mut self.sink,
            options.emit_values,
        )?;

        debug!(
            unit = %record.name,
            id = %record.id,
            preferences = annotations.preferences,
            aims = annotations.aims,
            ranked,
            "compiled unit type"
        );

        self.report.preferences += annotations.preferences as usize;
        self.report.aims += annotations.aims as usize;
        self.report.ranked_fields += ranked;
        self.unit_nodes.push(unit);
        Ok(())
    }

    fn link_catalog_root(&mut self) {
        let root = NodeId::CatalogRoot;
        self.sink.create_node(root.clone());
        self.sink.add_statement(&root, Predicate::Type, &NodeId::Class(NodeClass::Catalog));

        for node in self.action_nodes.iter().chain(self.unit_nodes.iter()) {
            self.sink.add_pair(&root, Predicate::Includes, Predicate::IncludedBy, node);
        }
    }

    fn finish(self) -> CompiledGraph<S> {
        let report = BuildReport {
            unit_types: self.unit_nodes.len(),
            action_types: self.action_nodes.len(),
            rating_nodes: self.registry.len(),
            statements: self.sink.statements,
            ..self.report
        };
        CompiledGraph {
            store: self.sink.inner,
            unit_nodes: self.unit_nodes,
            action_nodes: self.action_nodes,
            report,
        }
    }
}

/// Forwards to a sink and counts the statements written through it.
struct Tally<S> {
    inner: S,
    statements: usize,
}

impl<S> Tally<S> {
    fn new(inner: S) -> Self {
        Self { inner, statements: 0 }
    }
}

impl<S: StatementSink> StatementSink for Tally<S> {
    fn add_statement(&mut self, subject: &NodeId, predicate: Predicate, object: &NodeId) {
        self.statements += 1;
        self.inner.add_statement(subject, predicate, object);
    }

    fn add_literal_statement(&mut self, subject: &NodeId, predicate: Predicate, value: Literal) {
        self.statements += 1;
        self.inner.add_literal_statement(subject, predicate, value);
    }

    fn create_node(&mut self, id: NodeId) -> NodeHandle {
        self.inner.create_node(id)
    }

    fn has_node(&self, id: &NodeId) -> bool {
        self.inner.has_node(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unit_rules::NumericField;

    #[test]
    fn test_build_reference_catalog() {
        let table = UnitTypeTable::reference().unwrap();
        let graph = compile(&table).unwrap();

        assert_eq!(graph.unit_type_nodes().len(), 7);
        assert_eq!(graph.action_type_nodes().len(), 6);
        assert_eq!(graph.unit_type_nodes()[3], NodeId::unit(UnitTypeId(3)));
        assert_eq!(graph.action_type_nodes()[0], NodeId::action(ActionKind::None));

        let report = graph.report();
        assert_eq!(report.unit_types, 7);
        assert_eq!(report.statements, graph.statements().len());
        assert!(report.rating_nodes > 0);
    }

    #[test]
    fn test_action_catalog_comes_first() {
        let table = UnitTypeTable::reference().unwrap();
        let graph = compile(&table).unwrap();
        let first = &graph.statements()[0];

        assert_eq!(first.subject, NodeId::action(ActionKind::None));
        assert_eq!(first.predicate, Predicate::Type);

        let store = graph.store();
        for tier in RatingTier::ALL {
            assert_eq!(
                store.literal(&NodeId::Tier(tier), Predicate::Label),
                Some(&Literal::from(tier.name()))
            );
        }
    }

    #[test]
    fn test_catalog_root_comes_last() {
        let table = UnitTypeTable::reference().unwrap();
        let graph = compile(&table).unwrap();
        let last = graph.statements().last().unwrap();

        assert_eq!(last.subject, NodeId::unit(UnitTypeId(6)));
        assert_eq!(last.predicate, Predicate::IncludedBy);

        let includes = graph.store().objects(&NodeId::CatalogRoot, Predicate::Includes);
        assert_eq!(includes.len(), 13);
    }

    #[test]
    fn test_unit_nodes_are_labelled() {
        let table = UnitTypeTable::reference().unwrap();
        let graph = compile(&table).unwrap();
        let worker = NodeId::unit(UnitTypeId(3));

        assert_eq!(
            graph.store().literal(&worker, Predicate::Label),
            Some(&Literal::from("Worker"))
        );
        assert!(graph
            .store()
            .has_statement(&worker, Predicate::Type, &NodeId::Class(NodeClass::Unit)));
    }

    #[test]
    fn test_without_values() {
        let table = UnitTypeTable::reference().unwrap();
        let options = BuildOptions::default().without_values();
        let graph = GraphBuilder::with_options(&table, options).build().unwrap();

        let has_values = graph
            .statements()
            .iter()
            .any(|s| matches!(s.predicate, Predicate::Has(_)));
        assert!(!has_values);
    }

    #[test]
    fn test_supplied_population_is_used() {
        let table = UnitTypeTable::reference().unwrap();
        let mut population = table.population_stats();
        population.insert(NumericField::Hp, unit_rules::FieldStats::new(0, 100));

        let options = BuildOptions::default().with_population(population);
        let graph = GraphBuilder::with_options(&table, options).build().unwrap();

        // Base's hp of 10 is in the bottom band of 0..100
        assert!(graph.store().has_statement(
            &NodeId::unit(UnitTypeId(1)),
            Predicate::Ranks,
            &NodeId::rating(NumericField::Hp, RatingTier::Bad)
        ));
    }

    #[test]
    fn test_missing_population_entry_aborts() {
        let table = UnitTypeTable::reference().unwrap();
        let options = BuildOptions::default().with_population(PopulationStats::default());
        let err = GraphBuilder::with_options(&table, options).build().unwrap_err();

        assert!(matches!(err, GraphError::MissingFieldStats(_)));
    }

    #[test]
    fn test_tally_counts_pairs() {
        let mut sink = Tally::new(GraphStore::new());
        sink.add_pair(
            &NodeId::CatalogRoot,
            Predicate::Includes,
            Predicate::IncludedBy,
            &NodeId::action(ActionKind::Move),
        );
        assert_eq!(sink.statements, 2);
        assert_eq!(sink.inner.statement_count(), 2);
    }
}
