//! Catalog-level properties of a compiled graph.

use std::collections::HashSet;

use unit_graph::{
    compile, BuildOptions, CatalogTuning, GraphBuilder, GraphError, GraphStore, Literal, NodeClass, NodeId,
    Predicate, RatingTier, StatementSink,
};
use unit_rules::{ActionKind, NumericField, UnitTypeDefinition, UnitTypeId, UnitTypeTable};

fn small_catalog() -> UnitTypeTable {
    let definitions: Vec<UnitTypeDefinition> = serde_json::from_str(
        r#"[
            {"ID": 0, "name": "Resource", "isResource": true, "canMove": false, "canAttack": false},
            {"ID": 1, "name": "Base", "isStockpile": true, "canMove": false, "canAttack": false,
             "produces": ["Worker"]},
            {"ID": 3, "name": "Worker", "canHarvest": true, "canMove": true, "producedBy": ["Base"]}
        ]"#,
    )
    .unwrap();
    UnitTypeTable::from_definitions(definitions).unwrap()
}

fn reference_graph() -> GraphStore {
    let table = UnitTypeTable::reference().unwrap();
    compile(&table).unwrap().into_store()
}

#[test]
fn test_small_catalog_worker_statements() {
    let graph = compile(&small_catalog()).unwrap();
    let store = graph.store();
    let worker = NodeId::unit(UnitTypeId(3));

    for action in [ActionKind::Harvest, ActionKind::Return, ActionKind::Move, ActionKind::None] {
        assert!(
            store.has_statement(&worker, Predicate::Does, &NodeId::action(action)),
            "worker should do {}",
            action.name()
        );
    }
    assert!(store.has_statement(&worker, Predicate::ProducedBy, &NodeId::unit(UnitTypeId(1))));
    assert!(store.has_statement(
        &NodeId::action(ActionKind::Harvest),
        Predicate::Targets,
        &NodeId::unit(UnitTypeId(0))
    ));
}

#[test]
fn test_compilation_is_deterministic() {
    let table = UnitTypeTable::reference().unwrap();
    let first = compile(&table).unwrap();
    let second = compile(&table).unwrap();

    assert_eq!(first.statements(), second.statements());
    assert_eq!(
        first.store().to_ntriples(unit_graph::DEFAULT_BASE_URI),
        second.store().to_ntriples(unit_graph::DEFAULT_BASE_URI)
    );
}

#[test]
fn test_every_unit_does_none() {
    let table = UnitTypeTable::reference().unwrap();
    let graph = compile(&table).unwrap();
    let none = NodeId::action(ActionKind::None);

    for unit in graph.unit_type_nodes() {
        assert!(graph.store().has_statement(unit, Predicate::Does, &none), "{} lacks does None", unit);
    }
}

#[test]
fn test_production_links_are_mirrored() {
    let store = reference_graph();

    let produces = store.find_statements(|s| s.predicate == Predicate::Produces);
    let produced_by = store.find_statements(|s| s.predicate == Predicate::ProducedBy);
    assert!(!produces.is_empty());
    assert_eq!(produces.len(), produced_by.len());

    for statement in produces {
        let product = statement.object.as_node().unwrap();
        assert_eq!(
            store.count_statement(product, Predicate::ProducedBy, &statement.subject),
            1,
            "{} produces {} without a mirror",
            statement.subject,
            product
        );
    }
}

#[test]
fn test_capability_coherence() {
    let table = UnitTypeTable::reference().unwrap();
    let store = compile(&table).unwrap().into_store();
    let attack = NodeId::action(ActionKind::Attack);

    for record in table.unit_types() {
        let unit = NodeId::unit(record.id);
        if !record.capabilities.can_attack {
            assert!(!store.has_statement(&unit, Predicate::Does, &attack), "{}", record.name);
        }
        if record.capabilities.is_resource {
            assert!(!store.has_statement(&attack, Predicate::Targets, &unit), "{}", record.name);
        }
    }
}

#[test]
fn test_rating_nodes_are_created_once() {
    let store = reference_graph();
    let rating_class = NodeId::Class(NodeClass::Rating);

    let typed: Vec<&NodeId> = store
        .find_statements(|s| {
            matches!(s.subject, NodeId::Rating { .. })
                && s.predicate == Predicate::Type
                && s.object.as_node() == Some(&rating_class)
        })
        .into_iter()
        .map(|s| &s.subject)
        .collect();
    let unique: HashSet<&NodeId> = typed.iter().copied().collect();
    assert_eq!(typed.len(), unique.len());

    // every ranked node was registered
    for statement in store.find_statements(|s| s.predicate == Predicate::Ranks) {
        assert!(unique.contains(statement.object.as_node().unwrap()));
    }
}

#[test]
fn test_rating_node_shared_across_units() {
    let store = reference_graph();
    // Base (10) and Barracks (5) land in the expensive band of 1..10
    let expensive = NodeId::rating(NumericField::Cost, RatingTier::Bad);
    let ranked_by = store.objects(&expensive, Predicate::RankedBy);

    assert!(ranked_by.contains(&&NodeId::unit(UnitTypeId(1))));
    assert!(ranked_by.contains(&&NodeId::unit(UnitTypeId(2))));
    assert!(store.has_statement(&expensive, Predicate::Describes, &NodeId::action(ActionKind::Produce)));
    assert!(store.has_statement(&expensive, Predicate::Tier, &NodeId::Tier(RatingTier::Bad)));
}

#[test]
fn test_degenerate_population_rates_medium() {
    let definitions = vec![
        UnitTypeDefinition::new(0, "A"),
        UnitTypeDefinition::new(1, "B"),
        UnitTypeDefinition::new(2, "C"),
    ];
    let table = UnitTypeTable::from_definitions(definitions).unwrap();
    let store = compile(&table).unwrap().into_store();
    let medium_hp = NodeId::rating(NumericField::Hp, RatingTier::Medium);

    for id in 0..3 {
        let unit = NodeId::unit(UnitTypeId(id));
        assert!(store.has_statement(&unit, Predicate::Ranks, &medium_hp));
        assert_eq!(store.literal(&unit, Predicate::Has(NumericField::Hp)), Some(&Literal::Int(1)));
    }
    assert!(!store.has_node(&NodeId::rating(NumericField::Hp, RatingTier::Good)));
    assert!(!store.has_node(&NodeId::rating(NumericField::Hp, RatingTier::Bad)));
}

#[test]
fn test_inapplicable_fields_are_not_ranked() {
    let store = reference_graph();
    let resource = NodeId::unit(UnitTypeId(0));

    let ranked: Vec<String> = store
        .objects(&resource, Predicate::Ranks)
        .into_iter()
        .map(|n| n.as_string())
        .collect();
    assert_eq!(ranked.len(), 3);
    assert!(ranked.iter().all(|r| !r.contains("minDamage") && !r.contains("attackRange")));
}

#[test]
fn test_unknown_tuning_reference_aborts_build() {
    let table = UnitTypeTable::reference().unwrap();
    let mut tuning = CatalogTuning::reference();
    tuning.harvester_density_reference = Some(UnitTypeId(77));

    let result = GraphBuilder::with_options(&table, BuildOptions::default().with_tuning(tuning)).build();
    match result {
        Err(GraphError::UnknownTuningReference { unit, reference }) => {
            assert_eq!(unit, UnitTypeId(3));
            assert_eq!(reference, UnitTypeId(77));
        }
        other => panic!("expected unknown tuning reference, got {:?}", other.map(|g| g.report().clone())),
    }
}

#[test]
fn test_unknown_relation_is_rejected_at_load() {
    let definitions = vec![UnitTypeDefinition::new(0, "Factory").producing("Ghost")];
    let err = UnitTypeTable::from_definitions(definitions).unwrap_err();

    assert!(err.to_string().contains("Ghost"));
}

#[test]
fn test_catalog_root_includes_everything() {
    let table = UnitTypeTable::reference().unwrap();
    let graph = compile(&table).unwrap();
    let store = graph.store();
    let root = NodeId::CatalogRoot;

    for node in graph.unit_type_nodes().iter().chain(graph.action_type_nodes()) {
        assert_eq!(store.count_statement(&root, Predicate::Includes, node), 1);
        assert_eq!(store.count_statement(node, Predicate::IncludedBy, &root), 1);
    }
}

#[test]
fn test_json_export() {
    let store = compile(&small_catalog()).unwrap().into_store();
    let json: serde_json::Value = serde_json::from_str(&store.to_json().unwrap()).unwrap();

    assert_eq!(
        json["statements"].as_array().map(|s| s.len()),
        Some(store.statement_count())
    );
}

#[test]
fn test_query_surface() {
    let table = UnitTypeTable::reference().unwrap();
    let graph = compile(&table).unwrap();
    let store = graph.store();

    let units: Vec<&NodeId> = store.instances_of(NodeClass::Unit);
    assert_eq!(units.len(), graph.unit_type_nodes().len());
    assert!(units.iter().zip(graph.unit_type_nodes()).all(|(a, b)| *a == b));
    assert_eq!(store.instances_of(NodeClass::Action).len(), 6);
    assert_eq!(store.instances_of(NodeClass::Catalog), vec![&NodeId::CatalogRoot]);
    assert_eq!(store.node_count(), store.nodes().len());
    assert_eq!(graph.report().statements, store.statement_count());
}
