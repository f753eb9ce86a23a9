//! Capability, targeting and production statements for one unit type.

use unit_rules::{ActionKind, UnitTypeRecord, UnitTypeTable};

use crate::error::GraphError;
use crate::store::{Literal, NodeId, Predicate, StatementSink};

/// Emit the capability bundle of a unit type.
///
/// Statement order is fixed so that compiling the same catalog always
/// yields the same sequence:
///
/// 1. does None
/// 2. does Move, if the unit can move
/// 3. does Harvest and Return, if it can harvest
/// 4. Harvest targets it, if it is a resource
/// 5. Return targets it, if it is a stockpile
/// 6. does Produce, if it produces anything
/// 7. Produce creates it, if anything produces it
/// 8. does Attack, if it can attack
/// 9. Attack targets it, unless it is a resource
/// 10. produces / producedBy links to related unit types
/// 11. `isResource` and `isStockpile` literals
///
/// Every link except the literals is emitted with its inverse. Production
/// links are emitted from this unit's side only; because the catalog keeps
/// both lists mirrored, the catalog-wide output has every pair exactly once.
pub fn compile_capabilities<S: StatementSink>(
    record: &UnitTypeRecord,
    table: &UnitTypeTable,
    sink: &mut S,
) -> Result<(), GraphError> {
    let unit = NodeId::unit(record.id);
    let caps = &record.capabilities;

    does(sink, &unit, ActionKind::None);
    if caps.can_move {
        does(sink, &unit, ActionKind::Move);
    }
    if caps.can_harvest {
        does(sink, &unit, ActionKind::Harvest);
        does(sink, &unit, ActionKind::Return);
    }
    if caps.is_resource {
        targeted_by(sink, &unit, ActionKind::Harvest);
    }
    if caps.is_stockpile {
        targeted_by(sink, &unit, ActionKind::Return);
    }
    if !record.produces.is_empty() {
        does(sink, &unit, ActionKind::Produce);
    }
    if record.is_produced() {
        sink.add_pair(
            &NodeId::action(ActionKind::Produce),
            Predicate::Creates,
            Predicate::CreatedBy,
            &unit,
        );
    }
    if caps.can_attack {
        does(sink, &unit, ActionKind::Attack);
    }
    if !caps.is_resource {
        targeted_by(sink, &unit, ActionKind::Attack);
    }

    for product in &record.produces {
        let other = NodeId::unit(table.require(*product)?.id);
        sink.ensure_node(&other);
        sink.add_statement(&unit, Predicate::Produces, &other);
    }
    for producer in &record.produced_by {
        let other = NodeId::unit(table.require(*producer)?.id);
        sink.ensure_node(&other);
        sink.add_statement(&unit, Predicate::ProducedBy, &other);
    }

    sink.add_literal_statement(&unit, Predicate::IsResource, Literal::Bool(caps.is_resource));
    sink.add_literal_statement(&unit, Predicate::IsStockpile, Literal::Bool(caps.is_stockpile));

    Ok(())
}

fn does<S: StatementSink>(sink: &mut S, unit: &NodeId, action: ActionKind) {
    sink.add_pair(unit, Predicate::Does, Predicate::DoneBy, &NodeId::action(action));
}

fn targeted_by<S: StatementSink>(sink: &mut S, unit: &NodeId, action: ActionKind) {
    sink.add_pair(
        &NodeId::action(action),
        Predicate::Targets,
        Predicate::TargetedBy,
        unit,
    );
}
