//! The statement sink interface and its in-memory implementation.

use serde::Serialize;
use std::collections::HashMap;

use super::{Literal, NodeClass, NodeHandle, NodeId, Object, Predicate, Statement};

/// The minimal store interface the compiler writes through.
///
/// Implementations own namespace mapping and serialization. They may
/// create nodes implicitly when a statement mentions one, but the compiler
/// always creates catalog-wide nodes explicitly before linking them.
pub trait StatementSink {
    /// Link two nodes.
    fn add_statement(&mut self, subject: &NodeId, predicate: Predicate, object: &NodeId);

    /// Attach a literal to a node.
    fn add_literal_statement(&mut self, subject: &NodeId, predicate: Predicate, value: Literal);

    /// Create a node, returning its handle. Creating an existing node
    /// returns the existing handle.
    fn create_node(&mut self, id: NodeId) -> NodeHandle;

    /// Check whether a node exists.
    fn has_node(&self, id: &NodeId) -> bool;

    /// Create a node unless it already exists. Returns true if it was created.
    fn ensure_node(&mut self, id: &NodeId) -> bool {
        if self.has_node(id) {
            false
        } else {
            self.create_node(id.clone());
            true
        }
    }

    /// Link two nodes in both directions.
    fn add_pair(&mut self, a: &NodeId, forward: Predicate, backward: Predicate, b: &NodeId) {
        self.add_statement(a, forward, b);
        self.add_statement(b, backward, a);
    }
}

/// In-memory graph store.
///
/// Statements are kept in emission order and are not deduplicated; nodes
/// are unique and indexed by identifier.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphStore {
    /// All statements in emission order.
    statements: Vec<Statement>,

    /// All nodes in creation order.
    nodes: Vec<NodeId>,

    /// Index: node ID -> handle.
    #[serde(skip)]
    node_index: HashMap<NodeId, NodeHandle>,
}

impl GraphStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All statements in emission order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Get the total number of statements.
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Get the total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node objects of `subject --predicate--> ?`, in emission order.
    pub fn objects(&self, subject: &NodeId, predicate: Predicate) -> Vec<&NodeId> {
        self.statements
            .iter()
            .filter(|s| s.subject == *subject && s.predicate == predicate)
            .filter_map(|s| s.object.as_node())
            .collect()
    }

    /// First literal of `subject --predicate--> ?`.
    pub fn literal(&self, subject: &NodeId, predicate: Predicate) -> Option<&Literal> {
        self.statements
            .iter()
            .filter(|s| s.subject == *subject && s.predicate == predicate)
            .find_map(|s| s.object.as_literal())
    }

    /// Check whether `subject --predicate--> object` is present.
    pub fn has_statement(&self, subject: &NodeId, predicate: Predicate, object: &NodeId) -> bool {
        self.statements.iter().any(|s| s.links(subject, predicate, object))
    }

    /// Count occurrences of `subject --predicate--> object`.
    pub fn count_statement(&self, subject: &NodeId, predicate: Predicate, object: &NodeId) -> usize {
        self.statements
            .iter()
            .filter(|s| s.links(subject, predicate, object))
            .count()
    }

    /// Nodes typed as instances of a class, in emission order.
    pub fn instances_of(&self, class: NodeClass) -> Vec<&NodeId> {
        let class = NodeId::Class(class);
        self.statements
            .iter()
            .filter(|s| s.predicate == Predicate::Type && s.object.as_node() == Some(&class))
            .map(|s| &s.subject)
            .collect()
    }

    /// Find statements matching a predicate.
    pub fn find_statements<F>(&self, predicate: F) -> Vec<&Statement>
    where
        F: Fn(&Statement) -> bool,
    {
        self.statements.iter().filter(|s| predicate(s)).collect()
    }

    fn register(&mut self, id: &NodeId) -> NodeHandle {
        if let Some(handle) = self.node_index.get(id) {
            return *handle;
        }
        let handle = NodeHandle(self.nodes.len());
        self.nodes.push(id.clone());
        self.node_index.insert(id.clone(), handle);
        handle
    }
}

impl StatementSink for GraphStore {
    fn add_statement(&mut self, subject: &NodeId, predicate: Predicate, object: &NodeId) {
        self.register(subject);
        self.register(object);
        self.statements
            .push(Statement::link(subject.clone(), predicate, object.clone()));
    }

    fn add_literal_statement(&mut self, subject: &NodeId, predicate: Predicate, value: Literal) {
        self.register(subject);
        self.statements.push(Statement {
            subject: subject.clone(),
            predicate,
            object: Object::Literal(value),
        });
    }

    fn create_node(&mut self, id: NodeId) -> NodeHandle {
        self.register(&id)
    }

    fn has_node(&self, id: &NodeId) -> bool {
        self.node_index.contains_key(id)
    }
}
