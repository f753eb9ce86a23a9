//! Statement store - the output side of the compiler.
//!
//! The compiled graph consists of:
//! - **Nodes**: unit types, action types, ratings, annotations and classes
//! - **Statements**: subject, predicate, object facts between nodes
//! - **Literals**: values attached directly to a node

mod export;
mod graph;
mod node;
mod statement;

pub use export::*;
pub use graph::*;
pub use node::*;
pub use statement::*;
