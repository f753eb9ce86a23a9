//! # Unit Graph
//!
//! Compiles a unit type catalog from `unit_rules` into a semantic graph of
//! subject-predicate-object statements: what each unit type can do, what it
//! targets and produces, how its numbers rank against the rest of the
//! catalog, and hand-authored preference hints for downstream agents.
//!
//! ## Core Components
//!
//! - **store**: node identifiers, statements, the `StatementSink` boundary
//!   and the in-memory `GraphStore` with its textual exports
//! - **compiler**: the rating engine, capability compiler, preference rules
//!   and the `GraphBuilder` that orchestrates a build
//! - **error**: `GraphError`, returned when a build aborts
//!
//! ```no_run
//! use unit_graph::compile;
//! use unit_rules::UnitTypeTable;
//!
//! let table = UnitTypeTable::reference()?;
//! let graph = compile(&table)?;
//! println!("{}", graph.store().to_ntriples(unit_graph::DEFAULT_BASE_URI));
//! # Ok::<(), unit_graph::GraphError>(())
//! ```

pub mod compiler;
pub mod error;
pub mod store;

pub use compiler::*;
pub use error::*;
pub use store::*;
