//! Graph compilation: turning unit type records into statements.
//!
//! - **rating**: population-relative three-tier rating of numeric fields
//! - **capability**: does / targets / produces bundles per unit type
//! - **preference**: the heuristic prefers / aimsAt rule table
//! - **tuning**: catalog-specific data layered over the rule table
//! - **builder**: runs the above over a whole catalog

mod builder;
mod capability;
mod preference;
mod rating;
mod tuning;

pub use builder::*;
pub use capability::*;
pub use preference::*;
pub use rating::*;
pub use tuning::*;
