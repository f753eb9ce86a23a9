//! # Unit Rules
//!
//! The catalog crate - unit-type records, the fixed action catalog and the
//! table of rated numeric fields. This crate is the single source of truth
//! for what a unit type is and does not contain any graph logic.

pub mod catalog;
pub mod entities;
pub mod mechanics;

pub use catalog::*;
pub use entities::*;
pub use mechanics::*;
