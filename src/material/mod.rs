//! Course material traversal.

pub mod item;
pub mod traverse;

pub use item::{MaterialEntry, UnitBatch};
pub use traverse::{traverse, unit_batches};
