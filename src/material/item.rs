//! Traversal output types.

use crate::portal::Material;

/// One downloadable material together with its position in the course
/// tree. Unit numbers are 1-based and follow portal display order, not
/// any numbering embedded in unit titles.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialEntry<'a> {
    pub unit_number: u32,
    pub unit_title: &'a str,
    pub topic_title: &'a str,
    pub material: &'a Material,
}

impl MaterialEntry<'_> {
    /// Human-readable position for log lines, e.g. `Unit 2 / Linked Lists`.
    pub fn location(&self) -> String {
        format!("Unit {} / {}", self.unit_number, self.topic_title)
    }
}

/// All matching materials of one unit, in portal order. Used by the
/// merged-PDF mode, which works unit by unit.
#[derive(Debug, Clone)]
pub struct UnitBatch<'a> {
    pub unit_number: u32,
    pub unit_title: &'a str,
    pub entries: Vec<MaterialEntry<'a>>,
}
