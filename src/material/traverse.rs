//! Lazy traversal over a fetched course content tree.
//!
//! Traversal is pure: it never touches the network or the filesystem,
//! and it preserves portal order (units, then topics, then materials).
//! Both output modes consume it, so ordering and filtering behave
//! identically regardless of layout.

use crate::error::{Error, Result};
use crate::material::item::{MaterialEntry, UnitBatch};
use crate::portal::{CourseContent, MaterialKind, Unit};

/// Iterates over every material of the requested kind, flattened in
/// portal order. Errors when the course has no units at all.
pub fn traverse(
    content: &CourseContent,
    kind: MaterialKind,
) -> Result<impl Iterator<Item = MaterialEntry<'_>>> {
    ensure_units(content)?;
    Ok(content
        .units
        .iter()
        .enumerate()
        .flat_map(move |(index, unit)| unit_entries(index as u32 + 1, unit, kind)))
}

/// Iterates unit by unit, each batch carrying its matching materials.
/// A unit with no matching materials yields an empty batch rather than
/// being skipped, so unit numbering stays aligned with the portal.
pub fn unit_batches(
    content: &CourseContent,
    kind: MaterialKind,
) -> Result<impl Iterator<Item = UnitBatch<'_>>> {
    ensure_units(content)?;
    Ok(content
        .units
        .iter()
        .enumerate()
        .map(move |(index, unit)| UnitBatch {
            unit_number: index as u32 + 1,
            unit_title: &unit.title,
            entries: unit_entries(index as u32 + 1, unit, kind).collect(),
        }))
}

fn ensure_units(content: &CourseContent) -> Result<()> {
    if content.units.is_empty() {
        return Err(Error::NoMaterials(format!(
            "course '{}' has no units",
            content.course.title
        )));
    }
    Ok(())
}

fn unit_entries(
    unit_number: u32,
    unit: &Unit,
    kind: MaterialKind,
) -> impl Iterator<Item = MaterialEntry<'_>> {
    let unit_title = unit.title.as_str();
    unit.topics.iter().flat_map(move |topic| {
        let topic_title = topic.title.as_str();
        topic
            .materials
            .iter()
            .filter(move |material| material.kind == kind)
            .map(move |material| MaterialEntry {
                unit_number,
                unit_title,
                topic_title,
                material,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::{Course, Material, Topic};

    fn material(title: &str, kind: MaterialKind) -> Material {
        Material {
            title: title.to_string(),
            url: format!("https://example.com/{}", title.replace(' ', "-")),
            kind,
        }
    }

    fn sample_content() -> CourseContent {
        CourseContent {
            course: Course {
                id: "c1".to_string(),
                code: "UE22CS252B".to_string(),
                title: "Data Structures".to_string(),
                semester: 3,
            },
            units: vec![
                Unit {
                    id: "u1".to_string(),
                    title: "Unit 1 : Basics".to_string(),
                    topics: vec![
                        Topic {
                            id: "t1".to_string(),
                            title: "Arrays".to_string(),
                            materials: vec![
                                material("Arrays Intro", MaterialKind::Slides),
                                material("Array Notes", MaterialKind::Notes),
                            ],
                        },
                        Topic {
                            id: "t2".to_string(),
                            title: "Stacks".to_string(),
                            materials: vec![material("Stack Machines", MaterialKind::Slides)],
                        },
                    ],
                },
                Unit {
                    id: "u2".to_string(),
                    title: "Unit 2 : Trees".to_string(),
                    topics: vec![Topic {
                        id: "t3".to_string(),
                        title: "Binary Trees".to_string(),
                        materials: vec![material("Tree Walks", MaterialKind::Slides)],
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_traverse_preserves_portal_order() {
        let content = sample_content();
        let titles: Vec<&str> = traverse(&content, MaterialKind::Slides)
            .unwrap()
            .map(|entry| entry.material.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Arrays Intro", "Stack Machines", "Tree Walks"]);
    }

    #[test]
    fn test_traverse_filters_by_kind() {
        let content = sample_content();
        let entries: Vec<_> = traverse(&content, MaterialKind::Notes).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].material.title, "Array Notes");
        assert_eq!(entries[0].topic_title, "Arrays");
    }

    #[test]
    fn test_traverse_numbers_units_from_one() {
        let content = sample_content();
        let numbers: Vec<u32> = traverse(&content, MaterialKind::Slides)
            .unwrap()
            .map(|entry| entry.unit_number)
            .collect();
        assert_eq!(numbers, vec![1, 1, 2]);
    }

    #[test]
    fn test_traverse_errors_without_units() {
        let mut content = sample_content();
        content.units.clear();
        let err = traverse(&content, MaterialKind::Slides).map(|_| ()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_traverse_yields_nothing_when_kind_absent() {
        let content = sample_content();
        let entries: Vec<_> = traverse(&content, MaterialKind::QuestionBank)
            .unwrap()
            .collect();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_unit_batches_keep_empty_units() {
        let content = sample_content();
        let batches: Vec<_> = unit_batches(&content, MaterialKind::Notes).unwrap().collect();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].entries.len(), 1);
        assert!(batches[1].entries.is_empty());
        assert_eq!(batches[1].unit_number, 2);
    }

    #[test]
    fn test_entry_location() {
        let content = sample_content();
        let entry = traverse(&content, MaterialKind::Slides)
            .unwrap()
            .next()
            .unwrap();
        assert_eq!(entry.location(), "Unit 1 / Arrays");
    }
}
