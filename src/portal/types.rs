//! Data types for content served by the PESU Academy portal.

use std::fmt;

/// Category of course material, as encoded by the portal's content
/// controller (`materialType` request parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Slides,
    Notes,
    Assignments,
    QuestionBank,
}

impl MaterialKind {
    /// Maps a portal material type code to a kind.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(MaterialKind::Slides),
            3 => Some(MaterialKind::Notes),
            4 => Some(MaterialKind::Assignments),
            5 => Some(MaterialKind::QuestionBank),
            _ => None,
        }
    }

    /// The numeric code the portal expects for this kind.
    pub fn code(self) -> u8 {
        match self {
            MaterialKind::Slides => 2,
            MaterialKind::Notes => 3,
            MaterialKind::Assignments => 4,
            MaterialKind::QuestionBank => 5,
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaterialKind::Slides => "slides",
            MaterialKind::Notes => "notes",
            MaterialKind::Assignments => "assignments",
            MaterialKind::QuestionBank => "question bank",
        };
        write!(f, "{}", name)
    }
}

/// A course as listed on the "My Courses" page.
#[derive(Debug, Clone)]
pub struct Course {
    /// Opaque identifier used by the content controller.
    pub id: String,
    /// Course code, e.g. "UE22CS252B".
    pub code: String,
    /// Course title as displayed in the portal.
    pub title: String,
    /// Semester the course was fetched for (1-8).
    pub semester: u8,
}

/// A unit within a course. Units are displayed in portal order; the
/// position in [`CourseContent::units`] determines the unit number.
#[derive(Debug, Clone)]
pub struct Unit {
    pub id: String,
    pub title: String,
    pub topics: Vec<Topic>,
}

/// A topic within a unit.
#[derive(Debug, Clone)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub materials: Vec<Material>,
}

/// A single downloadable material attached to a topic.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Display title. File extensions are resolved at download time, so
    /// this may or may not carry one.
    pub title: String,
    /// Absolute download URL.
    pub url: String,
    pub kind: MaterialKind,
}

/// The full content tree of one course, fetched up front so that
/// traversal and download never interleave with further portal calls.
#[derive(Debug, Clone)]
pub struct CourseContent {
    pub course: Course,
    pub units: Vec<Unit>,
}
