//! HTML extraction for portal pages.
//!
//! The portal renders everything server-side, so each page or fragment is
//! parsed with CSS selectors. The contract with the markup:
//!
//! - CSRF token: `meta[name='csrf-token']` on full pages, with a hidden
//!   `input[name='_csrf']` fallback on the login form.
//! - Semester picker: `select#batchClassId`, options labelled `Sem-<n>`.
//! - Course listing: `table.course-list` rows, one course per row with the
//!   controller id on the row (or in its `onclick` handler).
//! - Unit listing: `li.courselist_expandable` entries.
//! - Topic listing: `table.topic-list` rows.
//! - Materials: anchors inside `div.material-list`.

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::portal::types::{Course, Material, MaterialKind, Topic, Unit};

/// Extracts the Spring Security CSRF token from a portal page.
pub fn csrf_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let meta = Selector::parse("meta[name='csrf-token']").ok()?;
    if let Some(token) = document
        .select(&meta)
        .next()
        .and_then(|el| el.value().attr("content"))
    {
        return Some(token.to_string());
    }
    let input = Selector::parse("input[name='_csrf']").ok()?;
    document
        .select(&input)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(str::to_string)
}

/// True when the page still carries the login form, i.e. the session is
/// not (or no longer) authenticated.
pub fn is_login_page(html: &str) -> bool {
    let document = Html::parse_document(html);
    let Ok(username_input) = Selector::parse("input[name='j_username']") else {
        return false;
    };
    document.select(&username_input).next().is_some()
}

/// Parses the semester dropdown into `(semester number, batch class id)`
/// pairs, preserving portal order.
pub fn semester_options(html: &str) -> Vec<(u8, String)> {
    let document = Html::parse_document(html);
    let Ok(option_selector) = Selector::parse("select#batchClassId option") else {
        return Vec::new();
    };

    let mut options = Vec::new();
    for option in document.select(&option_selector) {
        let Some(value) = option.value().attr("value") else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        let label = option.text().collect::<String>();
        let Some(number) = semester_number(&label) else {
            continue;
        };
        options.push((number, value.to_string()));
    }
    options
}

/// Parses the course table into [`Course`] values for the given semester.
pub fn course_rows(html: &str, semester: u8) -> Vec<Course> {
    let document = Html::parse_document(html);
    let (Ok(row_selector), Ok(cell_selector)) = (
        Selector::parse("table.course-list tbody tr"),
        Selector::parse("td"),
    ) else {
        return Vec::new();
    };

    let mut courses = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|cell| normalize_whitespace(&cell.text().collect::<String>()))
            .collect();
        if cells.len() < 2 {
            continue;
        }
        let id = match row.value().attr("id") {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let Some(id) = row.value().attr("onclick").and_then(onclick_argument) else {
                    tracing::debug!("Skipping course row without an id: {:?}", cells);
                    continue;
                };
                id
            }
        };
        courses.push(Course {
            id,
            code: cells[0].clone(),
            title: cells[1].clone(),
            semester,
        });
    }
    courses
}

/// Parses the unit listing of a course page. Topics are filled in by
/// follow-up requests, so each unit starts out empty.
pub fn unit_list(html: &str) -> Vec<Unit> {
    let document = Html::parse_document(html);
    let (Ok(item_selector), Ok(link_selector)) = (
        Selector::parse("li.courselist_expandable"),
        Selector::parse("a"),
    ) else {
        return Vec::new();
    };

    let mut units = Vec::new();
    for item in document.select(&item_selector) {
        let Some(id) = item.value().attr("id") else {
            continue;
        };
        let title = item
            .select(&link_selector)
            .next()
            .map(|link| link.text().collect::<String>())
            .unwrap_or_else(|| item.text().collect::<String>());
        units.push(Unit {
            id: id.to_string(),
            title: normalize_whitespace(&title),
            topics: Vec::new(),
        });
    }
    units
}

/// Parses the topic table of an expanded unit.
pub fn topic_rows(html: &str) -> Vec<Topic> {
    let document = Html::parse_document(html);
    let (Ok(row_selector), Ok(cell_selector)) = (
        Selector::parse("table.topic-list tbody tr"),
        Selector::parse("td"),
    ) else {
        return Vec::new();
    };

    let mut topics = Vec::new();
    for row in document.select(&row_selector) {
        let Some(id) = row.value().attr("id") else {
            continue;
        };
        let Some(title) = row
            .select(&cell_selector)
            .next()
            .map(|cell| normalize_whitespace(&cell.text().collect::<String>()))
        else {
            continue;
        };
        topics.push(Topic {
            id: id.to_string(),
            title,
            materials: Vec::new(),
        });
    }
    topics
}

/// Parses the material links of a topic fragment. Relative hrefs are
/// resolved against `base`; unresolvable ones are skipped.
pub fn material_links(html: &str, base: &Url, kind: MaterialKind) -> Vec<Material> {
    let document = Html::parse_document(html);
    let Ok(link_selector) = Selector::parse("div.material-list a[href]") else {
        return Vec::new();
    };

    let mut materials = Vec::new();
    for link in document.select(&link_selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Ok(url) = base.join(href) else {
            tracing::debug!("Skipping material with unresolvable href: {}", href);
            continue;
        };
        let title = normalize_whitespace(&link.text().collect::<String>());
        let title = if title.is_empty() {
            "material".to_string()
        } else {
            title
        };
        materials.push(Material {
            title,
            url: url.to_string(),
            kind,
        });
    }
    materials
}

/// Pulls the first quoted argument out of an inline onclick handler,
/// e.g. `handleCourseClick('abc123')`.
fn onclick_argument(onclick: &str) -> Option<String> {
    let pattern = Regex::new(r"'([^']+)'").ok()?;
    pattern
        .captures(onclick)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn semester_number(label: &str) -> Option<u8> {
    label.trim().strip_prefix("Sem-")?.trim().parse().ok()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
