//! Filename generation and manipulation.
//!
//! Portal titles are free-form text, so everything that ends up on disk
//! goes through [`sanitize_component`]. Extension resolution prefers the
//! Content-Disposition header, then the URL, then the MIME type.

use std::path::{Path, PathBuf};

/// Longest path component we will produce, in characters.
const MAX_COMPONENT_CHARS: usize = 255;

/// Names Windows refuses regardless of extension.
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Turns an arbitrary portal title into a safe path component.
///
/// Total by construction: separators and other invalid characters become
/// underscores, leading/trailing dots and spaces are stripped (which also
/// neutralizes `..`), reserved Windows names get a `file_` prefix, and an
/// empty result falls back to `unnamed`.
pub fn sanitize_component(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = sanitized.trim_matches([' ', '.']);

    let named = if trimmed.is_empty() {
        "unnamed".to_string()
    } else if RESERVED_NAMES.contains(&trimmed.to_ascii_uppercase().as_str()) {
        format!("file_{}", trimmed)
    } else {
        trimmed.to_string()
    };

    if named.chars().count() > MAX_COMPONENT_CHARS {
        let clipped: String = named.chars().take(MAX_COMPONENT_CHARS - 3).collect();
        format!("{}...", clipped)
    } else {
        named
    }
}

/// Generate a unique path by appending a counter if the file exists.
/// The first alternative is `name_2.ext`, matching how people number
/// duplicates by hand.
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parent = path.parent().unwrap_or(Path::new("."));

    let mut counter = 2;
    loop {
        let candidate = if ext.is_empty() {
            format!("{}_{}", stem, counter)
        } else {
            format!("{}_{}.{}", stem, counter, ext)
        };

        let candidate_path = parent.join(&candidate);
        if !candidate_path.exists() {
            return candidate_path;
        }

        counter += 1;
        if counter > 1000 {
            // Safety limit
            return candidate_path;
        }
    }
}

/// Extracts a file extension from a Content-Disposition header value.
pub fn extension_from_disposition(value: &str) -> Option<String> {
    let filename = disposition_filename(value)?;
    extension_of(&filename)
}

/// Extracts a file extension from a download URL, ignoring query and
/// fragment parts.
pub fn extension_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next()?;
    extension_of(name)
}

/// Maps a Content-Type header value to a file extension. The generic
/// `application/octet-stream` is deliberately unmapped so the caller can
/// fall through to its default.
pub fn extension_from_content_type(value: &str) -> Option<String> {
    let mime = value.split(';').next().unwrap_or(value).trim();
    if mime.eq_ignore_ascii_case("application/octet-stream") {
        return None;
    }
    mime_guess::get_mime_extensions_str(mime)
        .and_then(|extensions| extensions.first())
        .map(|extension| extension.to_string())
}

/// Canonicalizes an extension for output. Legacy `.ppt` exports are
/// served as PowerPoint XML by the portal, hence the rename.
pub fn normalize_extension(extension: &str) -> String {
    let lowered = extension.to_ascii_lowercase();
    if lowered == "ppt" {
        "pptx".to_string()
    } else {
        lowered
    }
}

/// Drops a trailing `.{extension}` from a stem so titles that already
/// carry their extension do not end up as `name.pdf.pdf`.
pub fn strip_matching_extension<'a>(stem: &'a str, extension: &str) -> &'a str {
    let dotted = format!(".{}", extension);
    if stem.len() > dotted.len() {
        let split = stem.len() - dotted.len();
        if stem.is_char_boundary(split) && stem[split..].eq_ignore_ascii_case(&dotted) {
            return &stem[..split];
        }
    }
    stem
}

/// The `filename` (or `filename*`) parameter of a Content-Disposition
/// header. Quoting and the RFC 5987 charset prefix are stripped; the
/// value is otherwise taken as-is.
fn disposition_filename(value: &str) -> Option<String> {
    for part in value.split(';') {
        let Some((key, val)) = part.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        if key != "filename" && key != "filename*" {
            continue;
        }
        let val = val.trim().trim_matches('"');
        let val = val.rsplit_once("''").map_or(val, |(_, name)| name);
        if !val.is_empty() {
            return Some(val.to_string());
        }
    }
    None
}

fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.len() > 10 {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
