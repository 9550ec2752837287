//! Merging staged PDFs into one document per unit.
//!
//! The merge renumbers every input's objects into one id space, reparents
//! all pages under a single Pages node, and adds one bookmark per input
//! so the merged file keeps a navigable outline. Output goes to a byte
//! buffer; the caller decides whether anything reaches disk, so a failed
//! merge never leaves a partial file behind.

use std::collections::BTreeMap;
use std::path::PathBuf;

use lopdf::{Bookmark, Document, Object, ObjectId};

use crate::error::{Error, Result};

/// One staged file going into a unit's merged PDF.
#[derive(Debug, Clone)]
pub struct MergeInput {
    /// Material title, used as the bookmark for the file's first page.
    pub title: String,
    /// Location of the staged download.
    pub path: PathBuf,
}

/// Loads and merges staged files, returning the serialized document.
/// Any unparsable input fails the whole merge; partial units are worse
/// than absent ones.
pub fn merge_files(inputs: &[MergeInput]) -> Result<Vec<u8>> {
    if inputs.is_empty() {
        return Err(Error::Merge("no input documents".to_string()));
    }

    let mut documents = Vec::with_capacity(inputs.len());
    for input in inputs {
        let document = Document::load(&input.path).map_err(|err| {
            Error::Merge(format!("could not parse '{}': {}", input.title, err))
        })?;
        documents.push((input.title.clone(), document));
    }

    let mut merged = merge_documents(documents)?;
    let mut buffer = Vec::new();
    merged.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Merges parsed documents into one, bookmarking the first page of each.
pub fn merge_documents(inputs: Vec<(String, Document)>) -> Result<Document> {
    let mut max_id = 1;
    let mut document = Document::with_version("1.5");
    // BTreeMap keyed by ObjectId keeps pages in input order because each
    // document is renumbered into an increasing id range.
    let mut documents_pages: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut documents_objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for (title, mut doc) in inputs {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        for (index, (_, object_id)) in doc.get_pages().into_iter().enumerate() {
            if index == 0 {
                let bookmark = Bookmark::new(title.clone(), [0.0, 0.0, 1.0], 0, object_id);
                document.add_bookmark(bookmark, None);
            }
            let page = doc.get_object(object_id)?.to_owned();
            documents_pages.insert(object_id, page);
        }
        documents_objects.extend(doc.objects);
    }

    let mut catalog_object: Option<(ObjectId, Object)> = None;
    let mut pages_object: Option<(ObjectId, Object)> = None;

    // Fold every non-page object into the output, keeping the first
    // Catalog and a merged Pages dictionary. Outline objects are dropped;
    // a fresh outline is rebuilt from the bookmarks at the end.
    for (object_id, object) in documents_objects.iter() {
        match object.type_name().unwrap_or("") {
            "Catalog" => {
                catalog_object = Some((
                    if let Some((id, _)) = catalog_object {
                        id
                    } else {
                        *object_id
                    },
                    object.clone(),
                ));
            }
            b"Pages" => {
                if let Ok(dictionary) = object.as_dict() {
                    let mut dictionary = dictionary.clone();
                    if let Some((_, ref existing)) = pages_object {
                        if let Ok(existing_dictionary) = existing.as_dict() {
                            dictionary.extend(existing_dictionary);
                        }
                    }
                    pages_object = Some((
                        if let Some((id, _)) = pages_object {
                            id
                        } else {
                            *object_id
                        },
                        Object::Dictionary(dictionary),
                    ));
                }
            }
            b"Page" => {}
            b"Outlines" => {}
            b"Outline" => {}
            _ => {
                document.objects.insert(*object_id, object.clone());
            }
        }
    }

    let Some(pages_object) = pages_object else {
        return Err(Error::Merge("inputs contain no Pages object".to_string()));
    };
    let Some(catalog_object) = catalog_object else {
        return Err(Error::Merge("inputs contain no Catalog object".to_string()));
    };

    // Reparent every page under the surviving Pages node.
    for (object_id, object) in documents_pages.iter() {
        if let Ok(dictionary) = object.as_dict() {
            let mut dictionary = dictionary.clone();
            dictionary.set("Parent", pages_object.0);
            document
                .objects
                .insert(*object_id, Object::Dictionary(dictionary));
        }
    }

    if let Ok(dictionary) = pages_object.1.as_dict() {
        let mut dictionary = dictionary.clone();
        dictionary.set("Count", documents_pages.len() as u32);
        dictionary.set(
            "Kids",
            documents_pages
                .keys()
                .map(|object_id| Object::Reference(*object_id))
                .collect::<Vec<_>>(),
        );
        document
            .objects
            .insert(pages_object.0, Object::Dictionary(dictionary));
    }

    if let Ok(dictionary) = catalog_object.1.as_dict() {
        let mut dictionary = dictionary.clone();
        dictionary.set("Pages", pages_object.0);
        dictionary.remove(b"Outlines");
        document
            .objects
            .insert(catalog_object.0, Object::Dictionary(dictionary));
    }

    document.trailer.set("Root", catalog_object.0);
    document.max_id = document.objects.len() as u32;
    document.renumber_objects();
    document.adjust_zero_pages();

    if let Some(outline_id) = document.build_outline() {
        if let Ok(Object::Dictionary(dict)) = document.get_object_mut(catalog_object.0) {
            dict.set("Outlines", Object::Reference(outline_id));
        }
    }

    document.compress();
    Ok(document)
}

/// Builds a minimal one-page document for tests, shared with the
/// merged-mode driver tests.
#[cfg(test)]
pub(crate) fn test_page(label: &str) -> Document {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal(label)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Serialized form of [`test_page`], for serving from mock servers.
#[cfg(test)]
pub(crate) fn test_page_bytes(label: &str) -> Vec<u8> {
    let mut buffer = Vec::new();
    test_page(label)
        .save_to(&mut buffer)
        .expect("test document serializes");
    buffer
}
