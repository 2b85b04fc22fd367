//! Page markup parsing.
//!
//! The page is read with `quick_xml`, so it has to be XHTML-compatible:
//! quoted attributes and balanced tags. HTML void elements (`<meta>`, `<br>`,
//! ...) are accepted without a closing slash.

use super::{Document, NodeId};
use quick_xml::Reader;
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::Event;
use std::borrow::Cow;
use thiserror::Error;

/// Elements that never have children or an end tag.
pub(super) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Markup parsing errors.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("malformed markup at byte {position}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("unclosed element `<{0}>` at end of input")]
    Unclosed(String),
}

#[inline]
pub(super) fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Resolve `&name;` against the HTML5 entity table, keeping unknown
/// entities literally.
fn resolve_entity(name: &str) -> String {
    let reference = format!("&{name};");
    match unescape_with(&reference, resolve_html5_entity) {
        Ok(resolved) => resolved.into_owned(),
        Err(_) => reference,
    }
}

/// Decode raw text, falling back to the raw bytes on bad escapes.
fn decode_text(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    match unescape_with(&text, resolve_html5_entity) {
        Ok(Cow::Borrowed(_)) | Err(_) => text.into_owned(),
        Ok(Cow::Owned(unescaped)) => unescaped,
    }
}

pub(super) fn parse_document(markup: &str) -> Result<Document, MarkupError> {
    let mut doc = Document::new();
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);

    // Open elements, innermost last. The root is never popped.
    let mut stack: Vec<NodeId> = vec![doc.root()];

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|source| MarkupError::Xml { position, source })?;
        let parent = *stack.last().unwrap_or(&doc.root());

        match event {
            Event::Start(elem) => {
                let tag = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
                let node = open_element(&mut doc, parent, &tag, elem.html_attributes());
                if !is_void(&tag) {
                    stack.push(node);
                }
            }
            Event::Empty(elem) => {
                let tag = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
                open_element(&mut doc, parent, &tag, elem.html_attributes());
            }
            Event::End(elem) => {
                let tag = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
                if is_void(&tag) {
                    continue;
                }
                // Pop up to the matching element; stray end tags are ignored.
                if let Some(depth) = stack
                    .iter()
                    .rposition(|&n| doc.tag(n).is_some_and(|t| t.eq_ignore_ascii_case(&tag)))
                {
                    stack.truncate(depth);
                }
            }
            Event::Text(text) => {
                let text = decode_text(&text);
                if !text.is_empty() {
                    doc.append_text(parent, &text);
                }
            }
            Event::GeneralRef(reference) => {
                let name = String::from_utf8_lossy(&reference).into_owned();
                doc.append_text(parent, &resolve_entity(&name));
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                doc.append_text(parent, &text);
            }
            Event::DocType(_) => doc.doctype = true,
            Event::Eof => break,
            // Comments, declarations and processing instructions are dropped.
            _ => {}
        }
    }

    if let Some(&open) = stack.get(1) {
        let tag = doc.tag(open).unwrap_or_default().to_owned();
        return Err(MarkupError::Unclosed(tag));
    }

    // Parsing is not a mutation: start the page with an empty insertion feed.
    doc.take_inserted();
    Ok(doc)
}

fn open_element(
    doc: &mut Document,
    parent: NodeId,
    tag: &str,
    attributes: quick_xml::events::attributes::Attributes<'_>,
) -> NodeId {
    let node = doc.create_element(tag);
    // Valueless attributes (`disabled`, `defer`) come through with an empty value.
    for attr in attributes.flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = decode_text(&attr.value);
        doc.set_attr(node, &key, &value);
    }
    doc.append_child(parent, node);
    node
}
