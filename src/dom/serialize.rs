//! HTML serialization.

use super::{Document, NodeId, NodeKind, parse::is_void};
use quick_xml::escape::{escape, partial_escape};
use std::fmt::Write;

pub(super) fn document_to_html(doc: &Document) -> String {
    let mut out = String::new();
    if doc.doctype {
        out.push_str("<!DOCTYPE html>");
    }
    write_children(doc, doc.root(), &mut out);
    out
}

pub(super) fn children_to_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_children(doc, node, &mut out);
    out
}

fn write_children(doc: &Document, node: NodeId, out: &mut String) {
    for &child in doc.children(node) {
        write_node(doc, child, out);
    }
}

fn write_node(doc: &Document, node: NodeId, out: &mut String) {
    let Some(kind) = doc.kind(node) else {
        return;
    };
    match kind {
        NodeKind::Root => write_children(doc, node, out),
        NodeKind::Text(text) => out.push_str(&partial_escape(text.as_str())),
        NodeKind::Raw(markup) => out.push_str(markup),
        NodeKind::Element(elem) => {
            let _ = write!(out, "<{}", elem.tag);
            if !elem.classes.is_empty() {
                let classes = elem.classes.iter().map(|c| c.as_str()).collect::<Vec<_>>();
                let _ = write!(out, r#" class="{}""#, escape(classes.join(" ").as_str()));
            }
            for (key, value) in &elem.attrs {
                let _ = write!(out, r#" {key}="{}""#, escape(value.as_str()));
            }
            out.push('>');

            if is_void(&elem.tag) {
                return;
            }
            write_children(doc, node, out);
            let _ = write!(out, "</{}>", elem.tag);
        }
    }
}
