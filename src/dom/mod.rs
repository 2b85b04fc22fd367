//! Owned document model the page components operate on.
//!
//! The document is an arena of nodes addressed by [`NodeId`]. Replacing the
//! children of a node releases the old subtree: its slots go back on a free
//! list and every id into it turns stale. A stale id reads as an empty,
//! parentless node and mutations through it are ignored, so an id held past
//! a re-render never aliases the node that later reuses its slot. Nodes that
//! are only detached stay alive and can be appended again.
//!
//! # Insertion feed
//!
//! Every node appended to a parent is recorded. Watchers drain the feed with
//! [`Document::take_inserted`], which stands in for subtree mutation
//! observation in a browser:
//!
//! ```text
//! Renderer ── append_child ──► inserted: [card, p, h3, ...]
//!                                   │
//! VisibilityBridge ◄── take_inserted┘  (filters to tagged elements)
//! ```

mod parse;
mod serialize;

pub use parse::MarkupError;

use compact_str::CompactString;
use smallvec::SmallVec;

const SCROLL_LOCK_STYLE: &str = "overflow: hidden";

/// Slot of a node inside a [`Document`], tagged with the slot's generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.index as usize
    }
}

/// Element data: tag, classes and the remaining attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: CompactString,
    pub classes: SmallVec<[CompactString; 4]>,
    pub attrs: Vec<(CompactString, String)>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: CompactString::new(tag.to_ascii_lowercase()),
            classes: SmallVec::new(),
            attrs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Synthetic root holding the top-level nodes.
    Root,
    Element(Element),
    Text(String),
    /// Markup inserted verbatim (inner HTML), serialized without escaping.
    Raw(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Bumped each time the slot is released.
    generation: u32,
}

/// Arena-backed document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    /// Released slots, reused by the next allocations.
    free: Vec<u32>,
    /// Nodes appended since the last [`Document::take_inserted`].
    inserted: Vec<NodeId>,
    /// Page-wide scroll lock, mirrored as `overflow: hidden` on `<body>`.
    scroll_locked: bool,
    /// `<body>` style in effect before the lock, restored on unlock.
    body_style: Option<String>,
    /// Whether the source markup carried a doctype.
    doctype: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
                generation: 0,
            }],
            free: Vec::new(),
            inserted: Vec::new(),
            scroll_locked: false,
            body_style: None,
            doctype: false,
        }
    }

    /// Parse XHTML-compatible page markup.
    pub fn parse(markup: &str) -> Result<Self, MarkupError> {
        parse::parse_document(markup)
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        serialize::document_to_html(self)
    }

    /// Serialize the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        serialize::children_to_html(self, node)
    }

    #[inline]
    pub const fn root(&self) -> NodeId {
        NodeId {
            index: 0,
            generation: 0,
        }
    }

    /// Live nodes, attached or detached, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    fn slot(&self, node: NodeId) -> Option<&Node> {
        self.nodes
            .get(node.index())
            .filter(|slot| slot.generation == node.generation)
    }

    fn slot_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(node.index())
            .filter(|slot| slot.generation == node.generation)
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    fn push(&mut self, kind: NodeKind) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.nodes[index as usize];
            slot.kind = kind;
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.nodes.len() as u32;
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
            generation: 0,
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Return the subtree of a detached `node` to the free list.
    fn release(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(slot) = self.slot_mut(id) else {
                continue;
            };
            stack.append(&mut slot.children);
            slot.kind = NodeKind::Text(String::new());
            slot.parent = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index);
        }
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(Element::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.slot(parent).is_none() || self.slot(child).is_none() {
            return;
        }
        self.detach(child);
        if let Some(slot) = self.slot_mut(child) {
            slot.parent = Some(parent);
        }
        if let Some(slot) = self.slot_mut(parent) {
            slot.children.push(child);
        }
        self.inserted.push(child);
    }

    /// Remove `node` from its parent. The subtree stays in the arena.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.slot_mut(node).and_then(|slot| slot.parent.take()) else {
            return;
        };
        if let Some(slot) = self.slot_mut(parent) {
            slot.children.retain(|&c| c != node);
        }
    }

    /// Replace all children of `parent` with `children`, in order. Old
    /// children not among the new ones are released.
    pub fn replace_children(&mut self, parent: NodeId, children: impl IntoIterator<Item = NodeId>) {
        let Some(slot) = self.slot_mut(parent) else {
            return;
        };
        let old = std::mem::take(&mut slot.children);
        for &child in &old {
            if let Some(slot) = self.slot_mut(child) {
                slot.parent = None;
            }
        }
        for child in children {
            self.append_child(parent, child);
        }
        for child in old {
            if self.parent(child).is_none() {
                self.release(child);
            }
        }
    }

    /// Replace the content of `node` with a single text node (`textContent`).
    /// A lone text child is rewritten in place.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(NodeKind::Text(existing)) = self.only_child_kind_mut(node) {
            existing.clear();
            existing.push_str(text);
            return;
        }
        let text = self.create_text(text);
        self.replace_children(node, [text]);
    }

    /// Replace the content of `node` with verbatim markup (`innerHTML`).
    /// A lone raw child is rewritten in place.
    pub fn set_inner_markup(&mut self, node: NodeId, markup: &str) {
        if let Some(NodeKind::Raw(existing)) = self.only_child_kind_mut(node) {
            existing.clear();
            existing.push_str(markup);
            return;
        }
        let raw = self.push(NodeKind::Raw(markup.to_owned()));
        self.replace_children(node, [raw]);
    }

    /// Append text to the content of `node`.
    pub fn append_text(&mut self, node: NodeId, text: &str) {
        if let Some(&last) = self.children(node).last()
            && let Some(NodeKind::Text(existing)) = self.kind_mut(last)
        {
            existing.push_str(text);
            return;
        }
        let text = self.create_text(text);
        self.append_child(node, text);
    }

    fn only_child_kind_mut(&mut self, node: NodeId) -> Option<&mut NodeKind> {
        let only = match self.children(node) {
            [only] => *only,
            _ => return None,
        };
        self.kind_mut(only)
    }

    // ------------------------------------------------------------------------
    // Insertion feed
    // ------------------------------------------------------------------------

    /// Drain the nodes appended since the previous call, in insertion order.
    pub fn take_inserted(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.inserted)
    }

    // ------------------------------------------------------------------------
    // Tree queries
    // ------------------------------------------------------------------------

    /// `None` for a stale id.
    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.slot(node).map(|slot| &slot.kind)
    }

    fn kind_mut(&mut self, node: NodeId) -> Option<&mut NodeKind> {
        self.slot_mut(node).map(|slot| &mut slot.kind)
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.kind(node)? {
            NodeKind::Element(elem) => Some(elem),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match self.kind_mut(node)? {
            NodeKind::Element(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slot(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.slot(node).map_or(&[], |slot| &slot.children)
    }

    /// Element children only.
    pub fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|&c| self.element(c).is_some())
            .collect()
    }

    /// Whether `node` is `ancestor` or lies inside its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether `node` is attached to the document root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root(), node)
    }

    /// Subtree of `node` in document order, `node` included.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Concatenated text of the subtree. Raw markup contributes as-is.
    pub fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .into_iter()
            .filter_map(|id| match self.kind(id)? {
                NodeKind::Text(text) | NodeKind::Raw(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// First connected element with the given `id` attribute.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&n| self.attr(n, "id") == Some(id))
    }

    /// Connected elements carrying `class`, in document order.
    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    /// Connected elements with the given tag, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&n| self.tag(n).is_some_and(|t| t.eq_ignore_ascii_case(tag)))
            .collect()
    }

    /// Nearest inclusive ancestor of `node` carrying attribute `name`.
    pub fn closest_with_attr(&self, node: NodeId, name: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.attr(id, name).is_some() {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    pub fn body(&self) -> Option<NodeId> {
        self.elements_by_tag("body").into_iter().next()
    }

    // ------------------------------------------------------------------------
    // Attributes and classes
    // ------------------------------------------------------------------------

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if name == "class" {
            self.set_class_list(node, value);
            return;
        }
        let Some(elem) = self.element_mut(node) else {
            return;
        };
        match elem.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_owned(),
            None => elem.attrs.push((name.into(), value.to_owned())),
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(elem) = self.element_mut(node) {
            elem.attrs.retain(|(k, _)| k != name);
        }
    }

    fn set_class_list(&mut self, node: NodeId, value: &str) {
        if let Some(elem) = self.element_mut(node) {
            elem.classes = value.split_whitespace().map(CompactString::from).collect();
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|e| e.classes.iter().any(|c| c.as_str() == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        if let Some(elem) = self.element_mut(node) {
            elem.classes.push(class.into());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(elem) = self.element_mut(node) {
            elem.classes.retain(|c| c.as_str() != class);
        }
    }

    // ------------------------------------------------------------------------
    // Scroll lock
    // ------------------------------------------------------------------------

    /// Suppress background scrolling by adding `overflow: hidden` to the
    /// `<body>` style. Idempotent.
    pub fn lock_scroll(&mut self) {
        if self.scroll_locked {
            return;
        }
        self.scroll_locked = true;
        let Some(body) = self.body() else {
            return;
        };
        let previous = self.attr(body, "style").map(str::to_owned);
        let locked = match previous.as_deref().map(|s| s.trim().trim_end_matches(';').trim_end()) {
            Some(style) if !style.is_empty() => format!("{style}; {SCROLL_LOCK_STYLE}"),
            _ => SCROLL_LOCK_STYLE.to_owned(),
        };
        self.set_attr(body, "style", &locked);
        self.body_style = previous;
    }

    /// Release the scroll lock, putting back the `<body>` style it replaced.
    /// A no-op while unlocked.
    pub fn unlock_scroll(&mut self) {
        if !self.scroll_locked {
            return;
        }
        self.scroll_locked = false;
        let previous = self.body_style.take();
        let Some(body) = self.body() else {
            return;
        };
        match previous {
            Some(style) => self.set_attr(body, "style", &style),
            None => self.remove_attr(body, "style"),
        }
    }

    #[inline]
    pub const fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_doc() -> (Document, NodeId) {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        let root = doc.root();
        doc.append_child(root, body);
        let list = doc.create_element("ul");
        doc.set_attr(list, "id", "list");
        doc.append_child(body, list);
        (doc, list)
    }

    #[test]
    fn test_replace_children_detaches_old_nodes() {
        let (mut doc, list) = list_doc();
        let a = doc.create_element("li");
        doc.append_child(list, a);
        let b = doc.create_element("li");
        doc.replace_children(list, [b]);

        assert_eq!(doc.children(list), &[b]);
        assert_eq!(doc.parent(a), None);
        assert!(!doc.is_connected(a));
        assert!(doc.is_connected(b));
    }

    #[test]
    fn test_take_inserted_drains_feed() {
        let (mut doc, list) = list_doc();
        doc.take_inserted();

        let item = doc.create_element("li");
        doc.append_child(list, item);
        assert_eq!(doc.take_inserted(), vec![item]);
        assert!(doc.take_inserted().is_empty());
    }

    #[test]
    fn test_lookup_skips_detached_nodes() {
        let (mut doc, list) = list_doc();
        let item = doc.create_element("li");
        doc.set_attr(item, "id", "item");
        doc.add_class(item, "fade-in");
        doc.append_child(list, item);
        assert_eq!(doc.get_element_by_id("item"), Some(item));

        doc.replace_children(list, []);
        assert_eq!(doc.get_element_by_id("item"), None);
        assert!(doc.elements_by_class("fade-in").is_empty());
    }

    #[test]
    fn test_class_list_operations() {
        let (mut doc, list) = list_doc();
        doc.add_class(list, "a");
        doc.add_class(list, "a");
        doc.add_class(list, "b");
        assert_eq!(doc.element(list).unwrap().classes.len(), 2);

        doc.remove_class(list, "a");
        assert!(!doc.has_class(list, "a"));
        assert!(doc.has_class(list, "b"));

        doc.set_attr(list, "class", "x  y");
        assert!(doc.has_class(list, "x"));
        assert!(doc.has_class(list, "y"));
        assert!(!doc.has_class(list, "b"));
    }

    #[test]
    fn test_closest_with_attr() {
        let (mut doc, list) = list_doc();
        let item = doc.create_element("li");
        doc.set_attr(item, "data-slug", "a");
        let span = doc.create_element("span");
        doc.append_child(list, item);
        doc.append_child(item, span);

        assert_eq!(doc.closest_with_attr(span, "data-slug"), Some(item));
        assert_eq!(doc.closest_with_attr(list, "data-slug"), None);
    }

    #[test]
    fn test_text_content_and_append_text() {
        let (mut doc, list) = list_doc();
        doc.set_text(list, "he");
        doc.append_text(list, "llo");
        assert_eq!(doc.text_content(list), "hello");
        assert_eq!(doc.children(list).len(), 1);
    }

    #[test]
    fn test_scroll_lock_mirrors_body_style() {
        let (mut doc, _) = list_doc();
        let body = doc.body().unwrap();

        doc.lock_scroll();
        assert!(doc.is_scroll_locked());
        assert_eq!(doc.attr(body, "style"), Some("overflow: hidden"));

        doc.unlock_scroll();
        doc.unlock_scroll();
        assert!(!doc.is_scroll_locked());
        assert_eq!(doc.attr(body, "style"), None);
    }

    #[test]
    fn test_scroll_lock_keeps_existing_body_style() {
        let (mut doc, _) = list_doc();
        let body = doc.body().unwrap();
        doc.set_attr(body, "style", "background: red;");

        // Unlocking while unlocked leaves the style alone
        doc.unlock_scroll();
        assert_eq!(doc.attr(body, "style"), Some("background: red;"));

        doc.lock_scroll();
        doc.lock_scroll();
        assert_eq!(doc.attr(body, "style"), Some("background: red; overflow: hidden"));

        doc.unlock_scroll();
        assert_eq!(doc.attr(body, "style"), Some("background: red;"));
    }

    #[test]
    fn test_replaced_nodes_are_released() {
        let (mut doc, list) = list_doc();
        let a = doc.create_element("li");
        let span = doc.create_element("span");
        doc.append_child(a, span);
        doc.append_child(list, a);
        let before = doc.node_count();
        let arena = doc.nodes.len();

        doc.replace_children(list, []);
        assert_eq!(doc.node_count(), before - 2);
        assert_eq!(doc.kind(a), None);
        assert_eq!(doc.tag(span), None);

        // The slot is reused under a fresh id; the stale one stays dead
        let b = doc.create_element("li");
        assert_ne!(a, b);
        assert_ne!(span, b);
        assert_eq!(doc.nodes.len(), arena);
        doc.append_child(a, span);
        doc.set_attr(a, "id", "stale");
        assert_eq!(doc.tag(b), Some("li"));
        assert_eq!(doc.attr(b, "id"), None);
        assert!(doc.children(b).is_empty());
    }

    #[test]
    fn test_replace_children_keeps_reappended_child() {
        let (mut doc, list) = list_doc();
        let a = doc.create_element("li");
        let b = doc.create_element("li");
        doc.append_child(list, a);
        doc.append_child(list, b);

        doc.replace_children(list, [b]);
        assert_eq!(doc.children(list), &[b]);
        assert_eq!(doc.tag(b), Some("li"));
        assert_eq!(doc.kind(a), None);
    }

    #[test]
    fn test_content_setters_reuse_nodes() {
        let (mut doc, list) = list_doc();
        doc.set_text(list, "first");
        let text = doc.children(list)[0];
        let before = doc.node_count();

        for i in 0..100 {
            doc.set_text(list, &format!("post {i}"));
        }
        assert_eq!(doc.children(list), &[text]);
        assert_eq!(doc.text_content(list), "post 99");
        assert_eq!(doc.node_count(), before);

        doc.set_inner_markup(list, "<p>a</p>");
        let len = doc.nodes.len();
        for _ in 0..100 {
            doc.set_inner_markup(list, "<p>b</p>");
        }
        assert_eq!(doc.inner_html(list), "<p>b</p>");
        assert_eq!(doc.nodes.len(), len);
    }
}
