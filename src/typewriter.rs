//! Typewriter text effect.
//!
//! The element's text is captured and cleared at startup, then typed back one
//! character per timer tick. The host drives the ticks at the configured
//! interval.

use crate::dom::{Document, NodeId};

#[derive(Debug, Clone)]
pub struct Typewriter {
    node: Option<NodeId>,
    text: Vec<char>,
    typed: usize,
}

impl Typewriter {
    /// Capture and clear the text of `node`. An absent node gives an inert
    /// typewriter that is already finished.
    pub fn initialize(doc: &mut Document, node: Option<NodeId>) -> Self {
        let text = match node {
            Some(node) => {
                let text = doc.text_content(node).chars().collect();
                doc.set_text(node, "");
                text
            }
            None => Vec::new(),
        };
        Self {
            node,
            text,
            typed: 0,
        }
    }

    /// Type the next character. Returns `false` once everything is typed.
    pub fn tick(&mut self, doc: &mut Document) -> bool {
        let (Some(node), Some(&ch)) = (self.node, self.text.get(self.typed)) else {
            return false;
        };
        let mut buf = [0u8; 4];
        doc.append_text(node, ch.encode_utf8(&mut buf));
        self.typed += 1;
        true
    }

    /// Whether an element was captured at startup.
    pub fn is_enabled(&self) -> bool {
        self.node.is_some()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.typed >= self.text.len()
    }

    /// Text typed so far.
    pub fn typed(&self) -> String {
        self.text[..self.typed].iter().collect()
    }
}
