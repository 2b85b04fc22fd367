//! Navigation highlighting.
//!
//! On every scroll, the current section is the last one whose top offset
//! (minus a fixed lead) has been scrolled past; the nav link pointing at it
//! gets the active class, every other link loses it.
//!
//! Section offsets come from the page's `data-offset-top` attributes, filled
//! in by the host layout.

use crate::config::NavConfig;
use crate::dom::{Document, NodeId};
use crate::error::ComponentError;

const MODULE: &str = "nav";

/// Attribute carrying a section's top offset in pixels.
pub const OFFSET_ATTR: &str = "data-offset-top";

#[derive(Debug, Clone, PartialEq)]
struct Section {
    id: String,
    top: f64,
}

#[derive(Debug, Clone)]
pub struct NavHighlighter {
    links: Vec<NodeId>,
    sections: Vec<Section>,
    active_class: String,
    offset: f64,
    current: Option<String>,
}

impl NavHighlighter {
    /// Collect nav links and positioned sections. Without links there is
    /// nothing to highlight and the component is disabled.
    pub fn initialize(doc: &Document, config: &NavConfig) -> Result<Self, ComponentError> {
        let links = doc.elements_by_class(&config.link_class);
        if links.is_empty() {
            return Err(ComponentError::missing(format!(
                "navigation links `.{}`",
                config.link_class
            )));
        }

        let sections = doc
            .elements_by_class(&config.section_class)
            .into_iter()
            .filter_map(|node| {
                let id = doc.attr(node, "id")?;
                let top = doc.attr(node, OFFSET_ATTR)?.trim().parse::<f64>().ok()?;
                Some(Section {
                    id: id.to_owned(),
                    top,
                })
            })
            .collect::<Vec<_>>();

        crate::log!(MODULE; "{} links, {} sections", links.len(), sections.len());
        Ok(Self {
            links,
            sections,
            active_class: config.active_class.clone(),
            offset: config.offset,
            current: None,
        })
    }

    /// Id of the section the scroll position `y` is in.
    pub fn section_at(&self, y: f64) -> Option<&str> {
        self.sections
            .iter()
            .filter(|s| y >= s.top - self.offset)
            .last()
            .map(|s| s.id.as_str())
    }

    /// Re-highlight links for scroll position `y`.
    pub fn update(&mut self, doc: &mut Document, y: f64) {
        let current = self.section_at(y).map(str::to_owned);
        let target = current.as_ref().map(|id| format!("#{id}"));

        for &link in &self.links {
            doc.remove_class(link, &self.active_class);
            if target.is_some() && doc.attr(link, "href") == target.as_deref() {
                doc.add_class(link, &self.active_class);
            }
        }
        self.current = current;
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<body>
  <nav>
    <a class="nav__link" href="#home">Home</a>
    <a class="nav__link" href="#about">About</a>
    <a class="nav__link" href="#blog">Blog</a>
  </nav>
  <section id="home" class="section" data-offset-top="0"></section>
  <section id="about" class="section" data-offset-top="600"></section>
  <section id="blog" class="section" data-offset-top="1400"></section>
  <section id="unplaced" class="section"></section>
</body>"##;

    fn setup() -> (Document, NavHighlighter) {
        let doc = Document::parse(PAGE).unwrap();
        let nav = NavHighlighter::initialize(&doc, &NavConfig::default()).unwrap();
        (doc, nav)
    }

    fn active(doc: &Document) -> Vec<String> {
        doc.elements_by_class("active-link")
            .into_iter()
            .filter_map(|l| doc.attr(l, "href").map(str::to_owned))
            .collect()
    }

    #[test]
    fn test_section_at_uses_offset_lead() {
        let (_, nav) = setup();
        assert_eq!(nav.section_at(0.0), Some("home"));
        assert_eq!(nav.section_at(449.0), Some("home"));
        assert_eq!(nav.section_at(450.0), Some("about"));
        assert_eq!(nav.section_at(5000.0), Some("blog"));
    }

    #[test]
    fn test_update_moves_active_link() {
        let (mut doc, mut nav) = setup();

        nav.update(&mut doc, 10.0);
        assert_eq!(active(&doc), vec!["#home"]);

        nav.update(&mut doc, 1300.0);
        assert_eq!(active(&doc), vec!["#blog"]);
        assert_eq!(nav.current(), Some("blog"));
    }

    #[test]
    fn test_no_section_reached_clears_links() {
        let mut doc = Document::parse(
            r##"<body><a class="nav__link active-link" href="#x">X</a>
            <section id="x" class="section" data-offset-top="1000"></section></body>"##,
        )
        .unwrap();
        let mut nav = NavHighlighter::initialize(&doc, &NavConfig::default()).unwrap();

        nav.update(&mut doc, 0.0);
        assert!(active(&doc).is_empty());
        assert_eq!(nav.current(), None);
    }

    #[test]
    fn test_missing_links() {
        let doc = Document::parse("<body><section id=\"a\" class=\"section\"></section></body>").unwrap();
        assert!(matches!(
            NavHighlighter::initialize(&doc, &NavConfig::default()),
            Err(ComponentError::MissingDependency(_))
        ));
    }
}
