//! Page startup and event routing.
//!
//! [`Page`] owns the document and every component. Startup runs each
//! component in turn; a component that cannot start is reported and left
//! out, the rest still come up. Events are handled one at a time, to
//! completion, followed by a drain of the insertion feed so elements added
//! while handling reach the visibility bridge.

use crate::blog::{Blog, ModalState, PostStore, SLUG_ATTR};
use crate::config::SiteConfig;
use crate::dom::{Document, NodeId};
use crate::event::Event;
use crate::nav::NavHighlighter;
use crate::reveal::{ViewportWatcher, VisibilityBridge, Watcher};
use crate::theme::{MemoryPreferences, PreferenceStore, Theme, ThemeSwitcher};
use crate::typewriter::Typewriter;
use serde::Serialize;

const MODULE: &str = "page";

/// Host capabilities the page starts with.
pub struct Environment {
    /// `None` when the host has no intersection capability.
    pub watcher: Option<ViewportWatcher>,
    pub prefers_dark: bool,
    pub preferences: Box<dyn PreferenceStore>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            watcher: Some(ViewportWatcher::new()),
            prefers_dark: false,
            preferences: Box::new(MemoryPreferences::new()),
        }
    }
}

/// Observable page state after the last handled event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub modal: ModalState,
    pub scroll_locked: bool,
    pub theme: Option<Theme>,
    pub active_section: Option<String>,
    pub cards: usize,
    /// Elements still waiting to be revealed.
    pub watching: usize,
    /// Revealed elements, described as `#id`, `@slug` or tag name.
    pub visible: Vec<String>,
    pub typed: String,
}

#[derive(Debug)]
pub struct Page {
    document: Document,
    nav: Option<NavHighlighter>,
    typewriter: Typewriter,
    bridge: VisibilityBridge,
    theme: Option<ThemeSwitcher>,
    blog: Blog,
    card_class: String,
    visible_class: String,
}

impl Page {
    /// Bring every component up against `document`.
    pub fn initialize(
        mut document: Document,
        posts: Option<PostStore>,
        config: &SiteConfig,
        env: Environment,
    ) -> Self {
        let doc = &mut document;

        let nav = NavHighlighter::initialize(doc, &config.nav)
            .inspect_err(|err| err.report("nav"))
            .ok();

        let typewriter_node = doc.get_element_by_id(&config.typewriter.element);
        let typewriter = Typewriter::initialize(doc, typewriter_node);

        let scope = doc.get_element_by_id(&config.blog.container);
        let bridge = VisibilityBridge::initialize(doc, env.watcher, scope, &config.animation);

        let theme = ThemeSwitcher::initialize(doc, &config.theme, env.preferences, env.prefers_dark)
            .inspect_err(|err| err.report("theme"))
            .ok();

        let blog = Blog::initialize(doc, posts, &config.blog, &config.animation);

        let mut page = Self {
            document,
            nav,
            typewriter,
            bridge,
            theme,
            blog,
            card_class: config.blog.card_class.clone(),
            visible_class: config.animation.visible_class.clone(),
        };
        page.bridge.sync(&mut page.document);

        crate::log!(MODULE; "initialized");
        page
    }

    /// Handle one event to completion.
    pub fn dispatch(&mut self, event: Event) {
        let doc = &mut self.document;
        match event {
            Event::Click { target } => match self.theme.as_mut() {
                Some(theme) if theme.is_trigger(doc, target) => {
                    theme.toggle(doc);
                }
                _ => self.blog.handle_click(doc, target),
            },
            Event::KeyDown { key, target } => self.blog.handle_key(doc, &key, target),
            Event::Scroll { y } => {
                if let Some(nav) = self.nav.as_mut() {
                    nav.update(doc, y);
                }
            }
            Event::Intersect(entries) => {
                self.bridge.on_intersection(doc, &entries);
            }
            Event::Tick => {
                self.typewriter.tick(doc);
            }
        }
        self.bridge.sync(&mut self.document);
    }

    /// Open the modal on `slug`; `false` when nothing opened.
    pub fn open(&mut self, slug: &str) -> bool {
        let opened = self.blog.open(&mut self.document, slug);
        self.bridge.sync(&mut self.document);
        opened
    }

    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn blog(&self) -> &Blog {
        &self.blog
    }

    pub fn bridge(&self) -> &VisibilityBridge {
        &self.bridge
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// Rendered card for `slug`.
    pub fn card(&self, slug: &str) -> Option<NodeId> {
        let container = self.blog.container()?;
        self.document
            .child_elements(container)
            .into_iter()
            .find(|&card| self.document.attr(card, SLUG_ATTR) == Some(slug))
    }

    /// Which components came up, in startup order.
    pub fn components(&self) -> [(&'static str, bool); 6] {
        [
            ("nav", self.nav.is_some()),
            ("typewriter", self.typewriter.is_enabled()),
            ("reveal", self.bridge.is_enabled()),
            ("theme", self.theme.is_some()),
            ("blog", self.blog.store().is_some() && self.blog.container().is_some()),
            ("modal", self.blog.has_modal()),
        ]
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let doc = &self.document;
        let visible = doc
            .elements_by_class(&self.visible_class)
            .into_iter()
            .map(|node| describe(doc, node))
            .collect();

        PageSnapshot {
            modal: self.blog.modal_state(),
            scroll_locked: doc.is_scroll_locked(),
            theme: self.theme.as_ref().map(ThemeSwitcher::theme),
            active_section: self.nav.as_ref().and_then(|n| n.current().map(str::to_owned)),
            cards: doc.elements_by_class(&self.card_class).len(),
            watching: self
                .bridge
                .watcher()
                .map_or(0, |w| w.observed().len()),
            visible,
            typed: self.typewriter.typed(),
        }
    }
}

/// Short label for an element: `#id`, `@slug`, or its tag.
fn describe(doc: &Document, node: NodeId) -> String {
    if let Some(id) = doc.attr(node, "id") {
        format!("#{id}")
    } else if let Some(slug) = doc.attr(node, SLUG_ATTR) {
        format!("@{slug}")
    } else {
        doc.tag(node).unwrap_or_default().to_owned()
    }
}
