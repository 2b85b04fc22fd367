//! Post detail modal.
//!
//! ```text
//!            open_with_slug(s)              open_with_slug(t)
//!  Closed ───────────────────► Open(s) ───────────────────► Open(t)
//!    ▲                            │
//!    └──────── close() ───────────┘      (close() on Closed: no-op)
//! ```
//!
//! The scroll lock is held exactly while the state is `Open`.

use super::store::PostStore;
use crate::config::BlogConfig;
use crate::dom::{Document, NodeId};
use crate::error::ComponentError;
use serde::Serialize;

/// Page-wide modal visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "slug", rename_all = "lowercase")]
pub enum ModalState {
    #[default]
    Closed,
    Open(String),
}

impl ModalState {
    #[inline]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

/// Elements the modal is built from, supplied by the page markup.
#[derive(Debug, Clone, Copy)]
pub struct ModalElements {
    /// Overlay root; clicks landing on it directly close the modal.
    pub root: NodeId,
    pub title: NodeId,
    pub date: NodeId,
    pub body: NodeId,
    pub close: NodeId,
}

impl ModalElements {
    /// Look up every modal element by id.
    pub fn resolve(doc: &Document, config: &BlogConfig) -> Result<Self, ComponentError> {
        let find = |id: &str| {
            doc.get_element_by_id(id)
                .ok_or_else(|| ComponentError::missing(format!("modal element `#{id}`")))
        };
        Ok(Self {
            root: find(&config.modal)?,
            title: find(&config.modal_title)?,
            date: find(&config.modal_date)?,
            body: find(&config.modal_body)?,
            close: find(&config.modal_close)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ModalController {
    elements: ModalElements,
    state: ModalState,
    open_class: String,
}

impl ModalController {
    /// Resolve the modal elements and start `Closed`.
    pub fn initialize(doc: &mut Document, config: &BlogConfig) -> Result<Self, ComponentError> {
        let elements = ModalElements::resolve(doc, config)?;
        let controller = Self {
            elements,
            state: ModalState::Closed,
            open_class: config.open_class.clone(),
        };
        controller.hide(doc);
        Ok(controller)
    }

    #[inline]
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    #[inline]
    pub fn elements(&self) -> &ModalElements {
        &self.elements
    }

    /// Show the post with `slug`.
    ///
    /// A lookup miss changes nothing: state, modal content and scroll lock
    /// stay as they were.
    pub fn open_with_slug(
        &mut self,
        doc: &mut Document,
        store: &PostStore,
        slug: &str,
    ) -> Result<(), ComponentError> {
        let post = store.find_by_slug(slug)?;

        doc.set_text(self.elements.title, &post.title);
        doc.set_text(self.elements.date, &post.date);
        doc.set_inner_markup(self.elements.body, &post.content);

        doc.add_class(self.elements.root, &self.open_class);
        doc.set_attr(self.elements.root, "aria-hidden", "false");
        doc.lock_scroll();

        self.state = ModalState::Open(post.slug.clone());
        Ok(())
    }

    /// Close the modal and release the scroll lock. Idempotent.
    pub fn close(&mut self, doc: &mut Document) {
        self.hide(doc);
        if self.state.is_open() {
            doc.unlock_scroll();
        }
        self.state = ModalState::Closed;
    }

    fn hide(&self, doc: &mut Document) {
        doc.remove_class(self.elements.root, &self.open_class);
        doc.set_attr(self.elements.root, "aria-hidden", "true");
    }

    /// Whether a click on `target` should close the modal: the close control
    /// (or anything inside it), or the overlay background itself.
    pub fn is_close_trigger(&self, doc: &Document, target: NodeId) -> bool {
        target == self.elements.root || doc.contains(self.elements.close, target)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::blog::store::tests::store;

    pub(crate) const MODAL: &str = r#"<div id="blog-modal" class="modal">
  <div class="modal__content">
    <button id="modal-close" class="modal__close"><span>x</span></button>
    <h2 id="modal-title"></h2>
    <p id="modal-date"></p>
    <div id="modal-body"></div>
  </div>
</div>"#;

    fn setup() -> (Document, ModalController, PostStore) {
        let mut doc = Document::parse(&format!("<body>{MODAL}</body>")).unwrap();
        let modal = ModalController::initialize(&mut doc, &BlogConfig::default()).unwrap();
        (doc, modal, store(&["a", "b"]))
    }

    fn shown(doc: &Document, modal: &ModalController) -> (String, String, String) {
        let e = modal.elements();
        (
            doc.text_content(e.title),
            doc.text_content(e.date),
            doc.inner_html(e.body),
        )
    }

    #[test]
    fn test_initial_state_closed() {
        let (doc, modal, _) = setup();
        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(!doc.is_scroll_locked());
        assert_eq!(doc.attr(modal.elements().root, "aria-hidden"), Some("true"));
    }

    #[test]
    fn test_body_style_survives_startup_and_open_close() {
        let mut doc =
            Document::parse(&format!(r#"<body style="background: red">{MODAL}</body>"#)).unwrap();
        let body = doc.body().unwrap();
        let mut modal = ModalController::initialize(&mut doc, &BlogConfig::default()).unwrap();
        assert_eq!(doc.attr(body, "style"), Some("background: red"));

        let store = store(&["a"]);
        modal.open_with_slug(&mut doc, &store, "a").unwrap();
        assert_eq!(doc.attr(body, "style"), Some("background: red; overflow: hidden"));

        modal.close(&mut doc);
        modal.close(&mut doc);
        assert_eq!(doc.attr(body, "style"), Some("background: red"));
    }

    #[test]
    fn test_open_close_cycles_do_not_grow_document() {
        let (mut doc, mut modal, store) = setup();
        modal.open_with_slug(&mut doc, &store, "a").unwrap();
        modal.close(&mut doc);
        let nodes = doc.node_count();

        for i in 0..200 {
            let slug = if i % 2 == 0 { "a" } else { "b" };
            modal.open_with_slug(&mut doc, &store, slug).unwrap();
            modal.close(&mut doc);
        }
        assert_eq!(doc.node_count(), nodes);
    }

    #[test]
    fn test_open_shows_post_and_locks_scroll() {
        let (mut doc, mut modal, store) = setup();
        modal.open_with_slug(&mut doc, &store, "a").unwrap();

        assert_eq!(modal.state(), &ModalState::Open("a".into()));
        assert_eq!(
            shown(&doc, &modal),
            ("Title a".into(), "Date a".into(), "<p>Content a</p>".into())
        );
        assert!(doc.has_class(modal.elements().root, "active"));
        assert_eq!(doc.attr(modal.elements().root, "aria-hidden"), Some("false"));
        assert!(doc.is_scroll_locked());
    }

    #[test]
    fn test_open_missing_from_closed_changes_nothing() {
        let (mut doc, mut modal, store) = setup();
        let before = doc.to_html();

        let result = modal.open_with_slug(&mut doc, &store, "missing");
        assert_eq!(result, Err(ComponentError::NotFound("missing".into())));
        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(!doc.is_scroll_locked());
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_open_missing_while_open_keeps_current_post() {
        let (mut doc, mut modal, store) = setup();
        modal.open_with_slug(&mut doc, &store, "b").unwrap();

        assert!(modal.open_with_slug(&mut doc, &store, "").is_err());
        assert_eq!(modal.state(), &ModalState::Open("b".into()));
        assert_eq!(shown(&doc, &modal).0, "Title b");
        assert!(doc.is_scroll_locked());
    }

    #[test]
    fn test_open_while_open_last_call_wins() {
        let (mut doc, mut modal, store) = setup();
        modal.open_with_slug(&mut doc, &store, "a").unwrap();
        modal.open_with_slug(&mut doc, &store, "b").unwrap();

        assert_eq!(modal.state(), &ModalState::Open("b".into()));
        assert_eq!(shown(&doc, &modal).0, "Title b");
        assert!(doc.is_scroll_locked());
    }

    #[test]
    fn test_close_is_idempotent() {
        let (mut doc, mut modal, store) = setup();
        modal.open_with_slug(&mut doc, &store, "a").unwrap();

        modal.close(&mut doc);
        modal.close(&mut doc);
        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(!doc.is_scroll_locked());
        assert!(!doc.has_class(modal.elements().root, "active"));
    }

    #[test]
    fn test_close_from_closed() {
        let (mut doc, mut modal, _) = setup();
        modal.close(&mut doc);
        modal.close(&mut doc);
        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(!doc.is_scroll_locked());
    }

    #[test]
    fn test_close_triggers() {
        let (doc, modal, _) = setup();
        let e = *modal.elements();
        let icon = doc.child_elements(e.close)[0];
        let content = doc.parent(e.title).unwrap();

        assert!(modal.is_close_trigger(&doc, e.root));
        assert!(modal.is_close_trigger(&doc, e.close));
        assert!(modal.is_close_trigger(&doc, icon));
        assert!(!modal.is_close_trigger(&doc, content));
        assert!(!modal.is_close_trigger(&doc, e.body));
    }

    #[test]
    fn test_missing_modal_element() {
        let mut doc = Document::parse(r#"<body><div id="blog-modal"></div></body>"#).unwrap();
        let err = ModalController::initialize(&mut doc, &BlogConfig::default()).unwrap_err();
        assert_eq!(err, ComponentError::missing("modal element `#modal-title`"));
    }

    #[test]
    fn test_modal_state_serialization() {
        let open = serde_json::to_string(&ModalState::Open("a".into())).unwrap();
        assert_eq!(open, r#"{"state":"open","slug":"a"}"#);
        let closed = serde_json::to_string(&ModalState::Closed).unwrap();
        assert_eq!(closed, r#"{"state":"closed"}"#);
    }
}
