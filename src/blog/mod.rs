//! Blog listing and post modal.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  all()   ┌──────────┐  cards   ┌──────────────────┐
//! │ PostStore  │ ───────► │ Renderer │ ───────► │ #blog-container  │
//! └────────────┘          └──────────┘          └──────────────────┘
//!       │ find_by_slug                                   │ click / Enter
//!       ▼                                                ▼
//! ┌──────────────────┐      open_with_slug / close   ┌────────┐
//! │ ModalController  │ ◄──────────────────────────── │  Blog  │
//! └──────────────────┘                               └────────┘
//! ```
//!
//! Each piece degrades on its own: without a store nothing renders and the
//! modal never opens; without modal markup the cards still render.

mod modal;
mod render;
mod store;
mod types;

pub use modal::{ModalController, ModalElements, ModalState};
pub use render::{Renderer, SLUG_ATTR};
pub use store::{PostStore, StoreError};
pub use types::Post;

#[cfg(test)]
pub(crate) use store::tests::store as test_store;

use crate::config::{AnimationConfig, BlogConfig};
use crate::dom::{Document, NodeId};
use crate::error::ComponentError;
use crate::event::Key;

const MODULE: &str = "blog";

/// The blog component: card listing plus modal viewer.
#[derive(Debug, Clone)]
pub struct Blog {
    store: Option<PostStore>,
    container: Option<NodeId>,
    card_class: String,
    renderer: Renderer,
    modal: Option<ModalController>,
}

impl Blog {
    /// Resolve page elements, render the cards and set up the modal.
    ///
    /// Missing pieces are reported once and disable only what depends on them.
    pub fn initialize(
        doc: &mut Document,
        store: Option<PostStore>,
        config: &BlogConfig,
        animation: &AnimationConfig,
    ) -> Self {
        let container = doc.get_element_by_id(&config.container);
        let renderer = Renderer::new(config, animation);

        let modal = match store {
            Some(_) => ModalController::initialize(doc, config)
                .inspect_err(|err| err.report(MODULE))
                .ok(),
            None => None,
        };

        let blog = Self {
            store,
            container,
            card_class: config.card_class.clone(),
            renderer,
            modal,
        };

        match (&blog.store, blog.container) {
            (None, _) => ComponentError::missing("post store").report(MODULE),
            (Some(_), None) => {
                ComponentError::missing(format!("card container `#{}`", config.container))
                    .report(MODULE)
            }
            (Some(store), Some(container)) => {
                let count = blog.renderer.render(doc, Some(container), store.all());
                crate::log!(MODULE; "rendered {count} posts");
            }
        }

        blog
    }

    /// Re-render every card from the store, replacing the previous output.
    pub fn render(&self, doc: &mut Document) -> usize {
        match &self.store {
            Some(store) => self.renderer.render(doc, self.container, store.all()),
            None => 0,
        }
    }

    pub fn store(&self) -> Option<&PostStore> {
        self.store.as_ref()
    }

    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    pub fn modal(&self) -> Option<&ModalController> {
        self.modal.as_ref()
    }

    pub fn has_modal(&self) -> bool {
        self.modal.is_some()
    }

    /// Current modal state; `Closed` when the modal is unavailable.
    pub fn modal_state(&self) -> ModalState {
        self.modal
            .as_ref()
            .map(|m| m.state().clone())
            .unwrap_or_default()
    }

    /// Open the modal on `slug`. Misses and a disabled modal are no-ops.
    pub fn open(&mut self, doc: &mut Document, slug: &str) -> bool {
        let (Some(modal), Some(store)) = (self.modal.as_mut(), self.store.as_ref()) else {
            return false;
        };
        modal.open_with_slug(doc, store, slug).is_ok()
    }

    pub fn close(&mut self, doc: &mut Document) {
        if let Some(modal) = self.modal.as_mut() {
            modal.close(doc);
        }
    }

    /// Card enclosing `target`, if `target` lies inside the card container.
    pub fn card_for(&self, doc: &Document, target: NodeId) -> Option<NodeId> {
        let container = self.container?;
        let card = doc.closest_with_attr(target, SLUG_ATTR)?;
        (card != container && doc.contains(container, card) && doc.has_class(card, &self.card_class))
            .then_some(card)
    }

    /// Route a click: close triggers first, then card activation.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) {
        if let Some(modal) = self.modal.as_mut()
            && modal.state().is_open()
            && modal.is_close_trigger(doc, target)
        {
            modal.close(doc);
            return;
        }

        if let Some(card) = self.card_for(doc, target)
            && let Some(slug) = doc.attr(card, SLUG_ATTR).map(str::to_owned)
        {
            self.open(doc, &slug);
        }
    }

    /// Route a keydown: `Escape` closes, `Enter`/space on a focused card opens.
    pub fn handle_key(&mut self, doc: &mut Document, key: &Key, target: Option<NodeId>) {
        match key {
            Key::Escape => {
                if self.modal_state().is_open() {
                    self.close(doc);
                }
            }
            Key::Enter | Key::Space => {
                // Activation only applies to the focused card itself.
                if let Some(target) = target
                    && self.card_for(doc, target) == Some(target)
                    && let Some(slug) = doc.attr(target, SLUG_ATTR).map(str::to_owned)
                {
                    self.open(doc, &slug);
                }
            }
            Key::Other(_) => {}
        }
    }
}
