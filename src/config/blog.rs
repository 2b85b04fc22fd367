//! `[blog]` section configuration.
//!
//! Element ids the blog component looks up in the page, and the class names
//! it writes.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[blog]` section in folio.toml.
///
/// # Example
/// ```toml
/// [blog]
/// container = "blog-container"
/// modal = "blog-modal"
/// open_class = "active"
/// label_prefix = "Read post:"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BlogConfig {
    /// Id of the element cards are rendered into.
    #[serde(default = "defaults::blog::container")]
    #[educe(Default = defaults::blog::container())]
    pub container: String,

    /// Id of the modal root (the overlay background).
    #[serde(default = "defaults::blog::modal")]
    #[educe(Default = defaults::blog::modal())]
    pub modal: String,

    #[serde(default = "defaults::blog::modal_title")]
    #[educe(Default = defaults::blog::modal_title())]
    pub modal_title: String,

    #[serde(default = "defaults::blog::modal_date")]
    #[educe(Default = defaults::blog::modal_date())]
    pub modal_date: String,

    #[serde(default = "defaults::blog::modal_body")]
    #[educe(Default = defaults::blog::modal_body())]
    pub modal_body: String,

    #[serde(default = "defaults::blog::modal_close")]
    #[educe(Default = defaults::blog::modal_close())]
    pub modal_close: String,

    /// Class carried by every rendered card.
    #[serde(default = "defaults::blog::card_class")]
    #[educe(Default = defaults::blog::card_class())]
    pub card_class: String,

    /// Class marking the modal visible.
    #[serde(default = "defaults::blog::open_class")]
    #[educe(Default = defaults::blog::open_class())]
    pub open_class: String,

    /// Prefix of each card's `aria-label`, followed by the post title.
    #[serde(default = "defaults::blog::label_prefix")]
    #[educe(Default = defaults::blog::label_prefix())]
    pub label_prefix: String,
}
