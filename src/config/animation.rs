//! `[animation]` section configuration.
//!
//! Entrance animation: which elements are watched, the class applied once they
//! become visible, and the visibility fraction that triggers it.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[animation]` section in folio.toml.
///
/// # Example
/// ```toml
/// [animation]
/// tag_class = "fade-in"
/// visible_class = "visible"
/// threshold = 0.15    # fraction of the element inside the viewport
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct AnimationConfig {
    #[serde(default = "defaults::animation::tag_class")]
    #[educe(Default = defaults::animation::tag_class())]
    pub tag_class: String,

    #[serde(default = "defaults::animation::visible_class")]
    #[educe(Default = defaults::animation::visible_class())]
    pub visible_class: String,

    /// Must lie in `(0, 1]`.
    #[serde(default = "defaults::animation::threshold")]
    #[educe(Default = defaults::animation::threshold())]
    pub threshold: f64,
}
