//! `[nav]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[nav]` section in folio.toml - active link highlighting.
///
/// # Example
/// ```toml
/// [nav]
/// link_class = "nav__link"
/// section_class = "section"
/// active_class = "active-link"
/// offset = 150.0    # a section counts as current this many pixels early
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct NavConfig {
    #[serde(default = "defaults::nav::link_class")]
    #[educe(Default = defaults::nav::link_class())]
    pub link_class: String,

    #[serde(default = "defaults::nav::section_class")]
    #[educe(Default = defaults::nav::section_class())]
    pub section_class: String,

    #[serde(default = "defaults::nav::active_class")]
    #[educe(Default = defaults::nav::active_class())]
    pub active_class: String,

    #[serde(default = "defaults::nav::offset")]
    #[educe(Default = defaults::nav::offset())]
    pub offset: f64,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_nav_config() {
        let config = r#"
            [nav]
            active_class = "current"
            offset = 80.0
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.nav.link_class, "nav__link");
        assert_eq!(config.nav.active_class, "current");
        assert_eq!(config.nav.offset, 80.0);
    }
}
