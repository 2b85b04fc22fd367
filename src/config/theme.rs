//! `[theme]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[theme]` section in folio.toml - light/dark switch.
///
/// # Example
/// ```toml
/// [theme]
/// button = "theme-button"
/// icon = "theme-icon"
/// dark_class = "dark-theme"
/// storage_key = "user-theme"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Id of the toggle button.
    #[serde(default = "defaults::theme::button")]
    #[educe(Default = defaults::theme::button())]
    pub button: String,

    /// Id of the element holding the toggle icon.
    #[serde(default = "defaults::theme::icon")]
    #[educe(Default = defaults::theme::icon())]
    pub icon: String,

    /// Class put on `<body>` while the dark theme is active.
    #[serde(default = "defaults::theme::dark_class")]
    #[educe(Default = defaults::theme::dark_class())]
    pub dark_class: String,

    /// Preference key the chosen theme is stored under.
    #[serde(default = "defaults::theme::storage_key")]
    #[educe(Default = defaults::theme::storage_key())]
    pub storage_key: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_theme_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.theme.button, "theme-button");
        assert_eq!(config.theme.icon, "theme-icon");
        assert_eq!(config.theme.dark_class, "dark-theme");
        assert_eq!(config.theme.storage_key, "user-theme");
    }
}
