//! Light/dark theme switch.
//!
//! The initial theme comes from the stored preference, falling back to the
//! system color scheme. Toggling flips the theme and writes the preference
//! back through the injected [`PreferenceStore`].

use crate::config::ThemeConfig;
use crate::dom::{Document, NodeId};
use crate::error::ComponentError;
use rustc_hash::FxHashMap;
use serde::Serialize;

const MODULE: &str = "theme";

/// Shown while the dark theme is active.
const SUN_ICON: &str = r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="5"></circle><line x1="12" y1="1" x2="12" y2="3"></line><line x1="12" y1="21" x2="12" y2="23"></line><line x1="4.22" y1="4.22" x2="5.64" y2="5.64"></line><line x1="18.36" y1="18.36" x2="19.78" y2="19.78"></line><line x1="1" y1="12" x2="3" y2="12"></line><line x1="21" y1="12" x2="23" y2="12"></line><line x1="4.22" y1="19.78" x2="5.64" y2="18.36"></line><line x1="18.36" y1="5.64" x2="19.78" y2="4.22"></line></svg>"#;

/// Shown while the light theme is active.
const MOON_ICON: &str = r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z"></path></svg>"#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored preference value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Resolve the startup theme. Any stored value other than `"dark"`
    /// selects the light theme; an empty value counts as unset.
    pub fn resolve(stored: Option<&str>, prefers_dark: bool) -> Self {
        match stored.filter(|v| !v.is_empty()) {
            Some("dark") => Self::Dark,
            Some(_) => Self::Light,
            None if prefers_dark => Self::Dark,
            None => Self::Light,
        }
    }

    const fn icon(self) -> &'static str {
        match self {
            Self::Dark => SUN_ICON,
            Self::Light => MOON_ICON,
        }
    }
}

/// Key/value preference storage provided by the host.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Preferences held in memory for the lifetime of the page.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: FxHashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }
}

pub struct ThemeSwitcher {
    button: NodeId,
    icon: NodeId,
    body: Option<NodeId>,
    dark_class: String,
    storage_key: String,
    theme: Theme,
    preferences: Box<dyn PreferenceStore>,
}

impl std::fmt::Debug for ThemeSwitcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeSwitcher")
            .field("button", &self.button)
            .field("icon", &self.icon)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl ThemeSwitcher {
    /// Resolve the switch elements and apply the startup theme.
    pub fn initialize(
        doc: &mut Document,
        config: &ThemeConfig,
        preferences: Box<dyn PreferenceStore>,
        prefers_dark: bool,
    ) -> Result<Self, ComponentError> {
        let find = |id: &str| {
            doc.get_element_by_id(id)
                .ok_or_else(|| ComponentError::missing(format!("theme element `#{id}`")))
        };
        let button = find(&config.button)?;
        let icon = find(&config.icon)?;

        let stored = preferences.get(&config.storage_key);
        let theme = Theme::resolve(stored.as_deref(), prefers_dark);

        let mut switcher = Self {
            button,
            icon,
            body: doc.body(),
            dark_class: config.dark_class.clone(),
            storage_key: config.storage_key.clone(),
            theme,
            preferences,
        };
        switcher.apply(doc, theme);
        crate::log!(MODULE; "initial theme {}", theme.as_str());
        Ok(switcher)
    }

    #[inline]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn button(&self) -> NodeId {
        self.button
    }

    pub fn preferences(&self) -> &dyn PreferenceStore {
        self.preferences.as_ref()
    }

    fn apply(&mut self, doc: &mut Document, theme: Theme) {
        if let Some(body) = self.body {
            match theme {
                Theme::Dark => doc.add_class(body, &self.dark_class),
                Theme::Light => doc.remove_class(body, &self.dark_class),
            }
        }
        doc.set_inner_markup(self.icon, theme.icon());
        self.theme = theme;
    }

    /// Flip the theme and store the choice.
    pub fn toggle(&mut self, doc: &mut Document) -> Theme {
        let next = self.theme.toggled();
        self.apply(doc, next);
        self.preferences.set(&self.storage_key, next.as_str());
        next
    }

    /// Whether a click on `target` hits the toggle button.
    pub fn is_trigger(&self, doc: &Document, target: NodeId) -> bool {
        doc.contains(self.button, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<body><button id="theme-button"><span id="theme-icon"></span></button></body>"#;

    fn setup(preferences: MemoryPreferences, prefers_dark: bool) -> (Document, ThemeSwitcher) {
        let mut doc = Document::parse(PAGE).unwrap();
        let switcher = ThemeSwitcher::initialize(
            &mut doc,
            &ThemeConfig::default(),
            Box::new(preferences),
            prefers_dark,
        )
        .unwrap();
        (doc, switcher)
    }

    fn is_dark(doc: &Document) -> bool {
        doc.has_class(doc.body().unwrap(), "dark-theme")
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Theme::resolve(Some("dark"), false), Theme::Dark);
        assert_eq!(Theme::resolve(Some("light"), true), Theme::Light);
        assert_eq!(Theme::resolve(Some("purple"), true), Theme::Light);
        assert_eq!(Theme::resolve(Some(""), true), Theme::Dark);
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
    }

    #[test]
    fn test_system_preference_applies_without_stored() {
        let (doc, switcher) = setup(MemoryPreferences::new(), true);
        assert_eq!(switcher.theme(), Theme::Dark);
        assert!(is_dark(&doc));

        let icon = doc.get_element_by_id("theme-icon").unwrap();
        assert!(doc.inner_html(icon).contains("<circle"));
    }

    #[test]
    fn test_stored_preference_wins() {
        let prefs = MemoryPreferences::new().with("user-theme", "light");
        let (doc, switcher) = setup(prefs, true);
        assert_eq!(switcher.theme(), Theme::Light);
        assert!(!is_dark(&doc));

        let icon = doc.get_element_by_id("theme-icon").unwrap();
        assert!(doc.inner_html(icon).contains("<path"));
    }

    #[test]
    fn test_toggle_writes_preference() {
        let (mut doc, mut switcher) = setup(MemoryPreferences::new(), false);

        assert_eq!(switcher.toggle(&mut doc), Theme::Dark);
        assert!(is_dark(&doc));
        assert_eq!(switcher.preferences().get("user-theme").as_deref(), Some("dark"));

        assert_eq!(switcher.toggle(&mut doc), Theme::Light);
        assert!(!is_dark(&doc));
        assert_eq!(switcher.preferences().get("user-theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_trigger_includes_icon() {
        let (doc, switcher) = setup(MemoryPreferences::new(), false);
        let icon = doc.get_element_by_id("theme-icon").unwrap();
        assert!(switcher.is_trigger(&doc, icon));
        assert!(!switcher.is_trigger(&doc, doc.body().unwrap()));
    }

    #[test]
    fn test_missing_icon_disables() {
        let mut doc = Document::parse(r#"<body><button id="theme-button"></button></body>"#).unwrap();
        let result = ThemeSwitcher::initialize(
            &mut doc,
            &ThemeConfig::default(),
            Box::new(MemoryPreferences::new()),
            true,
        );
        assert!(matches!(result, Err(ComponentError::MissingDependency(_))));
        assert!(!is_dark(&doc));
    }
}
