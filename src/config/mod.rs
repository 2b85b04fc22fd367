//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section        | Purpose                                        |
//! |----------------|------------------------------------------------|
//! | `[base]`       | Site title, posts/page/output file locations   |
//! | `[blog]`       | Card container, modal element ids, class names |
//! | `[animation]`  | Entrance animation tag class and threshold     |
//! | `[theme]`      | Theme switch elements and preference key       |
//! | `[nav]`        | Navigation link highlighting                   |
//! | `[typewriter]` | Typewriter element and tick interval           |
//!
//! Every section is optional; a missing config file means all defaults.
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Portfolio"
//! posts = "posts.toml"
//! page = "index.html"
//!
//! [animation]
//! threshold = 0.15
//!
//! [theme]
//! storage_key = "user-theme"
//! ```

mod animation;
mod base;
mod blog;
pub mod defaults;
mod error;
mod nav;
mod theme;
mod typewriter;

pub use animation::AnimationConfig;
pub use base::BaseConfig;
pub use blog::BlogConfig;
pub use error::ConfigError;
pub use nav::NavConfig;
pub use theme::ThemeConfig;
pub use typewriter::TypewriterConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    #[serde(default)]
    pub base: BaseConfig,

    #[serde(default)]
    pub blog: BlogConfig,

    #[serde(default)]
    pub animation: AnimationConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub nav: NavConfig,

    #[serde(default)]
    pub typewriter: TypewriterConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Apply CLI overrides, then resolve file paths against `--root`
    /// (the working directory when absent).
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));

        Self::update_option(&mut self.base.posts, cli.posts.as_ref());
        Self::update_option(&mut self.base.page, cli.page.as_ref());

        if let Commands::Render { output, minify, .. } = &cli.command {
            Self::update_option(&mut self.base.output, output.as_ref());
            Self::update_option(&mut self.base.minify, minify.as_ref());
        }

        self.update_path_with_root(root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.base.posts = Self::normalize_path(&root.join(&self.base.posts));
        self.base.page = Self::normalize_path(&root.join(&self.base.page));
        self.base.output = Self::normalize_path(&root.join(&self.base.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate value ranges and required names
    pub fn validate(&self) -> Result<()> {
        let threshold = self.animation.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            bail!(ConfigError::invalid(
                "[animation.threshold]",
                format!("must be in (0, 1], got {threshold}")
            ));
        }

        if self.typewriter.interval_ms == 0 {
            bail!(ConfigError::invalid("[typewriter.interval_ms]", "must be greater than 0"));
        }

        let names = [
            ("[blog.container]", &self.blog.container),
            ("[blog.modal]", &self.blog.modal),
            ("[blog.card_class]", &self.blog.card_class),
            ("[blog.open_class]", &self.blog.open_class),
            ("[animation.tag_class]", &self.animation.tag_class),
            ("[animation.visible_class]", &self.animation.visible_class),
            ("[theme.dark_class]", &self.theme.dark_class),
            ("[theme.storage_key]", &self.theme.storage_key),
            ("[nav.link_class]", &self.nav.link_class),
            ("[nav.active_class]", &self.nav.active_class),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                bail!(ConfigError::invalid(field, "must not be empty"));
            }
            if value.chars().any(char::is_whitespace) {
                bail!(ConfigError::invalid(field, format!("must be a single name, got `{value}`")));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
