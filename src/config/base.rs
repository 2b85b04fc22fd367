//! `[base]` section configuration.
//!
//! Contains the site title and the input/output file locations.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[base]` section in folio.toml - site metadata and file locations.
///
/// # Example
/// ```toml
/// [base]
/// title = "Alvin Sanchez - Portfolio"
/// posts = "posts.toml"
/// page = "index.html"
/// output = "public/index.html"
/// minify = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, used in log output.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Posts file (`[[post]]` tables), relative to the root.
    #[serde(default = "defaults::base::posts")]
    #[educe(Default = defaults::base::posts())]
    pub posts: PathBuf,

    /// Page markup the components attach to, relative to the root.
    #[serde(default = "defaults::base::page")]
    #[educe(Default = defaults::base::page())]
    pub page: PathBuf,

    /// Where `folio render` writes the initialized page.
    #[serde(default = "defaults::base::output")]
    #[educe(Default = defaults::base::output())]
    pub output: PathBuf,

    /// Minify the rendered page.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,
}
