//! Post record types.

use serde::{Deserialize, Serialize};

/// One blog entry.
///
/// All fields are display strings; `date` is shown as written and never
/// parsed, `content` is markup inserted verbatim into the modal body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Post {
    /// Unique identifier without whitespace, used as lookup key and `data-slug`.
    pub slug: String,
    pub title: String,
    pub date: String,
    /// Short summary shown on the card.
    pub excerpt: String,
    pub content: String,
}

/// Layout of a posts file: a list of `[[post]]` tables.
///
/// ```toml
/// [[post]]
/// slug = "por-que-elegir-dotnet"
/// title = "Por qué elegí .NET para mi API transaccional"
/// date = "13 de Octubre, 2025"
/// excerpt = "Una reflexión sobre las decisiones arquitectónicas..."
/// content = """
/// <h2>La Importancia de la Decisión Correcta</h2>
/// """
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct PostsFile {
    #[serde(default, rename = "post")]
    pub posts: Vec<Post>,
}
