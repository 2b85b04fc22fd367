//! Read-only post store.
//!
//! Posts keep the order they were defined in; a slug index backs lookups.
//! Construction is the only place slugs are checked, so every store that
//! exists satisfies the uniqueness invariant.

use super::types::{Post, PostsFile};
use crate::error::ComponentError;
use rustc_hash::FxHashMap;
use std::{fs, path::Path};
use thiserror::Error;

/// Post store construction errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error when reading `{0}`")]
    Io(std::path::PathBuf, #[source] std::io::Error),

    #[error("posts file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("post #{index} has an empty slug")]
    EmptySlug { index: usize },

    #[error("slug `{slug}` contains whitespace")]
    Whitespace { slug: String },

    #[error("duplicate slug `{slug}` (posts #{first} and #{second})")]
    Duplicate {
        slug: String,
        first: usize,
        second: usize,
    },
}

/// Ordered, immutable collection of posts.
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<Post>,
    index: FxHashMap<String, usize>,
}

impl PostStore {
    /// Build a store, rejecting empty, whitespace-containing or duplicate slugs.
    pub fn new(posts: Vec<Post>) -> Result<Self, StoreError> {
        let mut index = FxHashMap::default();
        for (i, post) in posts.iter().enumerate() {
            if post.slug.is_empty() {
                return Err(StoreError::EmptySlug { index: i });
            }
            if post.slug.chars().any(char::is_whitespace) {
                return Err(StoreError::Whitespace {
                    slug: post.slug.clone(),
                });
            }
            if let Some(first) = index.insert(post.slug.clone(), i) {
                return Err(StoreError::Duplicate {
                    slug: post.slug.clone(),
                    first,
                    second: i,
                });
            }
        }
        Ok(Self { posts, index })
    }

    /// Parse a posts file (`[[post]]` tables).
    pub fn from_toml(content: &str) -> Result<Self, StoreError> {
        let file: PostsFile = toml::from_str(content)?;
        Self::new(file.posts)
    }

    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let content =
            fs::read_to_string(path).map_err(|err| StoreError::Io(path.to_path_buf(), err))?;
        Self::from_toml(&content)
    }

    /// All posts in definition order.
    #[inline]
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    /// The post with `slug`, or `NotFound` for any other string.
    pub fn find_by_slug(&self, slug: &str) -> Result<&Post, ComponentError> {
        self.index
            .get(slug)
            .map(|&i| &self.posts[i])
            .ok_or_else(|| ComponentError::NotFound(slug.to_owned()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
