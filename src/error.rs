//! Component error taxonomy.
//!
//! Components never fail the page. Initialization problems are reported once
//! through the logger and leave the component inert; lookup misses are
//! swallowed by the caller.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// A required element or data source is absent at initialization.
    #[error("missing {0}, component disabled")]
    MissingDependency(String),

    /// Slug lookup miss.
    #[error("post `{0}` not found")]
    NotFound(String),

    /// A required host capability is absent.
    #[error("{0} unsupported, feature skipped")]
    EnvironmentUnsupported(String),
}

impl ComponentError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingDependency(what.into())
    }

    /// Report once, as a warning under `module`, when the component is
    /// brought up. Lookup misses are not reported.
    pub fn report(&self, module: &str) {
        crate::logger::warn(module, &self.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_error_display() {
        let err = ComponentError::missing("element `#blog-modal`");
        assert_eq!(err.to_string(), "missing element `#blog-modal`, component disabled");

        let err = ComponentError::NotFound("nope".into());
        assert!(err.to_string().contains("`nope`"));

        let err = ComponentError::EnvironmentUnsupported("intersection watcher".into());
        assert!(err.to_string().starts_with("intersection watcher"));
    }
}
