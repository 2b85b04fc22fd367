//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    use std::path::PathBuf;

    pub fn title() -> String {
        "Portfolio".into()
    }

    pub fn posts() -> PathBuf {
        "posts.toml".into()
    }

    pub fn page() -> PathBuf {
        "index.html".into()
    }

    pub fn output() -> PathBuf {
        "public/index.html".into()
    }
}

// ============================================================================
// [blog] Section Defaults
// ============================================================================

pub mod blog {
    pub fn container() -> String {
        "blog-container".into()
    }

    pub fn modal() -> String {
        "blog-modal".into()
    }

    pub fn modal_title() -> String {
        "modal-title".into()
    }

    pub fn modal_date() -> String {
        "modal-date".into()
    }

    pub fn modal_body() -> String {
        "modal-body".into()
    }

    pub fn modal_close() -> String {
        "modal-close".into()
    }

    pub fn card_class() -> String {
        "blog-card".into()
    }

    pub fn open_class() -> String {
        "active".into()
    }

    pub fn label_prefix() -> String {
        "Leer artículo:".into()
    }
}

// ============================================================================
// [animation] Section Defaults
// ============================================================================

pub mod animation {
    pub fn tag_class() -> String {
        "fade-in".into()
    }

    pub fn visible_class() -> String {
        "visible".into()
    }

    pub fn threshold() -> f64 {
        0.15
    }
}

// ============================================================================
// [theme] Section Defaults
// ============================================================================

pub mod theme {
    pub fn button() -> String {
        "theme-button".into()
    }

    pub fn icon() -> String {
        "theme-icon".into()
    }

    pub fn dark_class() -> String {
        "dark-theme".into()
    }

    pub fn storage_key() -> String {
        "user-theme".into()
    }
}

// ============================================================================
// [nav] Section Defaults
// ============================================================================

pub mod nav {
    pub fn link_class() -> String {
        "nav__link".into()
    }

    pub fn section_class() -> String {
        "section".into()
    }

    pub fn active_class() -> String {
        "active-link".into()
    }

    pub fn offset() -> f64 {
        150.0
    }
}

// ============================================================================
// [typewriter] Section Defaults
// ============================================================================

pub mod typewriter {
    pub fn element() -> String {
        "typewriter".into()
    }

    pub fn interval_ms() -> u64 {
        100
    }
}
