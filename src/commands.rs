//! CLI command implementations.
//!
//! Every command loads the page markup and posts file, brings the page up
//! in the environment described on the command line, then inspects or
//! drives it.

use crate::blog::{ModalState, PostStore};
use crate::cli::EnvArgs;
use crate::config::SiteConfig;
use crate::dom::Document;
use crate::page::{Environment, Page, PageSnapshot};
use crate::reveal::ViewportWatcher;
use crate::replay::{parse_steps, replay as run_steps};
use crate::theme::{MemoryPreferences, PreferenceStore};
use anyhow::{Context, Result, bail};
use std::borrow::Cow;
use std::{fs, path::Path};

// ============================================================================
// Loading
// ============================================================================

/// Load markup and posts, then initialize the page.
pub fn load_page(config: &SiteConfig, env: &EnvArgs) -> Result<Page> {
    let page_path = &config.base.page;
    let markup = fs::read_to_string(page_path)
        .with_context(|| format!("Failed to read page markup `{}`", page_path.display()))?;
    let document = Document::parse(&markup)
        .with_context(|| format!("Failed to parse page markup `{}`", page_path.display()))?;

    let posts = load_posts(&config.base.posts)?;
    Ok(Page::initialize(document, posts, config, environment(config, env)))
}

/// A missing posts file leaves the blog disabled; a broken one is an error.
fn load_posts(path: &Path) -> Result<Option<PostStore>> {
    if !path.exists() {
        return Ok(None);
    }
    let store = PostStore::from_path(path)
        .with_context(|| format!("Failed to load posts from `{}`", path.display()))?;
    Ok(Some(store))
}

fn environment(config: &SiteConfig, env: &EnvArgs) -> Environment {
    let mut preferences = MemoryPreferences::new();
    if let Some(theme) = &env.theme {
        preferences.set(&config.theme.storage_key, theme);
    }
    Environment {
        watcher: (!env.no_watcher).then(ViewportWatcher::new),
        prefers_dark: env.prefers_dark,
        preferences: Box::new(preferences),
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Report which components come up against the page.
pub fn check(config: &SiteConfig, env: &EnvArgs) -> Result<()> {
    let page = load_page(config, env)?;

    for (name, up) in page.components() {
        log!("check"; "{name:<10} {}", if up { "ok" } else { "disabled" });
    }
    let posts = page.blog().store().map_or(0, PostStore::len);
    log!("check"; "{}: {posts} posts, typewriter tick {}ms", config.base.title, config.typewriter.interval_ms);
    Ok(())
}

/// Initialize the page, optionally open a post, and write the markup.
pub fn render(config: &SiteConfig, env: &EnvArgs, open: Option<&str>) -> Result<()> {
    let mut page = load_page(config, env)?;
    if let Some(slug) = open {
        open_post(&mut page, slug)?;
    }

    let html = page.document().to_html();
    let content = minify(html.as_bytes(), config.base.minify);

    let output = &config.base.output;
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory `{}`", parent.display()))?;
    }
    fs::write(output, &content)
        .with_context(|| format!("Failed to write `{}`", output.display()))?;

    log!("render"; "wrote {}", output.display());
    Ok(())
}

/// Open the modal on `slug` and print the resulting state and modal markup.
pub fn open(config: &SiteConfig, env: &EnvArgs, slug: &str, json: bool) -> Result<()> {
    let mut page = load_page(config, env)?;
    open_post(&mut page, slug)?;
    print_snapshot(&page.snapshot(), json)?;

    if !json && let Some(modal) = page.blog().modal() {
        println!("{}", page.document().inner_html(modal.elements().root));
    }
    Ok(())
}

/// Apply a scripted event sequence and print the final state.
pub fn replay(
    config: &SiteConfig,
    env: &EnvArgs,
    events: &[String],
    json: bool,
    html: bool,
) -> Result<()> {
    let steps = parse_steps(events)?;
    let mut page = load_page(config, env)?;
    run_steps(&mut page, &steps)?;

    print_snapshot(&page.snapshot(), json)?;
    if html {
        println!("{}", page.document().to_html());
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn open_post(page: &mut Page, slug: &str) -> Result<()> {
    let Some(store) = page.blog().store() else {
        bail!("No posts loaded, cannot open `{slug}`");
    };
    store.find_by_slug(slug)?;
    if !page.open(slug) {
        bail!("Modal markup missing, cannot open `{slug}`");
    }
    Ok(())
}

fn print_snapshot(snapshot: &PageSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    let modal = match &snapshot.modal {
        ModalState::Closed => "closed".to_owned(),
        ModalState::Open(slug) => format!("open `{slug}`"),
    };
    log!("page"; "modal {modal}, scroll {}", if snapshot.scroll_locked { "locked" } else { "free" });
    if let Some(theme) = snapshot.theme {
        log!("theme"; "{}", theme.as_str());
    }
    if let Some(section) = &snapshot.active_section {
        log!("nav"; "active #{section}");
    }
    log!("reveal"; "{} visible, {} watching", snapshot.visible.len(), snapshot.watching);
    if !snapshot.typed.is_empty() {
        log!("typewriter"; "{}", snapshot.typed);
    }
    Ok(())
}

/// Minify html when enabled, borrowing the input otherwise.
fn minify(html: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if !enabled {
        return Cow::Borrowed(html);
    }
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    Cow::Owned(minify_html::minify(html, &cfg))
}

// ============================================================================
// Tests
// ============================================================================
