//! Card rendering.
//!
//! Each post becomes one focusable card:
//!
//! ```html
//! <article class="blog-card fade-in" data-slug="a" tabindex="0" role="button"
//!          aria-label="Leer artículo: Title a">
//!   <p class="blog-card__date">Date a</p>
//!   <h3 class="blog-card__title">Title a</h3>
//!   <p class="blog-card__excerpt">Excerpt a</p>
//! </article>
//! ```

use super::types::Post;
use crate::config::{AnimationConfig, BlogConfig};
use crate::dom::{Document, NodeId};

/// Attribute carrying the post slug on every card.
pub const SLUG_ATTR: &str = "data-slug";

/// Projects posts into card elements.
#[derive(Debug, Clone)]
pub struct Renderer {
    card_class: String,
    tag_class: String,
    label_prefix: String,
}

impl Renderer {
    pub fn new(blog: &BlogConfig, animation: &AnimationConfig) -> Self {
        Self {
            card_class: blog.card_class.clone(),
            tag_class: animation.tag_class.clone(),
            label_prefix: blog.label_prefix.clone(),
        }
    }

    /// Replace the children of `container` with one card per post, in order.
    ///
    /// Returns the number of cards rendered; an absent container renders none.
    pub fn render(&self, doc: &mut Document, container: Option<NodeId>, posts: &[Post]) -> usize {
        let Some(container) = container else {
            return 0;
        };
        let cards: Vec<NodeId> = posts.iter().map(|post| self.card(doc, post)).collect();
        doc.replace_children(container, cards);
        posts.len()
    }

    fn card(&self, doc: &mut Document, post: &Post) -> NodeId {
        let card = doc.create_element("article");
        doc.add_class(card, &self.card_class);
        doc.add_class(card, &self.tag_class);
        doc.set_attr(card, SLUG_ATTR, &post.slug);
        doc.set_attr(card, "tabindex", "0");
        doc.set_attr(card, "role", "button");
        doc.set_attr(card, "aria-label", &format!("{} {}", self.label_prefix, post.title));

        for (tag, part, text) in [
            ("p", "date", &post.date),
            ("h3", "title", &post.title),
            ("p", "excerpt", &post.excerpt),
        ] {
            let child = doc.create_element(tag);
            doc.add_class(child, &format!("{}__{part}", self.card_class));
            doc.set_text(child, text);
            doc.append_child(card, child);
        }
        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::store::tests::{post, store};

    fn setup() -> (Document, NodeId, Renderer) {
        let mut doc = Document::parse(r#"<body><div id="blog-container"><p>Loading</p></div></body>"#)
            .unwrap();
        let container = doc.get_element_by_id("blog-container").unwrap();
        doc.take_inserted();
        let renderer = Renderer::new(&BlogConfig::default(), &AnimationConfig::default());
        (doc, container, renderer)
    }

    fn card_slugs(doc: &Document, container: NodeId) -> Vec<String> {
        doc.child_elements(container)
            .into_iter()
            .filter_map(|c| doc.attr(c, SLUG_ATTR).map(str::to_owned))
            .collect()
    }

    #[test]
    fn test_render_one_card_per_post_in_order() {
        let (mut doc, container, renderer) = setup();
        let store = store(&["a", "b", "c"]);

        assert_eq!(renderer.render(&mut doc, Some(container), store.all()), 3);
        assert_eq!(card_slugs(&doc, container), vec!["a", "b", "c"]);
        // Placeholder content is gone
        assert!(!doc.text_content(container).contains("Loading"));
    }

    #[test]
    fn test_render_card_contents() {
        let (mut doc, container, renderer) = setup();
        renderer.render(&mut doc, Some(container), &[post("a")]);

        let card = doc.child_elements(container)[0];
        assert_eq!(doc.tag(card), Some("article"));
        assert!(doc.has_class(card, "blog-card"));
        assert!(doc.has_class(card, "fade-in"));
        assert_eq!(doc.attr(card, "tabindex"), Some("0"));
        assert_eq!(doc.attr(card, "role"), Some("button"));
        assert_eq!(doc.attr(card, "aria-label"), Some("Leer artículo: Title a"));

        let text = doc.text_content(card);
        assert!(text.contains("Date a"));
        assert!(text.contains("Title a"));
        assert!(text.contains("Excerpt a"));
        assert!(!text.contains("Content a"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let (mut doc, container, renderer) = setup();
        let store = store(&["a", "b"]);

        renderer.render(&mut doc, Some(container), store.all());
        let first = doc.to_html();
        renderer.render(&mut doc, Some(container), store.all());
        assert_eq!(doc.to_html(), first);
        assert_eq!(doc.child_elements(container).len(), 2);
    }

    #[test]
    fn test_rerender_releases_old_cards() {
        let (mut doc, container, renderer) = setup();
        let store = store(&["a", "b", "c"]);

        renderer.render(&mut doc, Some(container), store.all());
        let nodes = doc.node_count();
        for _ in 0..50 {
            renderer.render(&mut doc, Some(container), store.all());
        }
        assert_eq!(doc.node_count(), nodes);
        assert_eq!(card_slugs(&doc, container), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_render_escapes_post_text() {
        let (mut doc, container, renderer) = setup();
        let mut p = post("a");
        p.title = "<script>x</script>".into();
        renderer.render(&mut doc, Some(container), &[p]);

        let html = doc.inner_html(container);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_without_container_is_noop() {
        let (mut doc, _, renderer) = setup();
        let before = doc.to_html();
        assert_eq!(renderer.render(&mut doc, None, store(&["a"]).all()), 0);
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_render_empty_posts_clears_container() {
        let (mut doc, container, renderer) = setup();
        assert_eq!(renderer.render(&mut doc, Some(container), &[]), 0);
        assert!(doc.children(container).is_empty());
    }

    #[test]
    fn test_render_feeds_inserted_cards() {
        let (mut doc, container, renderer) = setup();
        renderer.render(&mut doc, Some(container), store(&["a", "b"]).all());

        let inserted = doc.take_inserted();
        let cards = doc.child_elements(container);
        assert!(cards.iter().all(|c| inserted.contains(c)));
    }
}
