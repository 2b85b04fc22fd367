//! Entrance animation: reveal tagged elements once they scroll into view.
//!
//! The [`VisibilityBridge`] registers tagged elements with a [`Watcher`] and
//! marks each one visible the first time an intersection report crosses the
//! threshold, then stops watching it.
//!
//! Elements rendered after startup (blog cards) reach the bridge through the
//! document's insertion feed, drained by [`VisibilityBridge::sync`] after every
//! handled event. Startup order of renderer and bridge therefore does not
//! matter.

use crate::config::AnimationConfig;
use crate::dom::{Document, NodeId};
use crate::error::ComponentError;
use rustc_hash::FxHashSet;

const MODULE: &str = "reveal";

/// One intersection report: how much of `target` is inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    /// Visible fraction in `[0, 1]`.
    pub ratio: f64,
}

/// Viewport-intersection capability provided by the host.
pub trait Watcher {
    fn observe(&mut self, node: NodeId);
    fn unobserve(&mut self, node: NodeId);
    fn is_observed(&self, node: NodeId) -> bool;
    /// Observed elements, sorted.
    fn observed(&self) -> Vec<NodeId>;
}

/// In-memory watcher: tracks the observed set, the host feeds reports in.
#[derive(Debug, Clone, Default)]
pub struct ViewportWatcher {
    observed: FxHashSet<NodeId>,
}

impl ViewportWatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Watcher for ViewportWatcher {
    fn observe(&mut self, node: NodeId) {
        self.observed.insert(node);
    }

    fn unobserve(&mut self, node: NodeId) {
        self.observed.remove(&node);
    }

    fn is_observed(&self, node: NodeId) -> bool {
        self.observed.contains(&node)
    }

    fn observed(&self) -> Vec<NodeId> {
        let mut nodes: Vec<_> = self.observed.iter().copied().collect();
        nodes.sort_unstable();
        nodes
    }
}

/// Connects tagged elements, present or inserted later, to the watcher.
#[derive(Debug, Clone)]
pub struct VisibilityBridge<W: Watcher = ViewportWatcher> {
    /// `None` when the host has no intersection capability.
    watcher: Option<W>,
    /// Subtree watched for insertions.
    scope: Option<NodeId>,
    tag_class: String,
    visible_class: String,
    threshold: f64,
}

impl<W: Watcher> VisibilityBridge<W> {
    /// Observe every tagged element already in the document and start
    /// watching `scope` for insertions.
    pub fn initialize(
        doc: &mut Document,
        watcher: Option<W>,
        scope: Option<NodeId>,
        config: &AnimationConfig,
    ) -> Self {
        let mut bridge = Self {
            watcher,
            scope,
            tag_class: config.tag_class.clone(),
            visible_class: config.visible_class.clone(),
            threshold: config.threshold,
        };

        if bridge.watcher.is_none() {
            ComponentError::EnvironmentUnsupported("intersection watcher".into()).report(MODULE);
            return bridge;
        }

        let existing = doc.elements_by_class(&bridge.tag_class);
        let count = existing
            .into_iter()
            .filter(|&node| bridge.observe(doc, node))
            .count();

        if bridge.scope.is_none() {
            ComponentError::missing("insertion scope, only initial elements are watched")
                .report(MODULE);
        }
        crate::log!(MODULE; "watching {count} elements");
        bridge
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.watcher.is_some()
    }

    pub fn watcher(&self) -> Option<&W> {
        self.watcher.as_ref()
    }

    /// Start watching `node` unless it is already watched or already shown.
    fn observe(&mut self, doc: &Document, node: NodeId) -> bool {
        let Some(watcher) = self.watcher.as_mut() else {
            return false;
        };
        if !doc.has_class(node, &self.tag_class)
            || doc.has_class(node, &self.visible_class)
            || !doc.is_connected(node)
            || watcher.is_observed(node)
        {
            return false;
        }
        watcher.observe(node);
        true
    }

    /// Register tagged elements among `nodes` and their subtrees, limited to
    /// the watched scope. Returns how many were newly observed.
    pub fn observe_candidates(
        &mut self,
        doc: &Document,
        nodes: impl IntoIterator<Item = NodeId>,
    ) -> usize {
        let Some(scope) = self.scope else {
            return 0;
        };
        let mut count = 0;
        for node in nodes {
            if !doc.contains(scope, node) {
                continue;
            }
            for candidate in doc.descendants(node) {
                if self.observe(doc, candidate) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Drain the document's insertion feed and observe new candidates.
    /// Watched elements that left the document are dropped first.
    pub fn sync(&mut self, doc: &mut Document) -> usize {
        let inserted = doc.take_inserted();
        if !self.is_enabled() {
            return 0;
        }
        self.prune(doc);
        self.observe_candidates(doc, inserted)
    }

    /// Stop watching elements no longer connected to the document. Returns
    /// how many were dropped.
    pub fn prune(&mut self, doc: &Document) -> usize {
        let Some(watcher) = self.watcher.as_mut() else {
            return 0;
        };
        let gone: Vec<_> = watcher
            .observed()
            .into_iter()
            .filter(|&node| !doc.is_connected(node))
            .collect();
        for &node in &gone {
            watcher.unobserve(node);
        }
        gone.len()
    }

    /// Apply intersection reports. Each watched element crossing the
    /// threshold is marked visible and unobserved; returns those elements.
    pub fn on_intersection(
        &mut self,
        doc: &mut Document,
        entries: &[IntersectionEntry],
    ) -> Vec<NodeId> {
        let Some(watcher) = self.watcher.as_mut() else {
            return Vec::new();
        };
        let mut revealed = Vec::new();
        for entry in entries {
            let crossed = !entry.ratio.is_nan() && entry.ratio >= self.threshold;
            if !crossed || !watcher.is_observed(entry.target) {
                continue;
            }
            doc.add_class(entry.target, &self.visible_class);
            watcher.unobserve(entry.target);
            revealed.push(entry.target);
        }
        revealed
    }
}
