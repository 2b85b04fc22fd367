//! Host events routed into the page.

use crate::dom::NodeId;
use crate::reveal::IntersectionEntry;
use std::str::FromStr;

/// Keys the components react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Other(String),
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    /// Parse a `KeyboardEvent.key` value (`"Escape"`, `"Enter"`, `" "`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            " " | "Space" | "Spacebar" => Self::Space,
            other => Self::Other(other.to_owned()),
        })
    }
}

/// A discrete event delivered by the host, handled to completion.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Click { target: NodeId },
    KeyDown { key: Key, target: Option<NodeId> },
    /// Vertical scroll position in pixels.
    Scroll { y: f64 },
    /// Intersection reports for watched elements.
    Intersect(Vec<IntersectionEntry>),
    /// Typewriter timer tick.
    Tick,
}
