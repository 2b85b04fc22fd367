//! Scripted event sequences.
//!
//! Each step is a short string resolved against the live page:
//!
//! | Step                       | Event                                  |
//! |----------------------------|----------------------------------------|
//! | `click:<target>`           | click on the target                    |
//! | `key:<key>[:<target>]`     | keydown, optionally on a focused node  |
//! | `scroll:<y>`               | scroll to `y` pixels                   |
//! | `visible:<target>[:<r>]`   | intersection report, ratio default 1.0 |
//! | `tick[:<count>]`           | typewriter ticks, default 1            |
//!
//! Targets are `#id`, `.class` (first match) or `@slug` (a rendered card).

use crate::dom::NodeId;
use crate::event::{Event, Key};
use crate::page::Page;
use crate::reveal::IntersectionEntry;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ReplayError {
    #[error("invalid step `{0}`")]
    InvalidStep(String),

    #[error("invalid target `{0}`, expected `#id`, `.class` or `@slug`")]
    InvalidTarget(String),

    #[error("invalid number `{0}` in step `{1}`")]
    InvalidNumber(String, String),

    #[error("ratio `{0}` in step `{1}` is outside [0, 1]")]
    InvalidRatio(String, String),

    #[error("target `{0}` matches nothing on the page")]
    UnknownTarget(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Id(String),
    Class(String),
    Slug(String),
}

impl FromStr for Target {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReplayError::InvalidTarget(s.to_owned());
        let mut chars = s.chars();
        let sigil = chars.next().ok_or_else(invalid)?;
        let name = chars.as_str();
        if name.is_empty() {
            return Err(invalid());
        }
        match sigil {
            '#' => Ok(Self::Id(name.to_owned())),
            '.' => Ok(Self::Class(name.to_owned())),
            '@' => Ok(Self::Slug(name.to_owned())),
            _ => Err(invalid()),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
            Self::Slug(slug) => write!(f, "@{slug}"),
        }
    }
}

impl Target {
    pub fn resolve(&self, page: &Page) -> Result<NodeId, ReplayError> {
        let doc = page.document();
        let node = match self {
            Self::Id(id) => doc.get_element_by_id(id),
            Self::Class(class) => doc.elements_by_class(class).first().copied(),
            Self::Slug(slug) => page.card(slug),
        };
        node.ok_or_else(|| ReplayError::UnknownTarget(self.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Click(Target),
    Key { key: Key, target: Option<Target> },
    Scroll(f64),
    Visible { target: Target, ratio: f64 },
    Tick(usize),
}

fn number<T: FromStr>(value: &str, step: &str) -> Result<T, ReplayError> {
    value
        .trim()
        .parse()
        .map_err(|_| ReplayError::InvalidNumber(value.to_owned(), step.to_owned()))
}

/// Visible fraction, finite and within `[0, 1]`.
fn parse_ratio(value: &str, step: &str) -> Result<f64, ReplayError> {
    let ratio: f64 = number(value, step)?;
    if !(0.0..=1.0).contains(&ratio) {
        return Err(ReplayError::InvalidRatio(value.to_owned(), step.to_owned()));
    }
    Ok(ratio)
}

impl FromStr for Step {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let kind = parts.next().unwrap_or_default();
        let first = parts.next();
        let second = parts.next();

        let step = match (kind, first, second) {
            ("click", Some(target), None) => Self::Click(target.parse()?),
            ("key", Some(key), target) if !key.is_empty() => Self::Key {
                key: key.parse().unwrap_or(Key::Other(key.to_owned())),
                target: target.map(str::parse).transpose()?,
            },
            ("scroll", Some(y), None) => Self::Scroll(number(y, s)?),
            ("visible", Some(target), ratio) => Self::Visible {
                target: target.parse()?,
                ratio: ratio.map(|r| parse_ratio(r, s)).transpose()?.unwrap_or(1.0),
            },
            ("tick", None, None) => Self::Tick(1),
            ("tick", Some(count), None) => Self::Tick(number(count, s)?),
            _ => return Err(ReplayError::InvalidStep(s.to_owned())),
        };
        Ok(step)
    }
}

/// Parse every step up front so a typo fails before anything runs.
pub fn parse_steps<S: AsRef<str>>(steps: &[S]) -> Result<Vec<Step>, ReplayError> {
    steps.iter().map(|s| s.as_ref().parse()).collect()
}

/// Apply `steps` in order. Targets resolve against the page as it is when
/// the step runs, so cards rendered earlier are reachable.
pub fn replay(page: &mut Page, steps: &[Step]) -> Result<(), ReplayError> {
    for step in steps {
        match step {
            Step::Click(target) => {
                let target = target.resolve(page)?;
                page.dispatch(Event::Click { target });
            }
            Step::Key { key, target } => {
                let target = target.as_ref().map(|t| t.resolve(page)).transpose()?;
                page.dispatch(Event::KeyDown {
                    key: key.clone(),
                    target,
                });
            }
            Step::Scroll(y) => page.dispatch(Event::Scroll { y: *y }),
            Step::Visible { target, ratio } => {
                let target = target.resolve(page)?;
                page.dispatch(Event::Intersect(vec![IntersectionEntry {
                    target,
                    ratio: *ratio,
                }]));
            }
            Step::Tick(count) => {
                for _ in 0..*count {
                    page.dispatch(Event::Tick);
                }
            }
        }
    }
    Ok(())
}
