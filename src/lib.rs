//! Folio - portfolio page components over an owned document model.
//!
//! The page markup is parsed into a [`dom::Document`]; [`page::Page`] brings
//! the components up against it and routes host events to them:
//!
//! - [`blog`]: post store, card renderer and post modal
//! - [`reveal`]: entrance animation for tagged elements
//! - [`nav`], [`typewriter`], [`theme`]: the remaining page behaviors

#[macro_use]
pub mod logger;

pub mod blog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod nav;
pub mod page;
pub mod replay;
pub mod reveal;
pub mod theme;
pub mod typewriter;
