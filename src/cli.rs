//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio portfolio page CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Root directory path
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Posts file path (relative to project root)
    #[arg(short, long)]
    pub posts: Option<PathBuf>,

    /// Page markup path (relative to project root)
    #[arg(long)]
    pub page: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Host environment the page is initialized in
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EnvArgs {
    /// Behave as if the system prefers a dark color scheme
    #[arg(long)]
    pub prefers_dark: bool,

    /// Stored theme preference ("light" or "dark")
    #[arg(long)]
    pub theme: Option<String>,

    /// Run without an intersection watcher (entrance animations disabled)
    #[arg(long)]
    pub no_watcher: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate posts and page markup, report which components come up
    Check {
        #[command(flatten)]
        env: EnvArgs,
    },

    /// Initialize the page and write the resulting markup
    Render {
        #[command(flatten)]
        env: EnvArgs,

        /// Output file path (relative to project root)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minify the html content
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        minify: Option<bool>,

        /// Open the modal on this post before writing
        #[arg(long)]
        open: Option<String>,
    },

    /// Open the modal on a post and print the modal state
    Open {
        /// Slug of the post to open
        slug: String,

        #[command(flatten)]
        env: EnvArgs,

        /// Print the page state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a scripted event sequence and print the final page state
    ///
    /// Events: `click:<target>`, `key:<key>[:<target>]`, `scroll:<y>`,
    /// `visible:<target>[:<ratio>]`, `tick[:<count>]`.
    /// Targets: `#id`, `.class`, `@slug` (a rendered card).
    Replay {
        /// Events, applied in order
        #[arg(required = true)]
        events: Vec<String>,

        #[command(flatten)]
        env: EnvArgs,

        /// Print the page state as JSON
        #[arg(long)]
        json: bool,

        /// Also print the final page markup
        #[arg(long)]
        html: bool,
    },
}

impl Cli {
    /// Environment arguments of the current command
    pub fn env(&self) -> &EnvArgs {
        match &self.command {
            Commands::Check { env }
            | Commands::Render { env, .. }
            | Commands::Open { env, .. }
            | Commands::Replay { env, .. } => env,
        }
    }
}
