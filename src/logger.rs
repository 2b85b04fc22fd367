//! Logging utilities with colored output.
//!
//! `log!` prints progress lines; [`warn`] prints the one-time reports of
//! components that came up degraded. Both write `[module] message` lines to
//! stderr, so command output on stdout (JSON snapshots, markup) stays clean.
//!
//! ```text
//! [blog] rendered 3 cards
//! [reveal] ! intersection watcher unsupported, feature skipped
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stderr},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Marker between prefix and message on warning lines.
const WARN_MARKER: &str = "!";

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    /// A component reporting that it is disabled or degraded.
    Warn,
}

impl Level {
    /// Columns taken before the message: `[module] `, plus `! ` on warnings.
    const fn prefix_len(self, module_len: usize) -> usize {
        let base = module_len + 3;
        match self {
            Self::Info => base,
            Self::Warn => base + WARN_MARKER.len() + 1,
        }
    }
}

/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

/// Log a message with a colored module prefix.
///
/// ```ignore
/// log!("blog"; "rendered {} cards", count);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

#[inline]
pub fn log(module: &str, message: &str) {
    write_line(Level::Info, module, message);
}

/// Report a degraded component under `module`.
pub fn warn(module: &str, message: &str) {
    write_line(Level::Warn, module, message);
}

fn write_line(level: Level, module: &str, message: &str) {
    let line = format_line(level, module, message, get_terminal_width() as usize);

    let mut out = stderr().lock();
    execute!(out, Clear(ClearType::UntilNewLine)).ok();
    writeln!(out, "{line}").ok();
    out.flush().ok();
}

/// Build one line, truncating the message to fit `width` columns.
fn format_line(level: Level, module: &str, message: &str, width: usize) -> String {
    let prefix = colorize_prefix(module, level);
    let message = truncate_str(message, width.saturating_sub(level.prefix_len(module.len())));
    match level {
        Level::Info => format!("{prefix} {message}"),
        Level::Warn => format!("{prefix} {} {message}", WARN_MARKER.bright_red().bold()),
    }
}

/// Warnings are red whatever the module; otherwise colored by component group.
fn colorize_prefix(module: &str, level: Level) -> ColoredString {
    let prefix = format!("[{module}]");
    if level == Level::Warn {
        return prefix.bright_red().bold();
    }
    match module.to_ascii_lowercase().as_str() {
        "blog" | "modal" => prefix.bright_cyan().bold(),
        "reveal" | "nav" | "theme" | "typewriter" => prefix.bright_green().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Cut `s` to at most `max_len` bytes on a char boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_len() {
        // "[blog] " = 4 + 3
        assert_eq!(Level::Info.prefix_len(4), 7);
        // "[blog] ! "
        assert_eq!(Level::Warn.prefix_len(4), 9);
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 5), "hello");
        assert_eq!(truncate_str("hello world", 5), "hello");
        assert_eq!(truncate_str("hello", 0), "");
        // "á" is 2 bytes, cutting inside it backs off to the previous boundary
        assert_eq!(truncate_str("aáb", 2), "a");
        assert_eq!(truncate_str("aáb", 3), "aá");
    }

    #[test]
    fn test_warn_line_is_marked_and_fits_width() {
        colored::control::set_override(false);
        let line = format_line(Level::Warn, "reveal", "intersection watcher unsupported", 20);
        assert_eq!(line, "[reveal] ! intersect");
        assert_eq!(line.len(), 20);

        let line = format_line(Level::Info, "reveal", "watching 3 elements", 80);
        assert_eq!(line, "[reveal] watching 3 elements");
    }

    #[test]
    fn test_colorize_prefix_keeps_module_name() {
        assert_eq!(&*colorize_prefix("Blog", Level::Info), "[Blog]");
        assert_eq!(&*colorize_prefix("Blog", Level::Warn), "[Blog]");
    }
}
