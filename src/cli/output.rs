//! Shared CLI output helpers.
//!
//! Secrets and key listings go to stdout so they can be piped. Everything
//! else (status, warnings, errors) goes to stderr.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, commands, keys, hints
//! - Dimmed: secondary info

use console::{style, StyledObject};
use std::fmt::Display;
use std::io::{self, Write};

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint<D: Display>(value: D, f: impl FnOnce(StyledObject<D>) -> StyledObject<D>) -> String {
    if colors_enabled() {
        f(style(value).for_stderr()).to_string()
    } else {
        value.to_string()
    }
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ set: db-password`
pub fn success(msg: &str) {
    eprintln!("{} {}", paint("✓", |s| s.green()), msg);
}

/// Print an error message (red).
///
/// Example: `✗ secret not found`
pub fn error(msg: &str) {
    eprintln!("{} {}", paint("✗", |s| s.red()), msg);
}

/// Print a warning message (yellow).
///
/// Example: `⚠ key 'api-key' does not exist`
pub fn warn(msg: &str) {
    eprintln!("{} {}", paint("⚠", |s| s.yellow()), msg);
}

/// Print a hint message (cyan).
///
/// Example: `→ run: xsops init`
pub fn hint(msg: &str) {
    eprintln!("{} {}", paint("→", |s| s.cyan()), paint(msg, |s| s.cyan()));
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    eprintln!("{}", paint(msg, |s| s.dim()));
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  vault:  /home/alice/.local/share/xsops/xsops.secrets.json`
pub fn kv(label: &str, value: impl Display) {
    eprintln!(
        "  {}  {}",
        paint(label, |s| s.dim()),
        paint(value.to_string(), |s| s.bold())
    );
}

/// Format a path string in cyan.
pub fn path(p: &str) -> String {
    paint(p, |s| s.cyan())
}

/// Format a key name in cyan.
pub fn key(k: &str) -> String {
    paint(k, |s| s.cyan())
}

/// Print a secret value to stdout, with or without a trailing newline.
pub fn secret(value: &str, newline: bool) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(value.as_bytes())?;
    if newline {
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Print one listing line to stdout; colored only when stdout is a terminal.
pub fn list_item(item: &str) {
    if colors_enabled() {
        println!("{}", style(item).blue());
    } else {
        println!("{}", item);
    }
}
