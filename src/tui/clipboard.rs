//! Clipboard helper for copying text to the system clipboard
//!
//! Uses `arboard` for cross-platform support (Windows, macOS, Linux). The
//! clipboard is created fresh per copy to avoid holding resources. Failures
//! are surfaced to the user as a blocking notice - clipboard access is
//! user-actionable (permissions, missing display server), never silent.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}
