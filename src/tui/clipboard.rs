//! System clipboard access via `arboard`
//!
//! A clipboard handle is opened per copy; nothing is held between calls.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Put `text` on the system clipboard
///
/// Fails on headless Linux (no display server) or when access is denied;
/// callers report that with a toast.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    Clipboard::new()
        .context("Failed to access clipboard")?
        .set_text(text)
        .context("Failed to set clipboard text")
}
