//! Clipboard helper for copying text to the system clipboard
//!
//! Uses `arboard` crate for cross-platform support (Windows, macOS, Linux).
//! The handle is opened on first use and then kept: on X11 the copied text
//! disappears once the owning clipboard is dropped.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Lazily opened system clipboard
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy text to the system clipboard
    ///
    /// Common failure cases: no display server (headless Linux), permission denied.
    pub fn copy(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            self.inner = Some(Clipboard::new().context("Failed to access clipboard")?);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            anyhow::bail!("Clipboard unavailable");
        };
        clipboard
            .set_text(text)
            .context("Failed to set clipboard text")?;
        Ok(())
    }
}
