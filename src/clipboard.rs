//! System clipboard access.

use crate::error::{Error, Result};
use copypasta::{ClipboardContext, ClipboardProvider};
use tracing::debug;

/// Copies `text` to the system clipboard. A missing clipboard or a
/// denied write is returned as [`Error::Clipboard`].
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut ctx = ClipboardContext::new().map_err(|e| Error::Clipboard(e.to_string()))?;
    ctx.set_contents(text.to_string())
        .map_err(|e| Error::Clipboard(e.to_string()))?;
    debug!("copied {} bytes to the clipboard", text.len());
    Ok(())
}
