//! Clipboard integration for sharing messages

use crate::{Result, VoicelinkError};
use arboard::Clipboard;
use log::debug;

/// Copy text to the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    debug!("Copying {} chars to clipboard", text.len());

    let mut clipboard = Clipboard::new()
        .map_err(|e| VoicelinkError::Other(format!("Failed to open clipboard: {}", e)))?;

    clipboard
        .set_text(text)
        .map_err(|e| VoicelinkError::Other(format!("Failed to copy to clipboard: {}", e)))?;

    Ok(())
}
