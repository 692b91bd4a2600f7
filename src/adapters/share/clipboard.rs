//! Clipboard adapters. Implement ClipboardPort.

use crate::domain::DomainError;
use crate::ports::ClipboardPort;
use async_trait::async_trait;
use tracing::debug;

/// System clipboard via arboard. arboard is blocking, so each copy runs on
/// the blocking pool with a fresh handle.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClipboardPort for SystemClipboard {
    async fn copy_text(&self, text: &str) -> Result<(), DomainError> {
        let text = text.to_string();
        let len = text.len();
        tokio::task::spawn_blocking(move || {
            let mut clipboard =
                arboard::Clipboard::new().map_err(|e| DomainError::Clipboard(e.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|e| DomainError::Clipboard(e.to_string()))
        })
        .await
        .map_err(|e| DomainError::Clipboard(format!("clipboard task: {}", e)))??;
        debug!(len, "copied text to system clipboard");
        Ok(())
    }
}

/// Prints the text instead of touching a clipboard (headless hosts, CI).
#[derive(Debug, Default)]
pub struct StdoutClipboard;

#[async_trait]
impl ClipboardPort for StdoutClipboard {
    async fn copy_text(&self, text: &str) -> Result<(), DomainError> {
        println!("\n{}\n", text);
        Ok(())
    }
}
