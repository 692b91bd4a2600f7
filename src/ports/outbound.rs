//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters. Share and export are optional, best-effort
//! capabilities: callers handle their absence and never retry.

use crate::domain::{CatalogData, DomainError, Prediction, ShareContent, ShareOutcome};
use std::path::{Path, PathBuf};

/// Data source boundary. Supplies the three collections wholesale at start-up.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<CatalogData, DomainError>;
}

/// Native "share a title/text/URL" capability.
#[async_trait::async_trait]
pub trait SharePort: Send + Sync {
    /// Returns `Ok(ShareOutcome::Cancelled)` when the user dismissed the
    /// share sheet; `Err` only for real failures.
    async fn share(&self, content: &ShareContent) -> Result<ShareOutcome, DomainError>;
}

/// Clipboard used as the share fallback.
#[async_trait::async_trait]
pub trait ClipboardPort: Send + Sync {
    async fn copy_text(&self, text: &str) -> Result<(), DomainError>;
}

/// Render a prediction card to an image file.
#[async_trait::async_trait]
pub trait CardExportPort: Send + Sync {
    /// Write the card for `prediction` to `dest`. Returns the path actually
    /// written (an adapter may change the extension).
    async fn export_card(&self, prediction: &Prediction, dest: &Path)
    -> Result<PathBuf, DomainError>;
}
