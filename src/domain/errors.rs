//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. A missing expert and a
//! cancelled share are not errors; they are view states / outcomes.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Share failed: {0}")]
    Share(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Card rendering or rasterization failed.
    #[error("Image export failed: {0}")]
    Export(String),

    #[error("UI error: {0}")]
    Ui(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
