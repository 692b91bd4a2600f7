//! Application configuration. Data source, share and export settings.

use crate::domain::DomainError;
use serde::Deserialize;

/// Public origin used in share links.
pub const DEFAULT_SHARE_ORIGIN: &str = "https://prognoznik.com";

/// Directory where exported cards are written.
pub const DEFAULT_EXPORT_DIR: &str = "./exports";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Path to a catalog JSON document. Read from PROGNOZNIK_CATALOG_PATH.
    /// When unset, the embedded fixture catalog is used.
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Origin for share links. Read from PROGNOZNIK_SHARE_ORIGIN.
    #[serde(default)]
    pub share_origin: Option<String>,

    /// Command run for native share (receives title, text, url as arguments).
    /// Read from PROGNOZNIK_SHARE_COMMAND. Unset = no native share.
    #[serde(default)]
    pub share_command: Option<String>,

    /// Command converting an SVG card to PNG (receives input and output
    /// paths). Read from PROGNOZNIK_RASTERIZER_COMMAND. Unset = export SVG.
    #[serde(default)]
    pub rasterizer_command: Option<String>,

    /// Export directory. Read from PROGNOZNIK_EXPORT_DIR.
    #[serde(default)]
    pub export_dir: Option<String>,

    /// Skip the system clipboard and print the text instead (headless hosts).
    /// Read from PROGNOZNIK_CLIPBOARD_STDOUT.
    #[serde(default)]
    pub clipboard_stdout: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, DomainError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("PROGNOZNIK"));
        if let Ok(path) = std::env::var("PROGNOZNIK_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| DomainError::Config(e.to_string()))
    }

    /// Returns the share origin without a trailing slash.
    pub fn share_origin_or_default(&self) -> String {
        self.share_origin
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SHARE_ORIGIN)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn export_dir_or_default(&self) -> String {
        self.export_dir
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EXPORT_DIR.to_string())
    }

    /// Returns the share command if configured (non-empty).
    pub fn share_command(&self) -> Option<String> {
        non_empty(&self.share_command)
    }

    pub fn rasterizer_command(&self) -> Option<String> {
        non_empty(&self.rasterizer_command)
    }

    pub fn catalog_path(&self) -> Option<String> {
        non_empty(&self.catalog_path)
    }

    pub fn clipboard_stdout(&self) -> bool {
        self.clipboard_stdout.unwrap_or(false)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.share_origin_or_default(), DEFAULT_SHARE_ORIGIN);
        assert_eq!(cfg.export_dir_or_default(), DEFAULT_EXPORT_DIR);
        assert!(cfg.share_command().is_none());
        assert!(cfg.rasterizer_command().is_none());
        assert!(cfg.catalog_path().is_none());
        assert!(!cfg.clipboard_stdout());
    }

    #[test]
    fn test_overrides_are_trimmed() {
        let cfg = AppConfig {
            share_origin: Some("https://example.org/".into()),
            share_command: Some("   ".into()),
            rasterizer_command: Some(" rsvg-convert ".into()),
            ..Default::default()
        };
        assert_eq!(cfg.share_origin_or_default(), "https://example.org");
        assert!(cfg.share_command().is_none());
        assert_eq!(cfg.rasterizer_command().as_deref(), Some("rsvg-convert"));
    }
}
