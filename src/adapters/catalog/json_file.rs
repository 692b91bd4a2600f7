//! Implements CatalogSource by reading a JSON document from disk.
//!
//! Shape: `{ "experts": [...], "topics": [...], "predictions": [...] }`.

use crate::domain::{CatalogData, DomainError};
use crate::ports::CatalogSource;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// File-based catalog source. Read once, wholesale.
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn load(&self) -> Result<CatalogData, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DomainError::Catalog(format!(
                    "catalog file not found: {}",
                    self.path.display()
                )));
            }
            Err(e) => return Err(DomainError::Catalog(format!("read catalog: {}", e))),
        };
        let data: CatalogData = serde_json::from_str(&raw).map_err(|e| {
            DomainError::Catalog(format!("parse {}: {}", self.path.display(), e))
        })?;
        let abs_path = self.path.canonicalize().unwrap_or_else(|_| self.path.clone());
        info!(path = %abs_path.display(), bytes = raw.len(), "read catalog file");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"{"experts": [], "topics": [{"id":"t","name":"T","icon":"*","predictionsCount":1,"successRate":0.5}]}"#,
        )
        .await
        .unwrap();

        let data = JsonFileCatalog::new(&path).load().await.unwrap();
        assert!(data.experts.is_empty());
        assert_eq!(data.topics.len(), 1);
        assert!(data.predictions.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_catalog_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileCatalog::new(dir.path().join("nope.json"))
            .load()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_catalog_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").await.unwrap();
        let err = JsonFileCatalog::new(&path).load().await.unwrap_err();
        assert!(matches!(err, DomainError::Catalog(_)));
    }
}
