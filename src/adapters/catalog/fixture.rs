//! Fixture catalog compiled into the binary. Used when no catalog file is
//! configured, and by tests.

use crate::domain::{CatalogData, DomainError};
use crate::ports::CatalogSource;
use tracing::info;

const FIXTURE_JSON: &str = include_str!("../../../data/catalog.json");

/// Static sample data shipped with the binary.
#[derive(Debug, Default)]
pub struct FixtureCatalog;

impl FixtureCatalog {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl CatalogSource for FixtureCatalog {
    async fn load(&self) -> Result<CatalogData, DomainError> {
        info!("[FIXTURE] loading embedded catalog");
        serde_json::from_str(FIXTURE_JSON)
            .map_err(|e| DomainError::Catalog(format!("embedded catalog: {}", e)))
    }
}
