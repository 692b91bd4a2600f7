//! Application use cases. Orchestrate domain logic via ports.

pub mod catalog_service;
pub mod export_service;
pub mod share_service;

pub use catalog_service::{CatalogService, ExpertPage, ExpertProfile};
pub use export_service::ExportService;
pub use share_service::ShareService;
