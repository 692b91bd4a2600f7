//! Catalog source adapters. Implement CatalogSource.
//!
//! JSON document on disk, or the fixture catalog compiled into the binary.

pub mod fixture;
pub mod json_file;

pub use fixture::FixtureCatalog;
pub use json_file::JsonFileCatalog;
