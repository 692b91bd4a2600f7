//! Infrastructure adapters. Implement outbound ports.
//!
//! Catalog sources, share targets, card export, terminal UI. Map errors to DomainError.

pub mod catalog;
pub mod export;
pub mod share;
pub mod ui;
