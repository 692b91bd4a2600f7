//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the filter / grouping / ranking engines and view state live
//! here. Dependencies flow inward.

pub mod catalog;
pub mod entities;
pub mod errors;
pub mod filter;
pub mod grouping;
pub mod ranking;
pub mod share;
pub mod view_state;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{Catalog, CatalogData, CatalogIssue};
pub use entities::{
    Confidence, Expert, Prediction, PredictionStatus, Tier, Topic, Verification,
    VerificationStatus,
};
pub use errors::DomainError;
pub use filter::{PredictionFilter, Selector};
pub use grouping::{GroupBy, GroupStats, PredictionGroup, group_predictions};
pub use ranking::{TopicLeader, top_experts, topic_leaders, trending_topics};
pub use share::{ShareContent, ShareDelivery, ShareOutcome};
