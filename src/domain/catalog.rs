//! Catalog aggregate: the three read-only collections plus O(1) id lookups.

use crate::domain::entities::{Expert, Prediction, Topic};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Wire shape of a catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub experts: Vec<Expert>,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// Loaded catalog. Order of every collection is the source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    experts: Vec<Expert>,
    topics: Vec<Topic>,
    predictions: Vec<Prediction>,
    expert_index: HashMap<String, usize>,
    topic_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(data: CatalogData) -> Self {
        let expert_index = data
            .experts
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        let topic_index = data
            .topics
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();
        Self {
            experts: data.experts,
            topics: data.topics,
            predictions: data.predictions,
            expert_index,
            topic_index,
        }
    }

    pub fn experts(&self) -> &[Expert] {
        &self.experts
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    pub fn expert(&self, id: &str) -> Option<&Expert> {
        self.expert_index.get(id).map(|&i| &self.experts[i])
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topic_index.get(id).map(|&i| &self.topics[i])
    }

    pub fn prediction(&self, id: &str) -> Option<&Prediction> {
        self.predictions.iter().find(|p| p.id == id)
    }

    /// Resolve an expert from an external identifier (e.g. the handle in a
    /// profile URL). First expert whose profile link contains `handle` wins.
    pub fn find_expert_by_handle(&self, handle: &str) -> Option<&Expert> {
        if handle.is_empty() {
            return None;
        }
        self.experts.iter().find(|e| e.profile_link.contains(handle))
    }

    /// Predictions owned by `expert_id`, in catalog order.
    pub fn predictions_by_expert(&self, expert_id: &str) -> Vec<&Prediction> {
        self.predictions
            .iter()
            .filter(|p| p.expert.id == expert_id)
            .collect()
    }

    /// Check data invariants. Violations are reported, not enforced.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        for e in &self.experts {
            if e.fulfilled_predictions.saturating_add(e.failed_predictions) > e.total_predictions {
                issues.push(CatalogIssue::CounterOverflow {
                    expert_id: e.id.clone(),
                });
            }
        }
        for p in &self.predictions {
            if !p.status.is_resolved() && p.verification_result().is_some() {
                issues.push(CatalogIssue::PendingWithVerification {
                    prediction_id: p.id.clone(),
                });
            }
            if !self.expert_index.contains_key(&p.expert.id) {
                issues.push(CatalogIssue::UnknownExpert {
                    prediction_id: p.id.clone(),
                    expert_id: p.expert.id.clone(),
                });
            }
            if !self.topic_index.contains_key(&p.topic.id) {
                issues.push(CatalogIssue::UnknownTopic {
                    prediction_id: p.id.clone(),
                    topic_id: p.topic.id.clone(),
                });
            }
        }
        issues
    }
}

impl From<CatalogData> for Catalog {
    fn from(data: CatalogData) -> Self {
        Self::new(data)
    }
}

/// A data invariant violation found by [`Catalog::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// fulfilled + failed exceeds total.
    CounterOverflow { expert_id: String },
    PendingWithVerification { prediction_id: String },
    UnknownExpert {
        prediction_id: String,
        expert_id: String,
    },
    UnknownTopic {
        prediction_id: String,
        topic_id: String,
    },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CounterOverflow { expert_id } => write!(
                f,
                "expert {}: fulfilled + failed exceeds total predictions",
                expert_id
            ),
            Self::PendingWithVerification { prediction_id } => write!(
                f,
                "prediction {}: pending but carries a verification result",
                prediction_id
            ),
            Self::UnknownExpert {
                prediction_id,
                expert_id,
            } => write!(
                f,
                "prediction {}: expert {} is not in the catalog",
                prediction_id, expert_id
            ),
            Self::UnknownTopic {
                prediction_id,
                topic_id,
            } => write!(
                f,
                "prediction {}: topic {} is not in the catalog",
                prediction_id, topic_id
            ),
        }
    }
}
