//! Filter engine. Reduces the prediction list to the subset matching the
//! current criteria. Pure and stable: input order is preserved.

use crate::domain::entities::{Confidence, Prediction, PredictionStatus};
use serde::{Deserialize, Serialize};

/// Literal used by selectors to mean "no restriction".
pub const ALL: &str = "all";

/// A selector over a single value: either everything or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selector<T> {
    All,
    Only(T),
}

pub type IdSelector = Selector<String>;
pub type StatusSelector = Selector<PredictionStatus>;
pub type ConfidenceSelector = Selector<Confidence>;

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(v) => v == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl Selector<String> {
    /// Parse a raw selector value; `"all"` (or empty) is the sentinel.
    pub fn from_id(raw: &str) -> Self {
        if raw.is_empty() || raw == ALL {
            Selector::All
        } else {
            Selector::Only(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selector::All => ALL,
            Selector::Only(id) => id,
        }
    }
}

impl Selector<PredictionStatus> {
    pub fn parse_status(raw: &str) -> Option<Self> {
        if raw == ALL {
            return Some(Selector::All);
        }
        PredictionStatus::parse(raw).map(Selector::Only)
    }
}

impl Selector<Confidence> {
    pub fn parse_confidence(raw: &str) -> Option<Self> {
        if raw == ALL {
            return Some(Selector::All);
        }
        Confidence::parse(raw).map(Selector::Only)
    }
}

/// Filter criteria. All criteria are ANDed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionFilter {
    /// Case-insensitive substring over interpretation, quote and expert name.
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub expert: IdSelector,
    #[serde(default)]
    pub topic: IdSelector,
    #[serde(default)]
    pub status: StatusSelector,
    #[serde(default)]
    pub confidence: ConfidenceSelector,
}

impl PredictionFilter {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_expert(mut self, expert_id: &str) -> Self {
        self.expert = IdSelector::from_id(expert_id);
        self
    }

    pub fn with_topic(mut self, topic_id: &str) -> Self {
        self.topic = IdSelector::from_id(topic_id);
        self
    }

    pub fn with_status(mut self, status: StatusSelector) -> Self {
        self.status = status;
        self
    }

    pub fn with_confidence(mut self, confidence: ConfidenceSelector) -> Self {
        self.confidence = confidence;
        self
    }

    /// True when no criterion restricts the list.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.expert.is_all()
            && self.topic.is_all()
            && self.status.is_all()
            && self.confidence.is_all()
    }

    pub fn matches(&self, prediction: &Prediction) -> bool {
        self.matches_query(prediction)
            && self.expert.matches(&prediction.expert.id)
            && self.topic.matches(&prediction.topic.id)
            && self.status.matches(&prediction.status)
            && self.confidence.matches(&prediction.confidence)
    }

    fn matches_query(&self, prediction: &Prediction) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        [
            prediction.interpretation.as_str(),
            prediction.original_quote.as_str(),
            prediction.expert.name.as_str(),
        ]
        .iter()
        .any(|hay| hay.to_lowercase().contains(&needle))
    }

    /// Apply the filter. Returns references in input order.
    pub fn apply<'a, I>(&self, predictions: I) -> Vec<&'a Prediction>
    where
        I: IntoIterator<Item = &'a Prediction>,
    {
        predictions.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Convenience wrapper around [`PredictionFilter::apply`].
pub fn filter_predictions<'a>(
    predictions: &'a [Prediction],
    filter: &PredictionFilter,
) -> Vec<&'a Prediction> {
    filter.apply(predictions)
}
