//! Rankings: best expert per topic, global top experts, trending topics.

use crate::domain::entities::{Expert, Prediction, PredictionStatus, Topic};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Number of topics considered by [`topic_leaders`].
pub const LEADER_TOPICS: usize = 4;
/// Size of the global expert leaderboard.
pub const TOP_EXPERTS: usize = 5;

/// Per-expert statistics restricted to one topic.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpertTopicStats<'a> {
    pub expert: &'a Expert,
    pub total: usize,
    pub fulfilled: usize,
}

impl ExpertTopicStats<'_> {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.fulfilled as f64 / self.total as f64
        }
    }

    /// Accuracy descending, then total descending. Compares the ratios
    /// exactly (cross-multiplied) so equal fractions always tie.
    fn rank_cmp(&self, other: &Self) -> Ordering {
        let lhs = self.fulfilled * other.total;
        let rhs = other.fulfilled * self.total;
        lhs.cmp(&rhs).then(self.total.cmp(&other.total))
    }
}

/// The best expert within one topic.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicLeader<'a> {
    pub topic: &'a Topic,
    pub stats: ExpertTopicStats<'a>,
}

/// For each of the first [`LEADER_TOPICS`] topics (input order), pick the
/// expert with the best accuracy on that topic's predictions. Ties go to the
/// larger total, then to the expert seen first. Topics without predictions
/// are left out.
pub fn topic_leaders<'a>(predictions: &'a [Prediction], topics: &'a [Topic]) -> Vec<TopicLeader<'a>> {
    topics
        .iter()
        .take(LEADER_TOPICS)
        .filter_map(|topic| {
            expert_stats_for_topic(predictions, &topic.id)
                .into_iter()
                .reduce(|best, candidate| {
                    if candidate.rank_cmp(&best) == Ordering::Greater {
                        candidate
                    } else {
                        best
                    }
                })
                .map(|stats| TopicLeader { topic, stats })
        })
        .collect()
}

/// Per-expert stats within a topic, in first-encountered expert order.
pub fn expert_stats_for_topic<'a>(
    predictions: &'a [Prediction],
    topic_id: &str,
) -> Vec<ExpertTopicStats<'a>> {
    let mut stats: Vec<ExpertTopicStats<'a>> = Vec::new();
    let mut slot_by_expert: HashMap<&'a str, usize> = HashMap::new();

    for p in predictions.iter().filter(|p| p.topic.id == topic_id) {
        let slot = *slot_by_expert.entry(p.expert.id.as_str()).or_insert_with(|| {
            stats.push(ExpertTopicStats {
                expert: &p.expert,
                total: 0,
                fulfilled: 0,
            });
            stats.len() - 1
        });
        let entry = &mut stats[slot];
        entry.total += 1;
        if p.status == PredictionStatus::Fulfilled {
            entry.fulfilled += 1;
        }
    }

    stats
}

/// Experts by accuracy, descending. Stable: equal accuracies keep input order.
pub fn top_experts(experts: &[Expert], limit: usize) -> Vec<&Expert> {
    let mut ranked: Vec<&Expert> = experts.iter().collect();
    ranked.sort_by(|a, b| b.accuracy.total_cmp(&a.accuracy));
    ranked.truncate(limit);
    ranked
}

/// Topics by prediction count, descending. Stable.
pub fn trending_topics(topics: &[Topic]) -> Vec<&Topic> {
    let mut ranked: Vec<&Topic> = topics.iter().collect();
    ranked.sort_by(|a, b| b.predictions_count.cmp(&a.predictions_count));
    ranked
}
