//! Grouping engine. Partitions one expert's predictions by source video or by
//! topic and attaches outcome counts to every group.

use crate::domain::entities::{Prediction, PredictionStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// One group per source video.
    #[default]
    Source,
    Topic,
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::Source => write!(f, "By video"),
            GroupBy::Topic => write!(f, "By topic"),
        }
    }
}

/// Outcome counts. `fulfilled + failed + pending == total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupStats {
    pub total: usize,
    pub fulfilled: usize,
    pub failed: usize,
    pub pending: usize,
}

impl GroupStats {
    pub fn from_predictions<'a, I>(predictions: I) -> Self
    where
        I: IntoIterator<Item = &'a Prediction>,
    {
        let mut stats = GroupStats::default();
        for p in predictions {
            stats.record(p.status);
        }
        stats
    }

    fn record(&mut self, status: PredictionStatus) {
        self.total += 1;
        match status {
            PredictionStatus::Fulfilled => self.fulfilled += 1,
            PredictionStatus::Failed => self.failed += 1,
            PredictionStatus::Pending => self.pending += 1,
        }
    }
}

/// A group of predictions sharing a source video or a topic.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionGroup<'a> {
    /// Grouping key: source URL or topic id.
    pub id: String,
    pub title: String,
    /// Topic glyph, topic mode only.
    pub icon: Option<String>,
    /// Source URL, source mode only.
    pub source_url: Option<String>,
    pub predictions: Vec<&'a Prediction>,
    pub stats: GroupStats,
}

/// Partition `predictions` into groups. Group order is first-seen key order.
pub fn group_predictions<'a, I>(predictions: I, group_by: GroupBy) -> Vec<PredictionGroup<'a>>
where
    I: IntoIterator<Item = &'a Prediction>,
{
    let mut groups: Vec<PredictionGroup<'a>> = Vec::new();
    let mut slot_by_key: HashMap<&'a str, usize> = HashMap::new();

    for p in predictions {
        let key = match group_by {
            GroupBy::Source => p.source.as_str(),
            GroupBy::Topic => p.topic.id.as_str(),
        };
        let slot = *slot_by_key.entry(key).or_insert_with(|| {
            groups.push(new_group(key, p, group_by));
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.predictions.push(p);
        group.stats.record(p.status);
    }

    groups
}

fn new_group<'a>(key: &str, first: &Prediction, group_by: GroupBy) -> PredictionGroup<'a> {
    let (title, icon, source_url) = match group_by {
        GroupBy::Source => (
            first
                .source_title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| first.source.clone()),
            None,
            Some(first.source.clone()),
        ),
        GroupBy::Topic => (
            first.topic.name.clone(),
            Some(first.topic.icon.clone()),
            None,
        ),
    };
    PredictionGroup {
        id: key.to_string(),
        title,
        icon,
        source_url,
        predictions: Vec::new(),
        stats: GroupStats::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{expert, prediction, topic};
    use std::collections::HashSet;

    fn fixture() -> Vec<Prediction> {
        let anna = expert("e1", "Anna");
        let eco = topic("t1", "Economy");
        let tech = topic("t2", "Tech");

        let mut list = vec![
            prediction("p1", &anna, &tech, PredictionStatus::Fulfilled),
            prediction("p2", &anna, &eco, PredictionStatus::Failed),
            prediction("p3", &anna, &tech, PredictionStatus::Pending),
            prediction("p4", &anna, &eco, PredictionStatus::Fulfilled),
            prediction("p5", &anna, &tech, PredictionStatus::Failed),
        ];
        // p1, p2 from video A; p3 from video B; p4, p5 from video A again.
        for (p, video) in list.iter_mut().zip(["A", "A", "B", "A", "A"]) {
            p.source = format!("https://youtube.com/watch?v={}", video);
            p.source_title = Some(format!("Video {}", video));
        }
        list
    }

    #[test]
    fn test_group_by_source_first_seen_order() {
        let list = fixture();
        let groups = group_predictions(&list, GroupBy::Source);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, "Video A");
        assert_eq!(groups[0].id, "https://youtube.com/watch?v=A");
        assert_eq!(groups[0].source_url.as_deref(), Some("https://youtube.com/watch?v=A"));
        assert!(groups[0].icon.is_none());
        assert_eq!(
            groups[0].stats,
            GroupStats {
                total: 4,
                fulfilled: 2,
                failed: 2,
                pending: 0
            }
        );
        assert_eq!(groups[1].title, "Video B");
        assert_eq!(groups[1].stats.pending, 1);
    }

    #[test]
    fn test_group_by_topic_carries_icon() {
        let list = fixture();
        let groups = group_predictions(&list, GroupBy::Topic);
        let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Tech", "Economy"]);
        assert_eq!(groups[0].icon.as_deref(), Some("📊"));
        assert!(groups[0].source_url.is_none());
        let member_ids: Vec<&str> = groups[0].predictions.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(member_ids, vec!["p1", "p3", "p5"]);
    }

    #[test]
    fn test_source_title_falls_back_to_url() {
        let mut list = fixture();
        list[2].source_title = None;
        let groups = group_predictions(&list, GroupBy::Source);
        assert_eq!(groups[1].title, "https://youtube.com/watch?v=B");
    }

    #[test]
    fn test_grouping_is_a_partition() {
        let list = fixture();
        for mode in [GroupBy::Source, GroupBy::Topic] {
            let groups = group_predictions(&list, mode);
            let total: usize = groups.iter().map(|g| g.stats.total).sum();
            assert_eq!(total, list.len());

            let mut seen = HashSet::new();
            for g in &groups {
                assert_eq!(g.predictions.len(), g.stats.total);
                assert_eq!(
                    g.stats.fulfilled + g.stats.failed + g.stats.pending,
                    g.stats.total
                );
                for p in &g.predictions {
                    assert!(seen.insert(p.id.clone()), "duplicate {}", p.id);
                }
            }
            assert_eq!(seen.len(), list.len());
        }
    }

    #[test]
    fn test_ungrouped_stats_sum() {
        let list = fixture();
        let stats = GroupStats::from_predictions(&list);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.fulfilled + stats.failed + stats.pending, stats.total);
    }

    #[test]
    fn test_empty_and_idempotent() {
        assert!(group_predictions(&Vec::<Prediction>::new(), GroupBy::Topic).is_empty());
        let list = fixture();
        assert_eq!(
            group_predictions(&list, GroupBy::Source),
            group_predictions(&list, GroupBy::Source)
        );
    }
}
