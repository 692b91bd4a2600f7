//! Catalog use case: load the reference data once, then answer every view
//! query (filtered list, rankings, expert page) from memory.

use crate::domain::filter::PredictionFilter;
use crate::domain::grouping::{GroupBy, GroupStats, PredictionGroup, group_predictions};
use crate::domain::ranking::{self, TOP_EXPERTS, TopicLeader};
use crate::domain::{Catalog, DomainError, Expert, Prediction, Topic};
use crate::ports::CatalogSource;
use std::sync::Arc;
use tracing::{info, warn};

/// Read-only catalog queries.
pub struct CatalogService {
    catalog: Arc<Catalog>,
}

impl CatalogService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Load the catalog from `source`. Data issues are logged, not fatal.
    pub async fn load(source: &dyn CatalogSource) -> Result<Self, DomainError> {
        let catalog = Catalog::new(source.load().await?);
        for issue in catalog.validate() {
            warn!(issue = %issue, "catalog data issue");
        }
        info!(
            experts = catalog.experts().len(),
            topics = catalog.topics().len(),
            predictions = catalog.predictions().len(),
            "catalog loaded"
        );
        Ok(Self::new(Arc::new(catalog)))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Predictions matching `filter`, in catalog order.
    pub fn filtered(&self, filter: &PredictionFilter) -> Vec<&Prediction> {
        filter.apply(self.catalog.predictions())
    }

    /// Global leaderboard by accuracy.
    pub fn top_experts(&self) -> Vec<&Expert> {
        ranking::top_experts(self.catalog.experts(), TOP_EXPERTS)
    }

    /// Best expert for each of the leading topics.
    pub fn topic_leaders(&self) -> Vec<TopicLeader<'_>> {
        ranking::topic_leaders(self.catalog.predictions(), self.catalog.topics())
    }

    pub fn trending_topics(&self) -> Vec<&Topic> {
        ranking::trending_topics(self.catalog.topics())
    }

    /// Expert page for an external identifier (profile handle).
    pub fn expert_profile(&self, handle: &str, group_by: GroupBy) -> ExpertProfile<'_> {
        let Some(expert) = self.catalog.find_expert_by_handle(handle) else {
            info!(handle, "expert not found");
            return ExpertProfile::NotFound {
                handle: handle.to_string(),
            };
        };
        self.page_for(expert, group_by)
    }

    /// Expert page for a known expert id. Used when navigating from a
    /// prediction, which already carries the id.
    pub fn expert_page_by_id(&self, expert_id: &str, group_by: GroupBy) -> ExpertProfile<'_> {
        match self.catalog.expert(expert_id) {
            Some(expert) => self.page_for(expert, group_by),
            None => {
                info!(expert_id, "expert not found");
                ExpertProfile::NotFound {
                    handle: expert_id.to_string(),
                }
            }
        }
    }

    fn page_for<'a>(&'a self, expert: &'a Expert, group_by: GroupBy) -> ExpertProfile<'a> {
        let predictions = self.catalog.predictions_by_expert(&expert.id);
        let groups = group_predictions(predictions.iter().copied(), group_by);
        let stats = GroupStats::from_predictions(predictions.iter().copied());
        ExpertProfile::Found(ExpertPage {
            expert,
            group_by,
            predictions,
            groups,
            stats,
        })
    }
}

/// Expert page view state. A lookup miss is a state, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpertProfile<'a> {
    Found(ExpertPage<'a>),
    NotFound { handle: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpertPage<'a> {
    pub expert: &'a Expert,
    pub group_by: GroupBy,
    pub predictions: Vec<&'a Prediction>,
    pub groups: Vec<PredictionGroup<'a>>,
    /// Counts over the catalogued predictions (may differ from the
    /// expert's precomputed counters when the catalog is partial).
    pub stats: GroupStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{expert, prediction, topic};
    use crate::domain::{CatalogData, PredictionStatus};

    struct StaticSource(CatalogData);

    #[async_trait::async_trait]
    impl CatalogSource for StaticSource {
        async fn load(&self) -> Result<CatalogData, DomainError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl CatalogSource for FailingSource {
        async fn load(&self) -> Result<CatalogData, DomainError> {
            Err(DomainError::Catalog("boom".into()))
        }
    }

    fn data() -> CatalogData {
        let anna = expert("anna", "Anna");
        let boris = expert("boris", "Boris");
        let eco = topic("eco", "Economy");
        let tech = topic("tech", "Tech");
        CatalogData {
            experts: vec![anna.clone(), boris.clone()],
            topics: vec![eco.clone(), tech.clone()],
            predictions: vec![
                prediction("p1", &anna, &eco, PredictionStatus::Fulfilled),
                prediction("p2", &boris, &tech, PredictionStatus::Failed),
                prediction("p3", &anna, &tech, PredictionStatus::Pending),
            ],
        }
    }

    #[tokio::test]
    async fn test_load_and_query() {
        let svc = CatalogService::load(&StaticSource(data())).await.unwrap();
        assert_eq!(svc.catalog().predictions().len(), 3);

        let f = PredictionFilter::default().with_topic("tech");
        let ids: Vec<&str> = svc.filtered(&f).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3"]);

        let leaders = svc.topic_leaders();
        assert_eq!(leaders.len(), 2);
        assert_eq!(leaders[0].stats.expert.id, "anna");
        assert_eq!(svc.top_experts().len(), 2);
        assert_eq!(svc.trending_topics().len(), 2);
    }

    #[tokio::test]
    async fn test_load_propagates_source_error() {
        let err = CatalogService::load(&FailingSource).await.err();
        assert!(matches!(err, Some(DomainError::Catalog(_))));
    }

    #[test]
    fn test_expert_profile_found() {
        let svc = CatalogService::new(Arc::new(Catalog::new(data())));
        match svc.expert_profile("@anna", GroupBy::Topic) {
            ExpertProfile::Found(page) => {
                assert_eq!(page.expert.id, "anna");
                assert_eq!(page.predictions.len(), 2);
                assert_eq!(page.groups.len(), 2);
                assert_eq!(page.stats.fulfilled, 1);
                assert_eq!(page.stats.pending, 1);
                assert_eq!(page.group_by, GroupBy::Topic);
            }
            other => panic!("expected profile, got {:?}", other),
        }
    }

    #[test]
    fn test_expert_page_by_id_ignores_prefix_related_links() {
        let mut anna_econ = expert("anna_econ", "Anna Econ");
        anna_econ.profile_link = "https://youtube.com/@anna_econ".into();
        let mut anna = expert("anna", "Anna");
        anna.profile_link = "https://youtube.com/@anna".into();
        let eco = topic("eco", "Economy");
        let svc = CatalogService::new(Arc::new(Catalog::new(CatalogData {
            experts: vec![anna_econ.clone(), anna.clone()],
            topics: vec![eco.clone()],
            predictions: vec![
                prediction("p1", &anna_econ, &eco, PredictionStatus::Fulfilled),
                prediction("p2", &anna, &eco, PredictionStatus::Pending),
            ],
        })));

        match svc.expert_page_by_id("anna", GroupBy::Source) {
            ExpertProfile::Found(page) => {
                assert_eq!(page.expert.id, "anna");
                let ids: Vec<&str> = page.predictions.iter().map(|p| p.id.as_str()).collect();
                assert_eq!(ids, vec!["p2"]);
            }
            other => panic!("expected profile, got {:?}", other),
        }
        assert!(matches!(
            svc.expert_page_by_id("ghost", GroupBy::Source),
            ExpertProfile::NotFound { .. }
        ));
    }

    #[test]
    fn test_expert_profile_not_found() {
        let svc = CatalogService::new(Arc::new(Catalog::new(data())));
        assert_eq!(
            svc.expert_profile("@nobody", GroupBy::Source),
            ExpertProfile::NotFound {
                handle: "@nobody".into()
            }
        );
    }
}
