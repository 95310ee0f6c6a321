// Repository trait for case record access
use crate::domain::chart_type::Metric;
use crate::domain::jurisdiction::{Jurisdiction, JurisdictionId};
use crate::domain::record::CaseRecord;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordScope {
    /// Every top-level (country) jurisdiction.
    Roots,
    Jurisdictions(Vec<JurisdictionId>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery {
    pub scope: RecordScope,
    pub exclude: Vec<JurisdictionId>,
}

impl RecordQuery {
    pub fn new(scope: RecordScope) -> Self {
        Self {
            scope,
            exclude: Vec::new(),
        }
    }

    pub fn excluding(mut self, exclude: Vec<JurisdictionId>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn matches(&self, jurisdiction: &Jurisdiction) -> bool {
        if self.exclude.contains(&jurisdiction.id) {
            return false;
        }
        match &self.scope {
            RecordScope::Roots => jurisdiction.is_root(),
            RecordScope::Jurisdictions(ids) => ids.contains(&jurisdiction.id),
        }
    }
}

/// Ranking of jurisdictions by their count on the newest reported date.
#[derive(Debug, Clone, PartialEq)]
pub struct TopQuery {
    pub records: RecordQuery,
    pub ranking: Metric,
    pub limit: usize,
}

#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// Cumulative records matching the query, sorted by date ascending
    async fn query_records(&self, query: &RecordQuery) -> anyhow::Result<Vec<CaseRecord>>;

    /// The `limit` jurisdictions with the highest count on the newest date
    async fn top_jurisdictions(&self, query: &TopQuery) -> anyhow::Result<Vec<Arc<Jurisdiction>>>;

    /// Records of all countries on the newest date, most confirmed cases first
    async fn latest_root_records(&self) -> anyhow::Result<Vec<CaseRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_matches_scope_and_exclusions() {
        let canada = Jurisdiction::new(1, "Canada".to_string(), None);
        let ontario = Jurisdiction::new(2, "Ontario".to_string(), Some(1));
        let quebec = Jurisdiction::new(3, "Quebec".to_string(), Some(1));

        let roots = RecordQuery::new(RecordScope::Roots);
        assert!(roots.matches(&canada));
        assert!(!roots.matches(&ontario));

        let regions = RecordQuery::new(RecordScope::Jurisdictions(vec![2, 3])).excluding(vec![3]);
        assert!(regions.matches(&ontario));
        assert!(!regions.matches(&quebec));
        assert!(!regions.matches(&canada));
    }
}
