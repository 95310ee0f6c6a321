// In-memory case repository loaded from normalized sample rows
use crate::application::case_repository::{CaseRepository, RecordQuery, RecordScope, TopQuery};
use crate::application::jurisdiction_directory::JurisdictionDirectory;
use crate::domain::chart_type::Metric;
use crate::domain::jurisdiction::{Jurisdiction, JurisdictionId};
use crate::domain::record::CaseRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct SampleRow {
    jurisdiction: String,
    #[serde(default)]
    region: Option<String>,
    date: NaiveDate,
    #[serde(default)]
    confirmed: u64,
    #[serde(default)]
    deceased: u64,
    #[serde(default)]
    recovered: u64,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCaseRepository {
    /// Sorted by date; every record carries a jurisdiction.
    records: Vec<CaseRecord>,
}

impl InMemoryCaseRepository {
    pub fn new(mut records: Vec<CaseRecord>) -> Self {
        records.retain(|r| r.jurisdiction.is_some());
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    pub fn load(path: impl AsRef<Path>, directory: &dyn JurisdictionDirectory) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read samples from {}", path.display()))?;
        let repository = Self::from_json(&json, directory)?;
        tracing::info!("Loaded {} case records from {}", repository.records.len(), path.display());
        Ok(repository)
    }

    /// Rows naming an unknown country or region are skipped.
    pub fn from_json(json: &str, directory: &dyn JurisdictionDirectory) -> Result<Self> {
        let rows: Vec<SampleRow> = serde_json::from_str(json).context("Failed to parse sample rows")?;
        let mut records = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;

        for row in rows {
            let Some(country) = directory.resolve(&row.jurisdiction) else {
                tracing::warn!("Skipping sample for unknown jurisdiction {:?}", row.jurisdiction);
                skipped += 1;
                continue;
            };
            let jurisdiction = match row.region.as_deref() {
                None | Some("") => country,
                Some(region) => match directory.region(&country, region) {
                    Some(r) => r,
                    None => {
                        tracing::warn!("Skipping sample for unknown region {:?} of {}", region, country.name);
                        skipped += 1;
                        continue;
                    }
                },
            };
            records.push(CaseRecord::new(
                Some(jurisdiction),
                row.date,
                row.confirmed,
                row.deceased,
                row.recovered,
            ));
        }
        if skipped > 0 {
            tracing::warn!("Skipped {} sample rows with unresolved jurisdictions", skipped);
        }
        Ok(Self::new(records))
    }

    fn matching<'a>(&'a self, query: &'a RecordQuery) -> impl Iterator<Item = &'a CaseRecord> + 'a {
        self.records.iter().filter(move |r| {
            r.jurisdiction
                .as_deref()
                .is_some_and(|j| query.matches(j))
        })
    }
}

fn count(record: &CaseRecord, metric: Metric) -> u64 {
    match metric {
        Metric::Confirmed => record.confirmed,
        Metric::Deceased => record.deceased,
    }
}

#[async_trait]
impl CaseRepository for InMemoryCaseRepository {
    async fn query_records(&self, query: &RecordQuery) -> Result<Vec<CaseRecord>> {
        Ok(self.matching(query).cloned().collect())
    }

    async fn top_jurisdictions(&self, query: &TopQuery) -> Result<Vec<Arc<Jurisdiction>>> {
        let Some(newest) = self.matching(&query.records).map(|r| r.date).max() else {
            return Ok(Vec::new());
        };

        let mut totals: Vec<(Arc<Jurisdiction>, u64)> = Vec::new();
        let mut slots: HashMap<JurisdictionId, usize> = HashMap::new();
        for record in self.matching(&query.records).filter(|r| r.date == newest) {
            let Some(jurisdiction) = &record.jurisdiction else {
                continue;
            };
            let slot = *slots.entry(jurisdiction.id).or_insert_with(|| {
                totals.push((jurisdiction.clone(), 0));
                totals.len() - 1
            });
            totals[slot].1 += count(record, query.ranking);
        }
        totals.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(totals
            .into_iter()
            .take(query.limit)
            .map(|(jurisdiction, _)| jurisdiction)
            .collect())
    }

    async fn latest_root_records(&self) -> Result<Vec<CaseRecord>> {
        let roots = RecordQuery::new(RecordScope::Roots);
        let Some(newest) = self.matching(&roots).map(|r| r.date).max() else {
            return Ok(Vec::new());
        };
        let mut latest: Vec<CaseRecord> = self
            .matching(&roots)
            .filter(|r| r.date == newest)
            .cloned()
            .collect();
        latest.sort_by(|a, b| b.confirmed.cmp(&a.confirmed));
        Ok(latest)
    }
}
