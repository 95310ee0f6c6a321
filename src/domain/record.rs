// Case record domain model
use super::jurisdiction::Jurisdiction;
use chrono::NaiveDate;
use std::sync::Arc;

/// Cumulative counts reported for one jurisdiction on one day.
///
/// A record without a jurisdiction is summed into the synthetic "Global" series.
#[derive(Debug, Clone)]
pub struct CaseRecord {
    pub jurisdiction: Option<Arc<Jurisdiction>>,
    pub date: NaiveDate,
    pub confirmed: u64,
    pub deceased: u64,
    pub recovered: u64,
}

impl CaseRecord {
    pub fn new(
        jurisdiction: Option<Arc<Jurisdiction>>,
        date: NaiveDate,
        confirmed: u64,
        deceased: u64,
        recovered: u64,
    ) -> Self {
        Self {
            jurisdiction,
            date,
            confirmed,
            deceased,
            recovered,
        }
    }

    /// Same counts, attributed to `target` instead. Used to roll region rows into their country.
    pub fn reattributed(self, target: Option<Arc<Jurisdiction>>) -> Self {
        Self {
            jurisdiction: target,
            ..self
        }
    }
}
