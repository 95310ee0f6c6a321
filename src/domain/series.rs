// Series builder - groups cumulative records into one daily timeline per jurisdiction
use super::color::{Color, palette_color};
use super::error::ChartError;
use super::jurisdiction::{Jurisdiction, JurisdictionId};
use super::record::CaseRecord;
use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;

pub const GLOBAL_SERIES_NAME: &str = "Global";

/// `None` keys the synthetic Global series.
pub type SeriesKey = Option<JurisdictionId>;

/// One day of one jurisdiction. `new_*` fields are only meaningful once the
/// owning [`SeriesSet`] has been produced by [`SeriesBuilder::finish`].
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub cumulative_confirmed: i64,
    pub new_confirmed: i64,
    pub cumulative_deceased: i64,
    pub new_deceased: i64,
}

impl DataPoint {
    fn open(date: NaiveDate) -> Self {
        Self {
            date,
            cumulative_confirmed: 0,
            new_confirmed: 0,
            cumulative_deceased: 0,
            new_deceased: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DataSeries {
    pub jurisdiction: Option<Arc<Jurisdiction>>,
    pub color: Color,
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub points: Vec<DataPoint>,
}

impl DataSeries {
    fn new(jurisdiction: Option<Arc<Jurisdiction>>, color: Color, date: NaiveDate) -> Self {
        Self {
            jurisdiction,
            color,
            first: date,
            last: date,
            points: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.jurisdiction
            .as_ref()
            .map(|j| j.name.as_str())
            .unwrap_or(GLOBAL_SERIES_NAME)
    }

    /// Alpha-3/alpha-2 code; blank for Global.
    pub fn code(&self) -> &str {
        self.jurisdiction.as_ref().map(|j| j.code()).unwrap_or("")
    }

    pub fn latest_confirmed(&self) -> i64 {
        self.points.last().map(|p| p.cumulative_confirmed).unwrap_or(0)
    }

    fn append(&mut self, record: &CaseRecord) {
        let opens_day = match self.points.last() {
            Some(current) => current.date < record.date,
            None => true,
        };
        if opens_day {
            self.last = record.date;
            self.points.push(DataPoint::open(record.date));
        }
        if let Some(current) = self.points.last_mut() {
            current.cumulative_confirmed += record.confirmed as i64;
            current.cumulative_deceased += record.deceased as i64;
        }
    }

    fn close_deltas(&mut self) {
        let (mut cases, mut deaths) = (0, 0);
        for point in &mut self.points {
            point.new_confirmed = point.cumulative_confirmed - cases;
            point.new_deceased = point.cumulative_deceased - deaths;
            cases = point.cumulative_confirmed;
            deaths = point.cumulative_deceased;
        }
    }
}

/// Half-open range of calendar days `[first, last)` shared by every series of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateGrid {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateGrid {
    pub fn days(&self) -> usize {
        (self.last - self.first).num_days().max(0) as usize
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let first = self.first;
        (0..self.days() as u64).filter_map(move |d| first.checked_add_days(Days::new(d)))
    }
}

#[derive(Debug, Clone)]
pub struct SeriesSet {
    pub grid: DateGrid,
    /// In order of first appearance.
    pub series: Vec<DataSeries>,
}

impl SeriesSet {
    #[cfg(test)]
    pub fn get(&self, key: SeriesKey) -> Option<&DataSeries> {
        self.series
            .iter()
            .find(|s| s.jurisdiction.as_ref().map(|j| j.id) == key)
    }
}

#[derive(Debug, Default)]
pub struct SeriesBuilder {
    series: Vec<DataSeries>,
    index: HashMap<SeriesKey, usize>,
    first: Option<NaiveDate>,
    last: Option<NaiveDate>,
}

impl SeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records must arrive in ascending date order.
    pub fn push(&mut self, record: &CaseRecord) {
        self.first = Some(self.first.map_or(record.date, |d| d.min(record.date)));
        self.last = Some(self.last.map_or(record.date, |d| d.max(record.date)));

        let key = record.jurisdiction.as_ref().map(|j| j.id);
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.series.len();
                self.series.push(DataSeries::new(
                    record.jurisdiction.clone(),
                    palette_color(slot),
                    record.date,
                ));
                self.index.insert(key, slot);
                tracing::debug!(series = self.series[slot].name(), "opened data series");
                slot
            }
        };
        self.series[slot].append(record);
    }

    pub fn extend<'a>(&mut self, records: impl IntoIterator<Item = &'a CaseRecord>) {
        for record in records {
            self.push(record);
        }
    }

    /// Computes every daily delta and closes the date grid.
    pub fn finish(mut self) -> Result<SeriesSet, ChartError> {
        let (Some(first), Some(last)) = (self.first, self.last) else {
            return Err(ChartError::EmptyInput);
        };
        for series in &mut self.series {
            series.close_deltas();
        }
        let last = last.succ_opt().unwrap_or(last);
        let grid = DateGrid { first, last };
        tracing::debug!(series = self.series.len(), days = grid.days(), "built series set");
        Ok(SeriesSet {
            grid,
            series: self.series,
        })
    }
}
