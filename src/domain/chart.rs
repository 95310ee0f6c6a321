// Cases chart domain model and assembly
use super::chart_type::{ChartType, Metric, MetricSeries};
use super::color::Color;
use super::regression::Polynomial;
use super::series::{DataSeries, DateGrid, SeriesSet};
use chrono::NaiveDate;
use std::cmp::Reverse;

pub const WORLD_POPULATION: f64 = 7.8e9;
pub const REGRESSION_DEGREE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub confirmed: ChartType,
    pub deceased: ChartType,
    pub regression: bool,
    pub aggregate: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            confirmed: ChartType::Absolute,
            deceased: ChartType::Absolute,
            regression: false,
            aggregate: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAxis {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    Solid,
    Dashed { on: f64, off: f64 },
}

pub const REGRESSION_DASH: LineStyle = LineStyle::Dashed { on: 2.0, off: 2.0 };
pub const SECONDARY_DASH: LineStyle = LineStyle::Dashed { on: 5.0, off: 5.0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Data,
    Regression,
}

#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub name: String,
    pub color: Color,
    pub line: LineStyle,
    pub axis: YAxis,
    pub kind: SeriesKind,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct CasesChart {
    pub first: NaiveDate,
    /// Exclusive.
    pub last: NaiveDate,
    pub days: usize,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone)]
pub struct ChartAssembler {
    options: ChartOptions,
    world_population: f64,
    regression_degree: usize,
}

impl ChartAssembler {
    pub fn new(options: ChartOptions) -> Self {
        Self {
            options,
            world_population: WORLD_POPULATION,
            regression_degree: REGRESSION_DEGREE,
        }
    }

    pub fn with_world_population(mut self, population: f64) -> Self {
        self.world_population = population;
        self
    }

    pub fn with_regression_degree(mut self, degree: usize) -> Self {
        self.regression_degree = degree;
        self
    }

    pub fn assemble(&self, set: SeriesSet) -> CasesChart {
        let grid = set.grid;
        let dates: Vec<NaiveDate> = grid.dates().collect();
        let mut ordered = set.series;
        ordered.sort_by_key(|s| Reverse(s.latest_confirmed()));

        let mut series = Vec::new();
        for data in &ordered {
            self.emit(data, &grid, &dates, &mut series);
        }
        tracing::debug!(
            jurisdictions = ordered.len(),
            series = series.len(),
            days = grid.days(),
            "assembled cases chart"
        );
        CasesChart {
            first: grid.first,
            last: grid.last,
            days: grid.days(),
            series,
        }
    }

    fn emit(&self, data: &DataSeries, grid: &DateGrid, dates: &[NaiveDate], out: &mut Vec<ChartSeries>) {
        let (confirmed, deceased) = self.transform(data, grid);
        let code = data.code();
        tracing::debug!(series = data.name(), first = %data.first, last = %data.last, "assembling series");

        if !confirmed.chart_type.is_suppressed() {
            let name = confirmed.label(code);
            let regression = self.regression_overlay(&confirmed, code, data.color, dates);
            out.push(ChartSeries {
                name,
                color: data.color,
                line: LineStyle::Solid,
                axis: YAxis::Primary,
                kind: SeriesKind::Data,
                x: dates.to_vec(),
                y: confirmed.into_values(),
            });
            out.extend(regression);
        }

        if !deceased.chart_type.is_suppressed() {
            let (axis, line) = if self.options.confirmed.is_suppressed() {
                (YAxis::Primary, LineStyle::Solid)
            } else {
                (YAxis::Secondary, SECONDARY_DASH)
            };
            out.push(ChartSeries {
                name: deceased.label(code),
                color: data.color,
                line,
                axis,
                kind: SeriesKind::Data,
                x: dates.to_vec(),
                y: deceased.into_values(),
            });
        }
    }

    /// Walks the date grid for one data series, feeding both metrics day by day.
    pub fn transform(&self, data: &DataSeries, grid: &DateGrid) -> (MetricSeries, MetricSeries) {
        let days = grid.days();
        let regression = self.options.regression && self.options.confirmed.supports_regression();
        let mut confirmed = MetricSeries::new(Metric::Confirmed, self.options.confirmed, regression, days);
        let mut deceased = MetricSeries::new(Metric::Deceased, self.options.deceased, false, days);
        let population = data
            .jurisdiction
            .as_ref()
            .map(|j| j.population_or(self.world_population))
            .unwrap_or(self.world_population);

        let mut points = data.points.iter().peekable();
        for date in grid.dates() {
            let mut observed = false;
            while let Some(point) = points.next_if(|p| p.date <= date) {
                confirmed.observe(point.cumulative_confirmed, point.new_confirmed);
                deceased.observe(point.cumulative_deceased, point.new_deceased);
                observed = true;
            }
            if !observed {
                confirmed.hold();
                deceased.hold();
            }
            confirmed.append(population, confirmed.current);
            deceased.append(population, confirmed.current);
        }
        (confirmed, deceased)
    }

    fn regression_overlay(
        &self,
        confirmed: &MetricSeries,
        code: &str,
        color: Color,
        dates: &[NaiveDate],
    ) -> Option<ChartSeries> {
        if !confirmed.regression {
            return None;
        }
        let Some(fit) = Polynomial::fit(confirmed.values(), self.regression_degree) else {
            tracing::debug!(code, days = dates.len(), "not enough days for a regression overlay");
            return None;
        };
        Some(ChartSeries {
            name: format!("Regression {}", code),
            color,
            line: REGRESSION_DASH,
            axis: YAxis::Primary,
            kind: SeriesKind::Regression,
            x: dates.to_vec(),
            y: fit.fitted(dates.len()),
        })
    }
}
