// Mapper to convert domain charts to JSON wire types
use crate::domain::chart::{CasesChart, ChartSeries, LineStyle, SeriesKind, YAxis};
use crate::domain::scatter::{Annotation, ScatterChart, ScatterPoint};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CasesChartDto {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub days: usize,
    pub series: Vec<SeriesDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDto {
    pub name: String,
    pub color: String,
    /// Empty for a solid stroke
    pub dash: Vec<f64>,
    pub axis: &'static str,
    pub kind: &'static str,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterChartDto {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<PointDto>,
    pub annotations: Vec<AnnotationDto>,
}

#[derive(Debug, Serialize)]
pub struct PointDto {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize)]
pub struct AnnotationDto {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

pub fn cases_chart_to_dto(chart: CasesChart) -> CasesChartDto {
    CasesChartDto {
        first: chart.first,
        last: chart.last,
        days: chart.days,
        series: chart.series.into_iter().map(series_to_dto).collect(),
    }
}

fn series_to_dto(series: ChartSeries) -> SeriesDto {
    let dash = match series.line {
        LineStyle::Solid => Vec::new(),
        LineStyle::Dashed { on, off } => vec![on, off],
    };
    let axis = match series.axis {
        YAxis::Primary => "primary",
        YAxis::Secondary => "secondary",
    };
    let kind = match series.kind {
        SeriesKind::Data => "data",
        SeriesKind::Regression => "regression",
    };

    SeriesDto {
        name: series.name,
        color: series.color.to_hex(),
        dash,
        axis,
        kind,
        x: series.x,
        y: series.y,
    }
}

pub fn scatter_chart_to_dto(chart: ScatterChart) -> ScatterChartDto {
    ScatterChartDto {
        x_label: chart.x_label,
        y_label: chart.y_label,
        points: chart
            .points
            .into_iter()
            .map(|ScatterPoint { x, y }| PointDto { x, y })
            .collect(),
        annotations: chart
            .annotations
            .into_iter()
            .map(|Annotation { x, y, label }| AnnotationDto { x, y, label })
            .collect(),
    }
}
