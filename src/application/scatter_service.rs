// Scatter service - Use case for deaths-per-million charts
use crate::application::case_repository::CaseRepository;
use crate::domain::error::ChartError;
use crate::domain::scatter::{ScatterAxis, ScatterChart};
use std::sync::Arc;

#[derive(Clone)]
pub struct ScatterService {
    repository: Arc<dyn CaseRepository>,
}

impl ScatterService {
    pub fn new(repository: Arc<dyn CaseRepository>) -> Self {
        Self { repository }
    }

    pub async fn deaths_by(&self, axis: ScatterAxis) -> Result<ScatterChart, ChartError> {
        let latest = self.repository.latest_root_records().await?;
        if latest.is_empty() {
            return Err(ChartError::EmptyInput);
        }
        let chart = ScatterChart::deaths_by(axis, &latest);
        tracing::debug!(
            axis = axis.label(),
            countries = latest.len(),
            points = chart.points.len(),
            "built deaths scatter chart"
        );
        Ok(chart)
    }
}
