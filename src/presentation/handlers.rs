// HTTP request handlers
use crate::application::chart_request::CasesChartRequest;
use crate::domain::scatter::ScatterAxis;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::json_mapper::{cases_chart_to_dto, scatter_chart_to_dto};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Confirmed cases and deaths over time
pub async fn cases_chart(
    Query(request): Query<CasesChartRequest>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let compress = accepts_brotli(&headers);
    let chart = state.chart_service.cases_chart(&request).await?;
    tracing::info!(
        series = chart.series.len(),
        days = chart.days,
        "Serving cases chart for {:?}",
        request.country.as_deref().unwrap_or("top countries")
    );

    let dto = cases_chart_to_dto(chart);
    Ok(json_response(&dto, compress).await.into_response())
}

/// Deaths per million against population, GDP or median age
pub async fn deaths_chart(
    Path(axis): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let compress = accepts_brotli(&headers);
    let axis: ScatterAxis = axis.parse().map_err(ApiError::UnknownChart)?;
    let chart = state.scatter_service.deaths_by(axis).await?;

    let dto = scatter_chart_to_dto(chart);
    Ok(json_response(&dto, compress).await.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_service::CasesChartService;
    use crate::application::scatter_service::ScatterService;
    use crate::infrastructure::config::ChartSettings;
    use crate::infrastructure::jurisdiction_catalog::tests::catalog;
    use crate::infrastructure::memory_repository::tests::repository;
    use axum::http::{StatusCode, Uri};

    fn state() -> Arc<AppState> {
        let repository = Arc::new(repository());
        Arc::new(AppState {
            chart_service: CasesChartService::new(repository.clone(), Arc::new(catalog()), ChartSettings::default()),
            scatter_service: ScatterService::new(repository),
        })
    }

    #[tokio::test]
    async fn test_cases_chart_ok() {
        let request = CasesChartRequest {
            country: Some("Canada".to_string()),
            ..Default::default()
        };
        let response = cases_chart(Query(request), HeaderMap::new(), State(state()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cases_chart_lenient_flags() {
        for uri in [
            "/charts/cases?country=Canada&cases=DAILY&regression=1",
            "/charts/cases?country=Canada&breakout=",
            "/charts/cases?country=Canada&breakout=yes",
            "/charts/cases?global=TRUE",
        ] {
            let uri: Uri = uri.parse().unwrap();
            let query = Query::<CasesChartRequest>::try_from_uri(&uri).unwrap();
            let response = cases_chart(query, HeaderMap::new(), State(state())).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }

        let uri: Uri = "/charts/cases?country=Canada&cases=DAILY&regression=1".parse().unwrap();
        let Query(request) = Query::<CasesChartRequest>::try_from_uri(&uri).unwrap();
        let chart = state().chart_service.cases_chart(&request).await.unwrap();
        assert!(chart.series.iter().any(|s| s.name == "Regression CAN"));
    }

    #[tokio::test]
    async fn test_cases_chart_bad_type() {
        let request = CasesChartRequest {
            cases: Some("PIE".to_string()),
            ..Default::default()
        };
        let response = cases_chart(Query(request), HeaderMap::new(), State(state()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_deaths_chart_unknown_axis() {
        let response = deaths_chart(Path("income".to_string()), HeaderMap::new(), State(state()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = deaths_chart(Path("gdp".to_string()), HeaderMap::new(), State(state()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
