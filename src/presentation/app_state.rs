// Application state for HTTP handlers
use crate::application::chart_service::CasesChartService;
use crate::application::scatter_service::ScatterService;

#[derive(Clone)]
pub struct AppState {
    pub chart_service: CasesChartService,
    pub scatter_service: ScatterService,
}
