// Domain layer - Case series, chart transforms and chart assembly
pub mod chart;
pub mod chart_type;
pub mod color;
pub mod error;
pub mod jurisdiction;
pub mod record;
pub mod regression;
pub mod scatter;
pub mod series;
