// Chart pipeline errors
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    /// No records arrived, so there is no date range to chart.
    #[error("no case records to chart")]
    EmptyInput,

    #[error("unknown jurisdiction: {0}")]
    UnresolvedReference(String),

    #[error("invalid chart type: {0}")]
    InvalidChartType(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
