// Chart types - per-day display transforms of a cumulative metric
use super::error::ChartError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartType {
    #[default]
    Absolute,
    Relative,
    Daily,
    RollingAverage,
    Suppress,
    Mortality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Confirmed,
    Deceased,
}

impl Metric {
    pub fn subject(self) -> &'static str {
        match self {
            Metric::Confirmed => "Confirmed",
            Metric::Deceased => "Deceased",
        }
    }
}

/// The values fed to a transform for one day of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayInput {
    pub current: i64,
    pub new: i64,
    pub population: f64,
    /// Cumulative confirmed count for the same day, used by the mortality ratio.
    pub paired_current: i64,
}

const WINDOW_PRIOR: usize = 6;
const WINDOW_LEN: f64 = 7.0;

/// Seven-day moving average of daily values.
///
/// The first six pushes are buffered and yield 0; every later push yields the
/// mean of itself and the six values pushed before it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollingWindow {
    prior: [f64; WINDOW_PRIOR],
    filled: usize,
}

impl RollingWindow {
    pub fn push(&mut self, value: f64) -> f64 {
        if self.filled < WINDOW_PRIOR {
            self.prior[self.filled] = value;
            self.filled += 1;
            return 0.0;
        }
        let sum = value + self.prior.iter().sum::<f64>();
        self.prior.rotate_left(1);
        self.prior[WINDOW_PRIOR - 1] = value;
        sum / WINDOW_LEN
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformState {
    pub window: RollingWindow,
}

impl ChartType {
    pub fn token(self) -> &'static str {
        match self {
            ChartType::Absolute => "ABS",
            ChartType::Relative => "REL",
            ChartType::Daily => "DAILY",
            ChartType::RollingAverage => "ROLLING",
            ChartType::Suppress => "SUPPRESS",
            ChartType::Mortality => "MORTALITY",
        }
    }

    pub fn is_suppressed(self) -> bool {
        self == ChartType::Suppress
    }

    /// Regression overlays are only drawn over daily values.
    pub fn supports_regression(self) -> bool {
        matches!(self, ChartType::Daily | ChartType::RollingAverage)
    }

    /// Value for one day, or `None` when the metric is suppressed.
    pub fn transform(self, state: &mut TransformState, input: DayInput) -> Option<f64> {
        let value = match self {
            ChartType::Absolute => input.current as f64,
            ChartType::Relative => input.current as f64 / (input.population / 1e6),
            ChartType::Daily => input.new as f64,
            ChartType::RollingAverage => state.window.push(input.new as f64),
            ChartType::Mortality => {
                if input.paired_current > 0 {
                    input.current as f64 / input.paired_current as f64
                } else {
                    0.0
                }
            }
            ChartType::Suppress => return None,
        };
        Some(value)
    }

    pub fn label(self, metric: Metric, code: &str) -> String {
        let subject = metric.subject();
        match self {
            ChartType::Relative => format!("#{}/mio {}", subject, code),
            ChartType::Suppress => String::new(),
            ChartType::Daily => format!("#Newly {} {}", subject, code),
            ChartType::RollingAverage => format!("7 day rolling avg #newly {} {}", subject, code),
            ChartType::Absolute | ChartType::Mortality => format!("#{} {}", subject, code),
        }
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            ChartType::Absolute,
            ChartType::Relative,
            ChartType::Daily,
            ChartType::RollingAverage,
            ChartType::Suppress,
            ChartType::Mortality,
        ]
        .into_iter()
        .find(|t| t.token().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| ChartError::InvalidChartType(s.to_string()))
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Transform state and output for one metric of one data series.
#[derive(Debug, Clone)]
pub struct MetricSeries {
    pub metric: Metric,
    pub chart_type: ChartType,
    pub regression: bool,
    pub current: i64,
    pub new: i64,
    state: TransformState,
    values: Vec<f64>,
}

impl MetricSeries {
    pub fn new(metric: Metric, chart_type: ChartType, regression: bool, days: usize) -> Self {
        let capacity = if chart_type.is_suppressed() { 0 } else { days };
        Self {
            metric,
            chart_type,
            regression,
            current: 0,
            new: 0,
            state: TransformState::default(),
            values: Vec::with_capacity(capacity),
        }
    }

    /// A day with a reported data point.
    pub fn observe(&mut self, current: i64, new: i64) {
        self.current = current;
        self.new = new;
    }

    /// A day with no data point: the cumulative value holds, nothing is new.
    pub fn hold(&mut self) {
        self.new = 0;
    }

    pub fn append(&mut self, population: f64, paired_current: i64) {
        let input = DayInput {
            current: self.current,
            new: self.new,
            population,
            paired_current,
        };
        if let Some(value) = self.chart_type.transform(&mut self.state, input) {
            self.values.push(value);
        }
    }

    pub fn label(&self, code: &str) -> String {
        self.chart_type.label(self.metric, code)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(current: i64, new: i64) -> DayInput {
        DayInput {
            current,
            new,
            population: 2_000_000.0,
            paired_current: 0,
        }
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!("ABS".parse::<ChartType>().unwrap(), ChartType::Absolute);
        assert_eq!("rolling".parse::<ChartType>().unwrap(), ChartType::RollingAverage);
        assert_eq!("Mortality".parse::<ChartType>().unwrap(), ChartType::Mortality);
        assert_eq!(ChartType::default(), ChartType::Absolute);

        let err = "WEEKLY".parse::<ChartType>().unwrap_err();
        assert!(matches!(err, ChartError::InvalidChartType(ref t) if t == "WEEKLY"));
    }

    #[test]
    fn test_absolute_relative_daily() {
        let mut state = TransformState::default();
        assert_eq!(ChartType::Absolute.transform(&mut state, input(15, 5)), Some(15.0));
        assert_eq!(ChartType::Daily.transform(&mut state, input(15, 5)), Some(5.0));
        // 15 cases in a population of 2 million is 7.5 per million
        assert_eq!(ChartType::Relative.transform(&mut state, input(15, 5)), Some(7.5));
        assert_eq!(ChartType::Suppress.transform(&mut state, input(15, 5)), None);
    }

    #[test]
    fn test_mortality_ratio() {
        let mut state = TransformState::default();
        let mut day = input(3, 1);
        assert_eq!(ChartType::Mortality.transform(&mut state, day), Some(0.0));

        day.paired_current = 60;
        assert_eq!(ChartType::Mortality.transform(&mut state, day), Some(0.05));
    }

    #[test]
    fn test_rolling_window() {
        let mut window = RollingWindow::default();
        let daily = [7.0, 14.0, 0.0, 7.0, 7.0, 7.0, 14.0, 21.0, 0.0];
        let out: Vec<f64> = daily.iter().map(|v| window.push(*v)).collect();

        assert_eq!(&out[..6], &[0.0; 6]);
        assert_eq!(out[6], 56.0 / 7.0);
        assert_eq!(out[7], 70.0 / 7.0);
        assert_eq!(out[8], 56.0 / 7.0);
    }

    #[test]
    fn test_rolling_window_matches_trailing_mean() {
        let daily: Vec<f64> = (0..40).map(|i| ((i * 37) % 11) as f64).collect();
        let mut window = RollingWindow::default();
        for (day, value) in daily.iter().enumerate() {
            let out = window.push(*value);
            if day < 6 {
                assert_eq!(out, 0.0);
            } else {
                let expected = daily[day - 6..=day].iter().sum::<f64>() / 7.0;
                assert!((out - expected).abs() < 1e-9, "day {}", day);
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(ChartType::Absolute.label(Metric::Confirmed, "CAN"), "#Confirmed CAN");
        assert_eq!(ChartType::Relative.label(Metric::Deceased, "CAN"), "#Deceased/mio CAN");
        assert_eq!(ChartType::Daily.label(Metric::Confirmed, "CA"), "#Newly Confirmed CA");
        assert_eq!(
            ChartType::RollingAverage.label(Metric::Deceased, "NLD"),
            "7 day rolling avg #newly Deceased NLD"
        );
        assert_eq!(ChartType::Suppress.label(Metric::Confirmed, "CAN"), "");
        assert_eq!(ChartType::Absolute.label(Metric::Confirmed, ""), "#Confirmed ");
    }

    #[test]
    fn test_metric_series_holds_gap_days() {
        let mut series = MetricSeries::new(Metric::Confirmed, ChartType::Daily, false, 3);
        series.observe(10, 10);
        series.append(1e6, 10);
        series.hold();
        series.append(1e6, 10);
        series.observe(12, 2);
        series.append(1e6, 12);

        assert_eq!(series.current, 12);
        assert_eq!(series.values(), &[10.0, 0.0, 2.0]);
    }

    #[test]
    fn test_suppressed_metric_series_stays_empty() {
        let mut series = MetricSeries::new(Metric::Deceased, ChartType::Suppress, false, 3);
        series.observe(1, 1);
        series.append(1e6, 5);
        assert!(series.values().is_empty());
        assert_eq!(series.label("CAN"), "");
    }
}
