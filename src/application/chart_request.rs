// Cases chart request parameters
use crate::domain::chart::ChartOptions;
use crate::domain::chart_type::ChartType;
use crate::domain::error::ChartError;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CasesChartRequest {
    /// Comma separated country names or codes
    pub country: Option<String>,
    /// Chart the regions of a single country separately instead of rolling them up; only `true` counts
    pub breakout: Option<String>,
    pub include: Option<String>,
    pub exclude: Option<String>,
    /// Chart type for confirmed cases
    pub cases: Option<String>,
    /// Chart type for deaths
    pub deaths: Option<String>,
    pub regression: Option<String>,
    /// Sum all countries into a single series when no country is given
    pub global: Option<String>,
}

fn split_list(value: &Option<String>) -> Vec<&str> {
    value
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lenient boolean flag: `1`, `t`, `true` in any of the usual casings. Anything else is false.
fn parse_flag(value: &Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("1" | "t" | "T" | "true" | "TRUE" | "True")
    )
}

fn parse_chart_type(value: &Option<String>) -> Result<Option<ChartType>, ChartError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(token) => token.parse().map(Some),
    }
}

impl CasesChartRequest {
    pub fn countries(&self) -> Vec<&str> {
        split_list(&self.country)
    }

    pub fn included(&self) -> Vec<&str> {
        split_list(&self.include)
    }

    pub fn excluded(&self) -> Vec<&str> {
        split_list(&self.exclude)
    }

    pub fn global(&self) -> bool {
        parse_flag(&self.global)
    }

    /// Daily and rolling charts show deaths the same way as cases, and only they honor `regression`.
    pub fn options(&self) -> Result<ChartOptions, ChartError> {
        let confirmed = parse_chart_type(&self.cases)?.unwrap_or_default();
        let mut deceased = parse_chart_type(&self.deaths)?.unwrap_or(confirmed);
        let mut regression = false;
        if confirmed.supports_regression() {
            deceased = confirmed;
            regression = parse_flag(&self.regression);
        }
        Ok(ChartOptions {
            confirmed,
            deceased,
            regression,
            aggregate: self.breakout.as_deref() != Some("true"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CasesChartRequest::default().options().unwrap();
        assert_eq!(options, ChartOptions::default());
    }

    #[test]
    fn test_deaths_default_to_cases() {
        let request = CasesChartRequest {
            cases: Some("REL".to_string()),
            ..Default::default()
        };
        let options = request.options().unwrap();
        assert_eq!(options.confirmed, ChartType::Relative);
        assert_eq!(options.deceased, ChartType::Relative);

        let request = CasesChartRequest {
            cases: Some("ABS".to_string()),
            deaths: Some("MORTALITY".to_string()),
            regression: Some("true".to_string()),
            ..Default::default()
        };
        let options = request.options().unwrap();
        assert_eq!(options.deceased, ChartType::Mortality);
        assert!(!options.regression);
    }

    #[test]
    fn test_daily_forces_deaths_and_allows_regression() {
        let request = CasesChartRequest {
            cases: Some("ROLLING".to_string()),
            deaths: Some("ABS".to_string()),
            regression: Some("true".to_string()),
            breakout: Some("true".to_string()),
            ..Default::default()
        };
        let options = request.options().unwrap();
        assert_eq!(options.confirmed, ChartType::RollingAverage);
        assert_eq!(options.deceased, ChartType::RollingAverage);
        assert!(options.regression);
        assert!(!options.aggregate);
    }

    #[test]
    fn test_invalid_chart_type_rejected() {
        let request = CasesChartRequest {
            deaths: Some("LOG".to_string()),
            ..Default::default()
        };
        assert!(matches!(request.options(), Err(ChartError::InvalidChartType(t)) if t == "LOG"));
    }

    #[test]
    fn test_lists_are_trimmed() {
        let request = CasesChartRequest {
            country: Some("Canada, NLD,,".to_string()),
            ..Default::default()
        };
        assert_eq!(request.countries(), vec!["Canada", "NLD"]);
        assert!(request.included().is_empty());
    }

    #[test]
    fn test_flags_accept_numeric_and_uppercase() {
        let request = CasesChartRequest {
            cases: Some("DAILY".to_string()),
            regression: Some("1".to_string()),
            global: Some("TRUE".to_string()),
            ..Default::default()
        };
        assert!(request.options().unwrap().regression);
        assert!(request.global());

        let request = CasesChartRequest {
            cases: Some("DAILY".to_string()),
            regression: Some("yes".to_string()),
            global: Some("0".to_string()),
            ..Default::default()
        };
        assert!(!request.options().unwrap().regression);
        assert!(!request.global());
    }

    #[test]
    fn test_breakout_only_on_exact_true() {
        for (value, aggregate) in [("true", false), ("", true), ("yes", true), ("1", true)] {
            let request = CasesChartRequest {
                breakout: Some(value.to_string()),
                ..Default::default()
            };
            assert_eq!(request.options().unwrap().aggregate, aggregate, "breakout={:?}", value);
        }
    }
}
