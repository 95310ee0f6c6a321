// Deaths-per-million scatter charts against country indicators
use super::record::CaseRecord;
use std::str::FromStr;

pub const DEATHS_PER_MIO_LABEL: &str = "#Deceased/mio";
const MIN_DEATHS_PER_MIO: f64 = 20.0;
const ANNOTATE_ABOVE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterAxis {
    Population,
    GdpPerCapita,
    MedianAge,
}

impl ScatterAxis {
    pub fn label(self) -> &'static str {
        match self {
            ScatterAxis::Population => "Population (mio)",
            ScatterAxis::GdpPerCapita => "GDP per capita PPP",
            ScatterAxis::MedianAge => "Median Age",
        }
    }
}

impl FromStr for ScatterAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "population" => Ok(ScatterAxis::Population),
            "gdp" => Ok(ScatterAxis::GdpPerCapita),
            "median-age" => Ok(ScatterAxis::MedianAge),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct ScatterChart {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ScatterPoint>,
    pub annotations: Vec<Annotation>,
}

impl ScatterChart {
    /// Builds the chart from the latest record of every country; records without a jurisdiction are ignored.
    pub fn deaths_by(axis: ScatterAxis, latest: &[CaseRecord]) -> Self {
        let mut points = Vec::new();
        let mut annotations = Vec::new();

        for record in latest {
            let Some(country) = record.jurisdiction.as_deref() else {
                continue;
            };
            let x = match axis {
                ScatterAxis::Population if country.population >= 1000 => {
                    country.population as f64 / 1e6
                }
                ScatterAxis::GdpPerCapita
                    if country.gdp_per_cap_ppp >= 10000.0 && country.population >= 10000 =>
                {
                    country.gdp_per_cap_ppp
                }
                ScatterAxis::MedianAge
                    if country.median_age >= 20.0 && country.population >= 10000 =>
                {
                    country.median_age
                }
                _ => continue,
            };
            let y = record.deceased as f64 / (country.population as f64 / 1e6);
            if y < MIN_DEATHS_PER_MIO {
                continue;
            }
            points.push(ScatterPoint { x, y });
            if y > ANNOTATE_ABOVE {
                annotations.push(Annotation {
                    x,
                    y,
                    label: country.alpha3.clone(),
                });
            }
        }

        Self {
            x_label: axis.label(),
            y_label: DEATHS_PER_MIO_LABEL,
            points,
            annotations,
        }
    }
}
