use crate::domain::chart::{REGRESSION_DEGREE, WORLD_POPULATION};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub data: DataSettings,
    #[serde(default)]
    pub charts: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    pub jurisdictions_path: String,
    pub records_path: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChartSettings {
    #[serde(default = "default_max_jurisdictions")]
    pub max_jurisdictions: usize,
    #[serde(default = "default_world_population")]
    pub world_population: f64,
    #[serde(default = "default_regression_degree")]
    pub regression_degree: usize,
}

fn default_max_jurisdictions() -> usize {
    6
}

fn default_world_population() -> f64 {
    WORLD_POPULATION
}

fn default_regression_degree() -> usize {
    REGRESSION_DEGREE
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            max_jurisdictions: default_max_jurisdictions(),
            world_population: default_world_population(),
            regression_degree: default_regression_degree(),
        }
    }
}

/// Loads `config/app.*`, overridden by `CASES__SECTION__KEY` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app"))
        .add_source(config::Environment::with_prefix("CASES").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
