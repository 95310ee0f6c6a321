// Jurisdiction domain model

pub type JurisdictionId = u32;

/// A geographic reporting unit: a country or one of its regions.
#[derive(Debug, Clone, PartialEq)]
pub struct Jurisdiction {
    pub id: JurisdictionId,
    pub name: String,
    pub alpha2: String,
    pub alpha3: String,
    pub aliases: Vec<String>,
    pub parent: Option<JurisdictionId>,
    pub population: i64,
    pub median_age: f64,
    pub gdp_per_cap_ppp: f64,
}

impl Jurisdiction {
    pub fn new(id: JurisdictionId, name: String, parent: Option<JurisdictionId>) -> Self {
        Self {
            id,
            name,
            alpha2: String::new(),
            alpha3: String::new(),
            aliases: Vec::new(),
            parent,
            population: 0,
            median_age: 0.0,
            gdp_per_cap_ppp: 0.0,
        }
    }

    /// ISO alpha-3 code, falling back to alpha-2.
    pub fn code(&self) -> &str {
        if self.alpha3.is_empty() {
            &self.alpha2
        } else {
            &self.alpha3
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn population_or(&self, world_population: f64) -> f64 {
        if self.population > 0 {
            self.population as f64
        } else {
            world_population
        }
    }
}
